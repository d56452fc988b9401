//! Declarative property animations.
//!
//! Groups are scheduled on an [`Animator`], advanced by the host loop via
//! [`Animator::tick`], and write presentation values onto their target
//! layer. A group's completion runs once, on the loop thread, after the
//! group has been removed. There is no cancellation.

use std::time::Duration;

use tracing::trace;

use super::{Scene, SurfaceId};
use crate::geometry::{clamp, denormalize};

/// Animatable layer properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Opacity,
    Scale,
    ShadowRadius,
    ShadowOffsetY,
}

/// Easing curve applied to an animation's progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingFunction {
    Linear,
    /// Material "swift" curve used for entering motion
    SwiftEnterInOut,
    /// Material "swift" curve used for exiting motion
    SwiftExitInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl TimingFunction {
    pub fn control_points(&self) -> (f32, f32, f32, f32) {
        match self {
            TimingFunction::Linear => (0.0, 0.0, 1.0, 1.0),
            TimingFunction::SwiftEnterInOut => (0.4027, 0.0, 0.1, 1.0),
            TimingFunction::SwiftExitInOut => (0.4027, 0.0, 0.2256, 1.0),
            TimingFunction::CubicBezier(x1, y1, x2, y2) => (*x1, *y1, *x2, *y2),
        }
    }

    /// Eased progress for linear progress `t` in `0..=1`
    pub fn apply(&self, t: f32) -> f32 {
        let t = clamp(t, 0.0, 1.0);
        if *self == TimingFunction::Linear || t == 0.0 || t == 1.0 {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        let s = solve_bezier_parameter(t, x1, x2);
        bezier(s, y1, y2)
    }
}

/// One coordinate of a cubic bezier anchored at 0 and 1
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`
fn solve_bezier_parameter(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let error = bezier(s, x1, x2) - x;
        if error.abs() < 1e-5 {
            return s;
        }
        let slope = bezier_slope(s, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    // Newton stalled; bisect
    let (mut low, mut high) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < 1e-5 {
            break;
        }
        if value < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    s
}

/// Interpolates one property between two values
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAnimation {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    /// `None` inherits the group's duration
    pub duration: Option<Duration>,
    /// Play forward then backward, doubling the active time
    pub autoreverses: bool,
    /// `None` inherits the group's timing
    pub timing: Option<TimingFunction>,
}

impl PropertyAnimation {
    pub fn new(property: Property, from: f32, to: f32) -> Self {
        Self {
            property,
            from,
            to,
            duration: None,
            autoreverses: false,
            timing: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn autoreversed(mut self) -> Self {
        self.autoreverses = true;
        self
    }

    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Value at `elapsed` into the group, or `None` once this animation's
    /// active time is over.
    fn value_at(&self, group: &AnimationGroup, elapsed: Duration) -> Option<f32> {
        let duration = self.duration.unwrap_or(group.duration);
        let active = if self.autoreverses { duration * 2 } else { duration };
        if elapsed >= active || duration.is_zero() {
            return None;
        }
        let mut local = elapsed.as_secs_f32() / duration.as_secs_f32();
        if local > 1.0 {
            local = 2.0 - local;
        }
        let progress = self.timing.unwrap_or(group.timing).apply(local);
        Some(denormalize(progress, self.from, self.to))
    }
}

/// Animations played together on one surface
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationGroup {
    pub target: SurfaceId,
    /// A new group with the same key on the same target replaces this one
    pub key: &'static str,
    pub animations: Vec<PropertyAnimation>,
    pub duration: Duration,
    pub timing: TimingFunction,
}

impl AnimationGroup {
    pub fn new(target: SurfaceId, key: &'static str, duration: Duration) -> Self {
        Self {
            target,
            key,
            animations: Vec::new(),
            duration,
            timing: TimingFunction::Linear,
        }
    }

    pub fn with_animation(mut self, animation: PropertyAnimation) -> Self {
        self.animations.push(animation);
        self
    }

    pub fn with_timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// One-shot callback run after a group finishes
pub type Completion = Box<dyn FnOnce(&mut Scene)>;

struct Running {
    id: AnimationId,
    group: AnimationGroup,
    elapsed: Duration,
    completion: Option<Completion>,
}

#[derive(Default)]
pub struct Animator {
    running: Vec<Running>,
    next_id: u64,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `group`, applying its starting values immediately.
    pub fn add(
        &mut self,
        scene: &mut Scene,
        group: AnimationGroup,
        completion: Option<Completion>,
    ) -> AnimationId {
        let replaced: Vec<Running> = {
            let (same, rest): (Vec<Running>, Vec<Running>) =
                std::mem::take(&mut self.running).into_iter().partition(|running| {
                    running.group.target == group.target && running.group.key == group.key
                });
            self.running = rest;
            same
        };
        for running in &replaced {
            trace!(key = running.group.key, "replacing running animation");
            clear_presentation(scene, &running.group);
        }

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        apply(scene, &group, Duration::ZERO);
        self.running.push(Running {
            id,
            group,
            elapsed: Duration::ZERO,
            completion,
        });
        id
    }

    /// Advance every group by `dt`. Returns how many groups finished.
    pub fn tick(&mut self, scene: &mut Scene, dt: Duration) -> usize {
        let mut finished = Vec::new();
        let mut index = 0;
        while index < self.running.len() {
            let running = &mut self.running[index];
            running.elapsed += dt;
            if running.elapsed >= running.group.duration {
                finished.push(self.running.remove(index));
            } else {
                apply(scene, &running.group, running.elapsed);
                index += 1;
            }
        }

        for running in &finished {
            clear_presentation(scene, &running.group);
        }
        let count = finished.len();
        for running in finished {
            trace!(key = running.group.key, id = running.id.0, "animation finished");
            if let Some(completion) = running.completion {
                completion(scene);
            }
        }
        count
    }

    pub fn running(&self) -> impl Iterator<Item = &AnimationGroup> {
        self.running.iter().map(|running| &running.group)
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}

fn apply(scene: &mut Scene, group: &AnimationGroup, elapsed: Duration) {
    if !scene.contains(group.target) {
        return;
    }
    let values: Vec<(Property, Option<f32>)> = group
        .animations
        .iter()
        .map(|animation| (animation.property, animation.value_at(group, elapsed)))
        .collect();
    if let Some(layer) = scene.layer_mut(group.target) {
        for (property, value) in values {
            let slot = match property {
                Property::Opacity => &mut layer.presentation.opacity,
                Property::Scale => &mut layer.presentation.scale,
                Property::ShadowRadius => &mut layer.presentation.shadow_radius,
                Property::ShadowOffsetY => &mut layer.presentation.shadow_offset_y,
            };
            *slot = value;
        }
    }
}

fn clear_presentation(scene: &mut Scene, group: &AnimationGroup) {
    if !scene.contains(group.target) {
        return;
    }
    if let Some(layer) = scene.layer_mut(group.target) {
        for animation in &group.animations {
            match animation.property {
                Property::Opacity => layer.presentation.opacity = None,
                Property::Scale => layer.presentation.scale = None,
                Property::ShadowRadius => layer.presentation.shadow_radius = None,
                Property::ShadowOffsetY => layer.presentation.shadow_offset_y = None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::geometry::Rect;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn fade(target: SurfaceId) -> AnimationGroup {
        AnimationGroup::new(target, "fade", ms(1000))
            .with_animation(PropertyAnimation::new(Property::Opacity, 1.0, 0.0))
    }

    #[test]
    fn test_timing_endpoints() {
        for timing in [
            TimingFunction::Linear,
            TimingFunction::SwiftEnterInOut,
            TimingFunction::SwiftExitInOut,
        ] {
            assert_eq!(timing.apply(0.0), 0.0);
            assert_eq!(timing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_swift_curve_is_monotonic_and_fast_out() {
        let curve = TimingFunction::SwiftEnterInOut;
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = curve.apply(step as f32 / 20.0);
            assert!(value >= previous - 1e-4);
            previous = value;
        }
        // Strong ease-out: well past halfway at the midpoint
        assert!(curve.apply(0.5) > 0.6);
    }

    #[test]
    fn test_start_values_apply_immediately() {
        let mut scene = Scene::new();
        let target = scene.create(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut animator = Animator::new();
        animator.add(&mut scene, fade(target), None);
        assert_eq!(scene.layer(target).unwrap().presentation.opacity, Some(1.0));
    }

    #[test]
    fn test_tick_interpolates_and_clears() {
        let mut scene = Scene::new();
        let target = scene.create(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut animator = Animator::new();
        animator.add(&mut scene, fade(target), None);

        assert_eq!(animator.tick(&mut scene, ms(250)), 0);
        let opacity = scene.layer(target).unwrap().presentation.opacity.unwrap();
        assert!((opacity - 0.75).abs() < 1e-4);

        assert_eq!(animator.tick(&mut scene, ms(750)), 1);
        assert!(scene.layer(target).unwrap().presentation.is_empty());
        assert!(animator.is_idle());
    }

    #[test]
    fn test_autoreverse_returns_to_start() {
        let mut scene = Scene::new();
        let target = scene.create(Rect::ZERO);
        let mut animator = Animator::new();
        let group = AnimationGroup::new(target, "pulse", ms(1000)).with_animation(
            PropertyAnimation::new(Property::Opacity, 0.0, 1.0)
                .with_duration(ms(500))
                .autoreversed(),
        );
        animator.add(&mut scene, group, None);

        animator.tick(&mut scene, ms(500));
        let peak = scene.layer(target).unwrap().presentation.opacity.unwrap();
        assert!((peak - 1.0).abs() < 1e-4);

        animator.tick(&mut scene, ms(250));
        let falling = scene.layer(target).unwrap().presentation.opacity.unwrap();
        assert!((falling - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut scene = Scene::new();
        let target = scene.create(Rect::ZERO);
        let mut animator = Animator::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        animator.add(
            &mut scene,
            fade(target),
            Some(Box::new(move |_: &mut Scene| counter.set(counter.get() + 1))),
        );

        animator.tick(&mut scene, ms(400));
        assert_eq!(calls.get(), 0);
        animator.tick(&mut scene, ms(600));
        animator.tick(&mut scene, ms(600));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_same_key_replaces_running_group() {
        let mut scene = Scene::new();
        let target = scene.create(Rect::ZERO);
        let mut animator = Animator::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        animator.add(
            &mut scene,
            fade(target),
            Some(Box::new(move |_: &mut Scene| counter.set(counter.get() + 1))),
        );
        animator.add(&mut scene, fade(target), None);

        assert_eq!(animator.running().count(), 1);
        animator.tick(&mut scene, ms(1000));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_completion_may_mutate_scene() {
        let mut scene = Scene::new();
        let target = scene.create(Rect::ZERO);
        let mut animator = Animator::new();
        animator.add(
            &mut scene,
            fade(target),
            Some(Box::new(move |scene: &mut Scene| scene.destroy(target))),
        );
        animator.tick(&mut scene, ms(1000));
        assert!(!scene.contains(target));
    }
}
