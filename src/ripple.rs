//! Ripple touch feedback.
//!
//! A [`RippleEffect`] is attached to a surface through a [`TapBinding`].
//! Every tap starts an independent run with its own disc (and overlay)
//! surfaces, so runs can overlap freely. A run goes
//! `Idle -> Triggered -> Animating` and back to `Idle` when its animation
//! settles, at which point its surfaces are destroyed and the action runs.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::geometry::{Point, Rect};
use crate::models::{RippleLocation, RipplePhase, RIPPLE_DURATION};
use crate::scene::{
    AnimationGroup, AnimationId, Animator, Content, Property, PropertyAnimation, Scene, SurfaceId,
    TimingFunction,
};
use crate::theme::{self, Rgba};

/// Final disc scale relative to its starting size
pub const RIPPLE_SCALE: f32 = 15.0;

pub const RIPPLE_ANIMATION_KEY: &str = "rippleAnimation";
pub const OVERLAY_ANIMATION_KEY: &str = "overlayAnimation";

/// Callback run when a ripple settles
pub type Action = Rc<dyn Fn()>;

/// Runs while a ripple is in the `Triggered` phase, before its animations
/// are scheduled. Cards use it to pulse their shadow alongside the ripple.
pub type TriggerHook = Rc<dyn Fn(&mut Scene, &mut Animator)>;

#[derive(Debug, Clone, PartialEq)]
pub struct RippleConfig {
    pub color: Rgba,
    pub duration: Duration,
    pub location: RippleLocation,
    /// Also fade a dimming layer over the whole surface
    pub with_overlay: bool,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            color: theme::RIPPLE,
            duration: RIPPLE_DURATION,
            location: RippleLocation::TouchLocation,
            with_overlay: true,
        }
    }
}

#[derive(Debug, Default)]
struct RippleState {
    phase: Cell<RipplePhase>,
    in_flight: Cell<usize>,
}

impl RippleState {
    fn start_run(&self) {
        self.in_flight.set(self.in_flight.get() + 1);
        self.phase.set(RipplePhase::Triggered);
    }

    fn finish_run(&self) {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        if remaining == 0 {
            self.phase.set(RipplePhase::Idle);
        }
    }
}

/// Surfaces and animation created by one trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleRun {
    pub disc: SurfaceId,
    pub overlay: Option<SurfaceId>,
    /// Disc center in the surface's coordinates
    pub origin: Point,
    /// Starting disc radius
    pub radius: f32,
    pub animation: AnimationId,
}

/// Cloning shares the phase tracking; all clones drive the same effect.
#[derive(Clone)]
pub struct RippleEffect {
    config: RippleConfig,
    action: Option<Action>,
    state: Rc<RippleState>,
}

impl RippleEffect {
    pub fn new(config: RippleConfig, action: Option<Action>) -> Self {
        Self {
            config,
            action,
            state: Rc::new(RippleState::default()),
        }
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    pub fn phase(&self) -> RipplePhase {
        self.state.phase.get()
    }

    /// Number of runs still animating
    pub fn in_flight(&self) -> usize {
        self.state.in_flight.get()
    }

    /// Play one ripple on `surface`.
    ///
    /// `touch` is in the surface's own coordinates and is ignored for
    /// [`RippleLocation::Center`]. `hook` runs after the ripple surfaces
    /// exist and before the animations start. Returns `None` only when the
    /// surface does not exist.
    pub fn trigger(
        &self,
        scene: &mut Scene,
        animator: &mut Animator,
        surface: SurfaceId,
        touch: Point,
        hook: Option<&TriggerHook>,
    ) -> Option<RippleRun> {
        let Some(bounds) = scene.layer(surface).map(|layer| layer.frame.bounds()) else {
            warn!(surface = surface.raw(), "ripple triggered on unknown surface");
            return None;
        };

        let origin = match self.config.location {
            RippleLocation::TouchLocation => touch,
            RippleLocation::Center => bounds.center(),
        };
        // Zero-sized surfaces degenerate to a zero-radius disc
        let size = (bounds.min_dimension() / 2.0).max(0.0);

        self.state.start_run();

        let disc = scene.create(Rect::new(
            origin.x - size / 2.0,
            origin.y - size / 2.0,
            size,
            size,
        ));
        if let Some(layer) = scene.layer_mut(disc) {
            layer.background = Some(self.config.color);
            layer.opacity = 0.0;
            layer.corner_radius = size / 2.0;
            layer.clips = true;
            layer.content = Content::Disc;
        }
        if let Some(layer) = scene.layer_mut(surface) {
            layer.clips = true;
        }
        scene.add_child(surface, disc);

        let overlay = self.config.with_overlay.then(|| {
            let overlay = scene.create(bounds);
            if let Some(layer) = scene.layer_mut(overlay) {
                layer.background = Some(theme::OVERLAY);
                layer.opacity = 0.0;
            }
            scene.add_child(surface, overlay);
            overlay
        });

        debug!(
            surface = surface.raw(),
            x = origin.x,
            y = origin.y,
            radius = size / 2.0,
            overlay = overlay.is_some(),
            "ripple triggered"
        );

        if let Some(hook) = hook {
            hook(scene, animator);
        }

        let duration = self.config.duration;
        if let Some(overlay) = overlay {
            let fade = AnimationGroup::new(overlay, OVERLAY_ANIMATION_KEY, duration)
                .with_timing(TimingFunction::SwiftEnterInOut)
                .with_animation(PropertyAnimation::new(Property::Opacity, 1.0, 0.0));
            animator.add(scene, fade, None);
        }

        let ripple = AnimationGroup::new(disc, RIPPLE_ANIMATION_KEY, duration)
            .with_timing(TimingFunction::SwiftEnterInOut)
            .with_animation(PropertyAnimation::new(Property::Scale, 1.0, RIPPLE_SCALE))
            .with_animation(
                PropertyAnimation::new(Property::Opacity, 0.0, 1.0)
                    .with_duration(duration / 2)
                    .autoreversed(),
            );

        let state = Rc::clone(&self.state);
        let action = self.action.clone();
        let animation = animator.add(
            scene,
            ripple,
            Some(Box::new(move |scene: &mut Scene| {
                scene.destroy(disc);
                if let Some(overlay) = overlay {
                    scene.destroy(overlay);
                }
                state.finish_run();
                debug!(disc = disc.raw(), "ripple settled");
                if let Some(action) = action {
                    action();
                }
            })),
        );

        self.state.phase.set(RipplePhase::Animating);

        Some(RippleRun {
            disc,
            overlay,
            origin,
            radius: size / 2.0,
            animation,
        })
    }
}

/// Ripple attached to a surface, played when the surface is tapped
#[derive(Clone)]
pub struct TapBinding {
    pub effect: RippleEffect,
    pub hook: Option<TriggerHook>,
}

impl TapBinding {
    pub fn new(effect: RippleEffect) -> Self {
        Self { effect, hook: None }
    }

    pub fn with_hook(mut self, hook: TriggerHook) -> Self {
        self.hook = Some(hook);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn setup(width: f32, height: f32) -> (Scene, Animator, SurfaceId) {
        let mut scene = Scene::new();
        let surface = scene.create(Rect::new(0.0, 0.0, width, height));
        (scene, Animator::new(), surface)
    }

    fn counting_action() -> (Action, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let action: Action = Rc::new(move || counter.set(counter.get() + 1));
        (action, calls)
    }

    #[test]
    fn test_trigger_schedules_ripple_and_overlay_with_configured_duration() {
        let (mut scene, mut animator, surface) = setup(300.0, 53.0);
        let (action, calls) = counting_action();
        let effect = RippleEffect::new(RippleConfig::default(), Some(action));

        let run = effect
            .trigger(&mut scene, &mut animator, surface, Point::new(20.0, 10.0), None)
            .unwrap();

        let groups: Vec<&AnimationGroup> = animator.running().collect();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|group| group.duration == ms(900)));

        let ripple = groups
            .iter()
            .find(|group| group.key == RIPPLE_ANIMATION_KEY)
            .unwrap();
        assert_eq!(ripple.target, run.disc);
        let scale = &ripple.animations[0];
        assert_eq!((scale.property, scale.from, scale.to), (Property::Scale, 1.0, 15.0));
        let opacity = &ripple.animations[1];
        assert_eq!(opacity.duration, Some(ms(450)));
        assert!(opacity.autoreverses);

        let overlay = groups
            .iter()
            .find(|group| group.key == OVERLAY_ANIMATION_KEY)
            .unwrap();
        assert_eq!(Some(overlay.target), run.overlay);

        animator.tick(&mut scene, ms(500));
        assert_eq!(calls.get(), 0);
        animator.tick(&mut scene, ms(400));
        animator.tick(&mut scene, ms(400));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_run_surfaces_are_removed_when_settled() {
        let (mut scene, mut animator, surface) = setup(100.0, 40.0);
        let effect = RippleEffect::new(RippleConfig::default(), None);
        let run = effect
            .trigger(&mut scene, &mut animator, surface, Point::new(5.0, 5.0), None)
            .unwrap();
        assert_eq!(scene.children(surface).len(), 2);

        animator.tick(&mut scene, ms(900));
        assert!(!scene.contains(run.disc));
        assert!(scene.children(surface).is_empty());
        assert!(animator.is_idle());
    }

    #[test]
    fn test_disc_geometry() {
        let (mut scene, mut animator, surface) = setup(100.0, 40.0);
        let effect = RippleEffect::new(RippleConfig::default(), None);
        let run = effect
            .trigger(&mut scene, &mut animator, surface, Point::new(30.0, 20.0), None)
            .unwrap();

        let disc = scene.layer(run.disc).unwrap();
        assert_eq!(disc.frame, Rect::new(20.0, 10.0, 20.0, 20.0));
        assert_eq!(disc.corner_radius, 10.0);
        assert_eq!(disc.opacity, 0.0);
        assert_eq!(run.radius, 10.0);
        assert!(scene.layer(surface).unwrap().clips);
    }

    #[test]
    fn test_center_location_ignores_touch() {
        let (mut scene, mut animator, surface) = setup(100.0, 40.0);
        let config = RippleConfig {
            location: RippleLocation::Center,
            with_overlay: false,
            ..RippleConfig::default()
        };
        let effect = RippleEffect::new(config, None);
        let run = effect
            .trigger(&mut scene, &mut animator, surface, Point::new(3.0, 3.0), None)
            .unwrap();
        assert_eq!(run.origin, Point::new(50.0, 20.0));
        assert_eq!(run.overlay, None);
        assert_eq!(animator.running().count(), 1);
    }

    #[test]
    fn test_zero_sized_surface_is_not_an_error() {
        let (mut scene, mut animator, surface) = setup(0.0, 0.0);
        let (action, calls) = counting_action();
        let effect = RippleEffect::new(RippleConfig::default(), Some(action));
        let run = effect
            .trigger(&mut scene, &mut animator, surface, Point::ZERO, None)
            .unwrap();
        assert_eq!(run.radius, 0.0);
        animator.tick(&mut scene, ms(900));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_overlapping_runs_are_independent() {
        let (mut scene, mut animator, surface) = setup(100.0, 40.0);
        let (action, calls) = counting_action();
        let effect = RippleEffect::new(RippleConfig::default(), Some(action));

        let first = effect
            .trigger(&mut scene, &mut animator, surface, Point::new(10.0, 10.0), None)
            .unwrap();
        animator.tick(&mut scene, ms(300));
        let second = effect
            .trigger(&mut scene, &mut animator, surface, Point::new(60.0, 10.0), None)
            .unwrap();
        assert_ne!(first.disc, second.disc);
        assert_eq!(effect.in_flight(), 2);
        assert_eq!(effect.phase(), RipplePhase::Animating);

        animator.tick(&mut scene, ms(600));
        assert_eq!(calls.get(), 1);
        assert!(!scene.contains(first.disc));
        assert!(scene.contains(second.disc));
        assert_eq!(effect.phase(), RipplePhase::Animating);

        animator.tick(&mut scene, ms(300));
        assert_eq!(calls.get(), 2);
        assert_eq!(effect.phase(), RipplePhase::Idle);
    }

    #[test]
    fn test_hook_runs_in_triggered_phase() {
        let (mut scene, mut animator, surface) = setup(100.0, 40.0);
        let effect = RippleEffect::new(RippleConfig::default(), None);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let observed = effect.clone();
        let log = Rc::clone(&seen);
        let hook: TriggerHook = Rc::new(move |_: &mut Scene, animator: &mut Animator| {
            log.borrow_mut()
                .push((observed.phase(), animator.running().count()));
        });

        assert_eq!(effect.phase(), RipplePhase::Idle);
        effect.trigger(&mut scene, &mut animator, surface, Point::ZERO, Some(&hook));
        assert_eq!(*seen.borrow(), vec![(RipplePhase::Triggered, 0)]);
        assert_eq!(effect.phase(), RipplePhase::Animating);
    }

    #[test]
    fn test_unknown_surface_returns_none() {
        let (mut scene, mut animator, surface) = setup(10.0, 10.0);
        scene.destroy(surface);
        let effect = RippleEffect::new(RippleConfig::default(), None);
        assert!(effect
            .trigger(&mut scene, &mut animator, surface, Point::ZERO, None)
            .is_none());
        assert_eq!(effect.phase(), RipplePhase::Idle);
    }
}
