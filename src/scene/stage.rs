//! Host-side glue: owns the scene and animator and turns taps and clock
//! ticks into ripple runs and animation frames.

use std::time::Duration;

use tracing::trace;

use super::{Animator, Scene, SurfaceId};
use crate::geometry::Point;

/// Single-threaded driver for a scene.
///
/// All mutations and completions happen on the thread calling
/// [`Stage::tap`] and [`Stage::tick`].
#[derive(Default)]
pub struct Stage {
    pub scene: Scene,
    pub animator: Animator,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a single tap at `point` (root coordinates).
    ///
    /// The tap goes to the deepest surface under the point that has a tap
    /// binding, or the nearest ancestor that does. Returns the surface that
    /// handled it.
    pub fn tap(&mut self, point: Point) -> Option<SurfaceId> {
        let hit = self.scene.hit_test(point)?;
        let mut current = Some(hit);
        while let Some(surface) = current {
            if let Some(binding) = self.scene.tap_binding(surface).cloned() {
                let origin = self.scene.absolute_frame(surface)?.origin();
                let local = point.offset(-origin.x, -origin.y);
                binding.effect.trigger(
                    &mut self.scene,
                    &mut self.animator,
                    surface,
                    local,
                    binding.hook.as_ref(),
                );
                return Some(surface);
            }
            current = self.scene.parent(surface);
        }
        trace!(x = point.x, y = point.y, "tap without binding");
        None
    }

    /// Advance animations by `dt`; returns how many finished.
    pub fn tick(&mut self, dt: Duration) -> usize {
        self.animator.tick(&mut self.scene, dt)
    }

    pub fn is_animating(&self) -> bool {
        !self.animator.is_idle()
    }
}
