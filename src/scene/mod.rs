//! Retained rendering surface tree.
//!
//! Surfaces are addressed by [`SurfaceId`] and own an ordered list of
//! children. Everything the card engine draws (cards, content surfaces,
//! cells, labels, dividers, ripple discs and overlays) is a surface here;
//! renderers walk the tree read-only.

mod animation;
mod layer;
mod stage;

use std::collections::HashMap;

use tracing::warn;

use crate::geometry::{Point, Rect};
use crate::ripple::TapBinding;
use crate::theme::Rgba;

pub use animation::{
    AnimationGroup, AnimationId, Animator, Completion, Property, PropertyAnimation, TimingFunction,
};
pub use layer::{Content, Label, Layer, Presentation, Shadow, SurfaceId};
pub use stage::Stage;

#[derive(Default)]
pub struct Scene {
    layers: HashMap<SurfaceId, Layer>,
    taps: HashMap<SurfaceId, TapBinding>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached surface
    pub fn create(&mut self, frame: Rect) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, Layer::new(frame));
        id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.layers.contains_key(&id)
    }

    pub fn layer(&self, id: SurfaceId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layer_mut(&mut self, id: SurfaceId) -> Option<&mut Layer> {
        let layer = self.layers.get_mut(&id);
        if layer.is_none() {
            warn!(surface = id.raw(), "ignoring update to unknown surface");
        }
        layer
    }

    pub fn parent(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.layers.get(&id).and_then(|layer| layer.parent)
    }

    pub fn children(&self, id: SurfaceId) -> &[SurfaceId] {
        self.layers
            .get(&id)
            .map(|layer| layer.children.as_slice())
            .unwrap_or(&[])
    }

    /// Surfaces without a parent, in creation order
    pub fn roots(&self) -> Vec<SurfaceId> {
        let mut roots: Vec<SurfaceId> = self
            .layers
            .iter()
            .filter(|(_, layer)| layer.parent.is_none())
            .map(|(id, _)| *id)
            .collect();
        roots.sort();
        roots
    }

    /// Append `child` on top of `parent`'s children
    pub fn add_child(&mut self, parent: SurfaceId, child: SurfaceId) {
        let index = self.children(parent).len();
        self.insert_child(parent, child, index);
    }

    /// Insert `child` at `index` (clamped) in `parent`'s children, detaching
    /// it from any previous parent first.
    pub fn insert_child(&mut self, parent: SurfaceId, child: SurfaceId, index: usize) {
        if !self.contains(parent) || !self.contains(child) {
            warn!(
                parent = parent.raw(),
                child = child.raw(),
                "ignoring insert of unknown surface"
            );
            return;
        }
        if parent == child || self.is_ancestor(child, parent) {
            warn!(
                parent = parent.raw(),
                child = child.raw(),
                "ignoring insert that would create a cycle"
            );
            return;
        }

        self.remove_from_parent(child);
        if let Some(layer) = self.layers.get_mut(&parent) {
            let index = index.min(layer.children.len());
            layer.children.insert(index, child);
        }
        if let Some(layer) = self.layers.get_mut(&child) {
            layer.parent = Some(parent);
        }
    }

    /// Detach a surface from its parent; the surface stays alive.
    pub fn remove_from_parent(&mut self, child: SurfaceId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(layer) = self.layers.get_mut(&parent) {
            layer.children.retain(|id| *id != child);
        }
        if let Some(layer) = self.layers.get_mut(&child) {
            layer.parent = None;
        }
    }

    /// Detach and drop a surface with its whole subtree and tap bindings.
    pub fn destroy(&mut self, id: SurfaceId) {
        self.remove_from_parent(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(layer) = self.layers.remove(&next) {
                pending.extend(layer.children);
            }
            self.taps.remove(&next);
        }
    }

    fn is_ancestor(&self, candidate: SurfaceId, of: SurfaceId) -> bool {
        let mut current = self.parent(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn frame(&self, id: SurfaceId) -> Rect {
        self.layers
            .get(&id)
            .map(|layer| layer.frame)
            .unwrap_or(Rect::ZERO)
    }

    pub fn set_frame(&mut self, id: SurfaceId, frame: Rect) {
        if let Some(layer) = self.layer_mut(id) {
            layer.frame = frame;
        }
    }

    pub fn set_origin_y(&mut self, id: SurfaceId, y: f32) {
        if let Some(layer) = self.layer_mut(id) {
            layer.frame.y = y;
        }
    }

    pub fn set_height(&mut self, id: SurfaceId, height: f32) {
        if let Some(layer) = self.layer_mut(id) {
            layer.frame.height = height;
        }
    }

    pub fn set_background(&mut self, id: SurfaceId, color: Option<Rgba>) {
        if let Some(layer) = self.layer_mut(id) {
            layer.background = color;
        }
    }

    /// Frame of a surface in root coordinates
    pub fn absolute_frame(&self, id: SurfaceId) -> Option<Rect> {
        let mut frame = self.layers.get(&id)?.frame;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            let origin = self.frame(parent);
            frame = frame.offset(origin.x, origin.y);
            current = self.parent(parent);
        }
        Some(frame)
    }

    /// Deepest interactive surface under `point` (root coordinates).
    ///
    /// Later siblings are on top. Surfaces whose model opacity is zero
    /// (ripple discs and overlays between runs) never receive taps.
    pub fn hit_test(&self, point: Point) -> Option<SurfaceId> {
        self.roots()
            .into_iter()
            .rev()
            .find_map(|root| self.hit_test_in(root, point))
    }

    fn hit_test_in(&self, id: SurfaceId, point: Point) -> Option<SurfaceId> {
        let layer = self.layers.get(&id)?;
        if layer.opacity <= 0.0 || !layer.frame.contains(point) {
            return None;
        }
        let local = point.offset(-layer.frame.x, -layer.frame.y);
        layer
            .children
            .iter()
            .rev()
            .find_map(|child| self.hit_test_in(*child, local))
            .or(Some(id))
    }

    pub fn bind_tap(&mut self, id: SurfaceId, binding: TapBinding) {
        if !self.contains(id) {
            warn!(surface = id.raw(), "ignoring tap binding on unknown surface");
            return;
        }
        self.taps.insert(id, binding);
    }

    pub fn tap_binding(&self, id: SurfaceId) -> Option<&TapBinding> {
        self.taps.get(&id)
    }
}
