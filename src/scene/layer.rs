//! Layer data: everything a surface knows about how it looks.

use crate::geometry::{Point, Rect};
use crate::models::TextAlignment;
use crate::text::AttributedText;
use crate::theme::Rgba;

/// Identifier of a surface in a [`Scene`](super::Scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub(super) u32);

impl SurfaceId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Drop shadow parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset: Point,
    pub radius: f32,
    pub color: Rgba,
    pub opacity: f32,
    /// Rounded-rect shadow path, when the shadow follows a corner radius
    pub path_corner_radius: Option<f32>,
}

/// A text block drawn inside a layer
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: AttributedText,
    pub alignment: TextAlignment,
    /// Vertical inset above and below the text
    pub padding: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    None,
    Label(Label),
    /// A filled ellipse covering the frame (ripple shapes)
    Disc,
}

/// Values written by running animations on top of the model values.
///
/// Cleared as soon as the animation that set them is removed, at which
/// point the layer shows its model values again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Presentation {
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    pub shadow_radius: Option<f32>,
    pub shadow_offset_y: Option<f32>,
}

impl Presentation {
    pub fn is_empty(&self) -> bool {
        *self == Presentation::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Position and size in the parent's coordinates
    pub frame: Rect,
    pub background: Option<Rgba>,
    pub corner_radius: f32,
    /// Children are clipped to this layer's bounds
    pub clips: bool,
    pub opacity: f32,
    /// Uniform scale about the frame center
    pub scale: f32,
    pub shadow: Option<Shadow>,
    pub content: Content,
    pub presentation: Presentation,
    pub(super) parent: Option<SurfaceId>,
    pub(super) children: Vec<SurfaceId>,
}

impl Layer {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            background: None,
            corner_radius: 0.0,
            clips: false,
            opacity: 1.0,
            scale: 1.0,
            shadow: None,
            content: Content::None,
            presentation: Presentation::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<SurfaceId> {
        self.parent
    }

    pub fn children(&self) -> &[SurfaceId] {
        &self.children
    }

    pub fn effective_opacity(&self) -> f32 {
        self.presentation.opacity.unwrap_or(self.opacity)
    }

    pub fn effective_scale(&self) -> f32 {
        self.presentation.scale.unwrap_or(self.scale)
    }

    /// Shadow with any animated radius/offset applied
    pub fn effective_shadow(&self) -> Option<Shadow> {
        let mut shadow = self.shadow?;
        if let Some(radius) = self.presentation.shadow_radius {
            shadow.radius = radius;
        }
        if let Some(offset_y) = self.presentation.shadow_offset_y {
            shadow.offset.y = offset_y;
        }
        Some(shadow)
    }

    /// Frame grown or shrunk by the effective scale around its center
    pub fn presented_frame(&self) -> Rect {
        let scale = self.effective_scale();
        if scale == 1.0 {
            return self.frame;
        }
        let center = self.frame.center();
        let width = self.frame.width * scale;
        let height = self.frame.height * scale;
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}
