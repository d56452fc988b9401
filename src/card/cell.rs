//! A single stacked row of a card.

use tracing::{debug, warn};

use super::CardContext;
use crate::geometry::Rect;
use crate::models::{CellKind, TextAlignment};
use crate::scene::{Content, Label, Scene, SurfaceId};
use crate::text::AttributedText;
use crate::theme::Rgba;

/// Height of the divider strip at the bottom of interior cells
pub const DIVIDER_HEIGHT: f32 = 1.0;

/// Stable identity of a cell (its surface)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(SurfaceId);

/// One row of a card.
///
/// Content stacks downward: every added label or view is placed at the
/// current height and grows the cell by its own height. A cell reads card
/// state only through the [`CardContext`] handed to each call.
#[derive(Debug)]
pub struct Cell {
    surface: SurfaceId,
    kind: CellKind,
    height: f32,
    offset: f32,
    background: Rgba,
    divider: Option<SurfaceId>,
    content: Vec<SurfaceId>,
}

impl Cell {
    /// Empty, zero-height cell as wide as the card, styled for `kind`
    pub fn new(scene: &mut Scene, ctx: &CardContext<'_>, kind: CellKind) -> Self {
        let surface = scene.create(Rect::new(0.0, 0.0, ctx.width, 0.0));
        let background = match kind {
            CellKind::Header | CellKind::Footer => ctx.appearance.header_background,
            CellKind::Body => ctx.appearance.cell_background,
        };
        scene.set_background(surface, Some(background));
        Self {
            surface,
            kind,
            height: 0.0,
            offset: 0.0,
            background,
            divider: None,
            content: Vec::new(),
        }
    }

    pub fn id(&self) -> CellId {
        CellId(self.surface)
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Vertical position inside the card
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn has_bottom_divider(&self) -> bool {
        self.divider.is_some()
    }

    pub fn divider(&self) -> Option<SurfaceId> {
        self.divider
    }

    /// Stacked labels and views, top to bottom
    pub fn content(&self) -> &[SurfaceId] {
        &self.content
    }

    /// Title line in the appearance's title font and color
    pub fn add_title(&mut self, scene: &mut Scene, ctx: &CardContext<'_>, title: &str) {
        let appearance = ctx.appearance;
        let text = AttributedText::plain(title, &appearance.title_font, appearance.title_color);
        self.add_attributed(scene, ctx, text, TextAlignment::Left);
    }

    /// Body text in the appearance's text font and color
    pub fn add_text(&mut self, scene: &mut Scene, ctx: &CardContext<'_>, text: &str) {
        let appearance = ctx.appearance;
        let text = AttributedText::plain(text, &appearance.text_font, appearance.text_color);
        self.add_attributed(scene, ctx, text, TextAlignment::Left);
    }

    /// Label spanning the cell's width minus padding, tall enough for its
    /// wrapped text plus vertical padding.
    pub fn add_attributed(
        &mut self,
        scene: &mut Scene,
        ctx: &CardContext<'_>,
        text: AttributedText,
        alignment: TextAlignment,
    ) {
        let padding = ctx.metrics.item_padding;
        let padding_vertical = ctx.metrics.item_padding_vertical;
        let width = (ctx.width - padding * 2.0).max(0.0);
        let height = ctx.measure.height_for_width(&text, width) + padding_vertical * 2.0;

        let label = scene.create(Rect::new(padding, self.height, width, height));
        if let Some(layer) = scene.layer_mut(label) {
            layer.content = Content::Label(Label {
                text,
                alignment,
                padding: padding_vertical,
            });
        }
        self.add_view(scene, label);
    }

    /// Stack an arbitrary surface below the current content
    pub fn add_view(&mut self, scene: &mut Scene, view: SurfaceId) {
        let Some(view_height) = scene.layer(view).map(|layer| layer.frame.height) else {
            warn!(view = view.raw(), "ignoring unknown view added to cell");
            return;
        };
        scene.set_origin_y(view, self.height);
        scene.add_child(self.surface, view);
        self.content.push(view);
        self.set_height(scene, self.height + view_height.max(0.0));
    }

    /// Grow the cell to at least `min` points
    pub fn clamp_height(&mut self, scene: &mut Scene, min: f32) {
        if self.height < min {
            self.set_height(scene, min);
        }
    }

    /// 1-point strip across the bottom edge, never taller than the cell;
    /// no-op when already drawn
    pub fn draw_bottom_divider(&mut self, scene: &mut Scene, ctx: &CardContext<'_>) {
        if self.divider.is_some() {
            return;
        }
        let divider = scene.create(self.divider_frame(scene));
        scene.set_background(divider, Some(ctx.appearance.border_color));
        scene.add_child(self.surface, divider);
        self.divider = Some(divider);
    }

    /// No-op when there is no divider
    pub fn remove_bottom_divider(&mut self, scene: &mut Scene) {
        if let Some(divider) = self.divider.take() {
            scene.destroy(divider);
        }
    }

    /// Draw the divider if missing, otherwise move it to the current bottom
    pub(crate) fn ensure_bottom_divider(&mut self, scene: &mut Scene, ctx: &CardContext<'_>) {
        match self.divider {
            Some(divider) => {
                let frame = self.divider_frame(scene);
                scene.set_frame(divider, frame);
            }
            None => self.draw_bottom_divider(scene, ctx),
        }
    }

    pub(crate) fn restyle(&mut self, scene: &mut Scene, kind: CellKind, background: Rgba) {
        self.kind = kind;
        self.background = background;
        scene.set_background(self.surface, Some(background));
    }

    pub(crate) fn set_offset(&mut self, scene: &mut Scene, offset: f32) {
        self.offset = offset;
        scene.set_origin_y(self.surface, offset);
    }

    fn set_height(&mut self, scene: &mut Scene, height: f32) {
        debug!(cell = self.surface.raw(), from = self.height, to = height, "cell height");
        self.height = height;
        scene.set_height(self.surface, height);
    }

    /// Clamped to the cell so short cells never draw over their neighbor
    fn divider_frame(&self, scene: &Scene) -> Rect {
        let width = scene.frame(self.surface).width;
        let height = DIVIDER_HEIGHT.min(self.height.max(0.0));
        Rect::new(0.0, self.height.max(0.0) - height, width, height)
    }
}
