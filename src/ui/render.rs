//! Scene rendering: paints a surface tree into a ratatui buffer, one point
//! per terminal cell.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

use super::helpers::{blend, covered};
use crate::geometry::{Point, Rect as Bounds};
use crate::models::TextAlignment;
use crate::scene::{Content, Label, Scene, Shadow, SurfaceId};
use crate::text::layout_lines;
use crate::theme::Rgba;

/// Fraction of the shadow radius the shadow spreads past the frame
const SHADOW_SPREAD: f32 = 0.5;

/// Paints every root surface of a scene, honoring presentation values.
pub struct SceneWidget<'a> {
    scene: &'a Scene,
    backdrop: Rgba,
}

impl<'a> SceneWidget<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            backdrop: Rgba::gray(255),
        }
    }

    /// Color assumed under cells that have no RGB background yet
    pub fn backdrop(mut self, color: Rgba) -> Self {
        self.backdrop = color;
        self
    }

    fn paint(
        &self,
        buf: &mut Buffer,
        id: SurfaceId,
        origin: Point,
        clip: Bounds,
        inherited_opacity: f32,
    ) {
        let Some(layer) = self.scene.layer(id) else {
            return;
        };
        let opacity = inherited_opacity * layer.effective_opacity();
        if opacity <= 0.0 {
            return;
        }
        let frame = layer.presented_frame().offset(origin.x, origin.y);

        if let Some(shadow) = layer.effective_shadow() {
            self.paint_shadow(buf, frame, &shadow, clip, opacity);
        }
        if let Some(background) = layer.background {
            match layer.content {
                Content::Disc => self.fill_disc(buf, frame, clip, background, opacity),
                _ => self.fill(buf, frame, clip, layer.corner_radius, background, opacity),
            }
        }
        if let Content::Label(label) = &layer.content {
            self.draw_label(buf, frame, clip, label, opacity);
        }

        let child_clip = if layer.clips {
            match clip.intersection(&frame) {
                Some(clip) => clip,
                None => return,
            }
        } else {
            clip
        };
        for child in layer.children() {
            self.paint(buf, *child, frame.origin(), child_clip, opacity);
        }
    }

    /// Visit every buffer cell whose center lies in both `rect` and `clip`
    fn each_cell(
        buf: &Buffer,
        rect: Bounds,
        clip: Bounds,
        mut visit: impl FnMut(u16, u16, Point),
    ) {
        let Some(area) = rect.intersection(&clip) else {
            return;
        };
        let (Some((x0, x1)), Some((y0, y1))) = (
            covered(area.x, area.max_x()),
            covered(area.y, area.max_y()),
        ) else {
            return;
        };
        let bounds = buf.area;
        for y in y0.max(bounds.top() as i32)..=y1.min(bounds.bottom() as i32 - 1) {
            for x in x0.max(bounds.left() as i32)..=x1.min(bounds.right() as i32 - 1) {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                visit(x as u16, y as u16, center);
            }
        }
    }

    fn fill(
        &self,
        buf: &mut Buffer,
        rect: Bounds,
        clip: Bounds,
        radius: f32,
        color: Rgba,
        opacity: f32,
    ) {
        let corners = rounded_corners(rect, radius);
        let backdrop = self.backdrop;
        let mut cells = Vec::new();
        Self::each_cell(buf, rect, clip, |x, y, _| cells.push((x, y)));
        for (x, y) in cells {
            if is_corner(corners, x, y) {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.bg = blend(cell.bg, color, opacity, backdrop);
            }
        }
    }

    fn fill_disc(&self, buf: &mut Buffer, rect: Bounds, clip: Bounds, color: Rgba, opacity: f32) {
        let center = rect.center();
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let backdrop = self.backdrop;
        let mut cells = Vec::new();
        Self::each_cell(buf, rect, clip, |x, y, point| {
            let dx = (point.x - center.x) / rx;
            let dy = (point.y - center.y) / ry;
            if dx * dx + dy * dy <= 1.0 {
                cells.push((x, y));
            }
        });
        for (x, y) in cells {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.bg = blend(cell.bg, color, opacity, backdrop);
            }
        }
    }

    /// Shade the cells just outside `frame` that the offset, spread shadow
    /// covers.
    fn paint_shadow(
        &self,
        buf: &mut Buffer,
        frame: Bounds,
        shadow: &Shadow,
        clip: Bounds,
        opacity: f32,
    ) {
        let spread = shadow.radius.max(0.0) * SHADOW_SPREAD;
        let rect = Bounds::new(
            frame.x + shadow.offset.x - spread,
            frame.y + shadow.offset.y - spread,
            frame.width + spread * 2.0,
            frame.height + spread * 2.0,
        );
        let corners = rounded_corners(rect, shadow.path_corner_radius.unwrap_or(0.0));
        let backdrop = self.backdrop;
        let strength = shadow.opacity * opacity;
        let mut cells = Vec::new();
        Self::each_cell(buf, rect, clip, |x, y, point| {
            if !frame.contains(point) {
                cells.push((x, y));
            }
        });
        for (x, y) in cells {
            if is_corner(corners, x, y) {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.bg = blend(cell.bg, shadow.color, strength, backdrop);
            }
        }
    }

    fn draw_label(
        &self,
        buf: &mut Buffer,
        frame: Bounds,
        clip: Bounds,
        label: &Label,
        opacity: f32,
    ) {
        let Some(clip) = clip.intersection(&frame) else {
            return;
        };
        let columns = frame.width.max(0.0).floor() as usize;
        if columns == 0 {
            return;
        }
        let backdrop = self.backdrop;
        let top = frame.y + label.padding;
        for (row, line) in layout_lines(&label.text, columns).iter().enumerate() {
            let indent = match label.alignment {
                TextAlignment::Left => 0,
                TextAlignment::Center => columns.saturating_sub(line.columns) / 2,
            };
            let y = top + row as f32;
            let mut x = frame.x + indent as f32;
            // Cell of the last drawn character, for combining marks
            let mut last: Option<(u16, u16)> = None;
            for fragment in &line.fragments {
                let Some(run) = label.text.runs.get(fragment.run) else {
                    continue;
                };
                for ch in fragment.text.chars() {
                    let width = ch.width().unwrap_or(0);
                    if width == 0 {
                        if let Some(cell) = last.and_then(|pos| buf.cell_mut(pos)) {
                            let mut symbol = cell.symbol().to_string();
                            symbol.push(ch);
                            cell.set_symbol(&symbol);
                        }
                        continue;
                    }
                    let left = x.floor();
                    x += width as f32;
                    let first = Point::new(left + 0.5, y.floor() + 0.5);
                    let end = Point::new(left + width as f32 - 0.5, first.y);
                    last = None;
                    // Wide characters are drawn whole or not at all
                    let visible = clip.contains(first) && clip.contains(end);
                    if !visible || first.x < 0.0 || first.y < 0.0 {
                        continue;
                    }
                    let pos = (first.x as u16, first.y as u16);
                    let Some(cell) = buf.cell_mut(pos) else {
                        continue;
                    };
                    cell.set_char(ch);
                    cell.fg = blend(cell.bg, run.color, opacity, backdrop);
                    if run.font.is_bold() {
                        cell.modifier.insert(Modifier::BOLD);
                    }
                    if run.underline.is_some() {
                        cell.modifier.insert(Modifier::UNDERLINED);
                    }
                    last = Some(pos);
                    // Columns hidden behind a wide character keep their background
                    for column in 1..width as u16 {
                        if let Some(hidden) = buf.cell_mut((pos.0 + column, pos.1)) {
                            hidden.set_char(' ');
                        }
                    }
                }
            }
        }
    }
}

/// Corner cell columns and rows left unpainted for a rounded rect. Only
/// radii of at least one cell round anything.
fn is_corner(corners: Option<([i32; 2], [i32; 2])>, x: u16, y: u16) -> bool {
    corners.is_some_and(|(xs, ys)| xs.contains(&(x as i32)) && ys.contains(&(y as i32)))
}

fn rounded_corners(rect: Bounds, radius: f32) -> Option<([i32; 2], [i32; 2])> {
    if radius < 1.0 {
        return None;
    }
    let (x0, x1) = covered(rect.x, rect.max_x())?;
    let (y0, y1) = covered(rect.y, rect.max_y())?;
    Some(([x0, x1], [y0, y1]))
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let clip = Bounds::new(
            area.x as f32,
            area.y as f32,
            area.width as f32,
            area.height as f32,
        );
        let origin = clip.origin();
        for root in self.scene.roots() {
            self.paint(buf, root, origin, clip, 1.0);
        }
    }
}
