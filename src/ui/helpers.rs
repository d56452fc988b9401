//! Color and cell-coverage helpers for painting scenes into a terminal
//! buffer.

use ratatui::style::Color;

use crate::theme::Rgba;

/// Opaque terminal color for `color`, ignoring alpha
pub fn to_color(color: Rgba) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Composite `color` (scaled by `opacity`) over whatever a cell shows now.
/// Non-RGB cell colors count as `backdrop`.
pub fn blend(current: Color, color: Rgba, opacity: f32, backdrop: Rgba) -> Color {
    let base = match current {
        Color::Rgb(r, g, b) => Rgba::rgb(r, g, b),
        _ => backdrop,
    };
    to_color(color.with_alpha(color.a * opacity).blend_over(base))
}

/// Inclusive range of cell indices whose centers fall in `start..end`
pub fn covered(start: f32, end: f32) -> Option<(i32, i32)> {
    if !(start.is_finite() && end.is_finite()) {
        return None;
    }
    let first = (start - 0.5).ceil() as i32;
    let last = (end - 0.5).ceil() as i32 - 1;
    (first <= last).then_some((first, last))
}
