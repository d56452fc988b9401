//! Card appearance: the immutable style bundle shared by a card and its
//! cells.

use std::time::Duration;

use crate::theme::{self, Font, Rgba};

/// Default ripple duration
pub const RIPPLE_DURATION: Duration = Duration::from_millis(900);

/// Visual parameters consumed by cards, cells and ripples.
///
/// Built once per card (explicitly or from [`Appearance::default`]) and then
/// shared read-only through an `Rc`; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub header_background: Rgba,
    pub cell_background: Rgba,
    pub border_color: Rgba,
    pub title_font: Font,
    pub title_color: Rgba,
    pub text_font: Font,
    pub text_color: Rgba,
    pub shadow_color: Rgba,
    pub ripple_color: Rgba,
    /// Always positive
    pub ripple_duration: Duration,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            header_background: theme::CARD_HEADER,
            cell_background: theme::CARD_CELL,
            border_color: theme::CARD_BORDER,
            title_font: theme::title_font(),
            title_color: theme::TITLE,
            text_font: theme::text_font(),
            text_color: theme::TEXT,
            shadow_color: theme::SHADOW,
            ripple_color: theme::RIPPLE,
            ripple_duration: RIPPLE_DURATION,
        }
    }
}
