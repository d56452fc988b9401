//! Material cards: a vertical stack of cells with dividers, a rounded
//! clipped content surface and a drop shadow.

mod cell;
mod container;

pub use cell::{Cell, CellId, DIVIDER_HEIGHT};
pub use container::{Card, SHADOW_ANIMATION_KEY};

use crate::config::CardMetrics;
use crate::models::Appearance;
use crate::text::TextMeasure;

/// What a cell may read from the card that hosts it
#[derive(Clone, Copy)]
pub struct CardContext<'a> {
    pub appearance: &'a Appearance,
    pub metrics: &'a CardMetrics,
    pub measure: &'a dyn TextMeasure,
    /// Card width; cells span it fully
    pub width: f32,
}
