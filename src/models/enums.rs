//! Enums used throughout material-card
//!
//! This module contains the small enum types shared by cells, labels and
//! ripples.

use serde::{Deserialize, Serialize};

/// Where a ripple is centered when triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RippleLocation {
    Center,
    #[default]
    TouchLocation,
}

/// Role of a cell within its card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Header, // Inserted at the top, header background
    Body,   // Appended, cell background
    Footer, // Appended, header background
}

impl CellKind {
    pub fn label(&self) -> &'static str {
        match self {
            CellKind::Header => "header",
            CellKind::Body => "body",
            CellKind::Footer => "footer",
        }
    }
}

/// Horizontal alignment of label text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
}

/// Lifecycle of a ripple effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RipplePhase {
    #[default]
    Idle,      // Nothing in flight
    Triggered, // Tap received, layers positioned, animations not yet scheduled
    Animating, // At least one run is playing
}
