//! Data models for material-card
//!
//! This module contains the plain data the card engine is configured with:
//! - Appearance, the shared style bundle
//! - Enums for cell roles, ripple placement and lifecycle

pub mod appearance;
pub mod enums;

// Re-exports for convenient access
pub use appearance::{Appearance, RIPPLE_DURATION};
pub use enums::{CellKind, RippleLocation, RipplePhase, TextAlignment};
