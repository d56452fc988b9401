//! Material style cards for retained surface trees.
//!
//! A [`Card`] stacks [`Cell`]s (headers, body rows, footers) into a rounded,
//! shadowed surface; tappable rows and cards answer with a [`RippleEffect`].
//! Everything lives in a [`Scene`] driven by a [`Stage`], and the `ui`
//! module paints scenes into a ratatui buffer.

pub mod app;
pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod ripple;
pub mod scene;
pub mod text;
pub mod theme;
pub mod ui;

pub use card::{Card, CardContext, Cell, CellId};
pub use config::{CardMetrics, Config};
pub use error::ConfigError;
pub use models::Appearance;
pub use ripple::{RippleConfig, RippleEffect};
pub use scene::{Scene, Stage};
