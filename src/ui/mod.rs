//! Terminal rendering for card scenes.
//!
//! [`SceneWidget`] paints a scene one point per cell; the status bar shows
//! key hints and the latest tap actions of the demo.

mod helpers;
mod render;
mod status;

pub use helpers::{blend, to_color};
pub use render::SceneWidget;
pub use status::{render_status_bar, KEY_HINTS};
