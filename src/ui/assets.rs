//! Embedded static assets for single-binary distribution.
//!
//! The stylesheets are compiled into the binary and served from fixed paths;
//! only the wasm client bundle and stored images live on disk.

/// Site styles on top of Pico CSS.
pub const WALL_CSS: &str = include_str!("../../static/wall.css");

/// The dark theme. Applied page-wide while the dark mode toggle keeps this
/// sheet attached to the document head.
pub const DARKMODE_CSS: &str = include_str!("../../static/darkmode.css");
