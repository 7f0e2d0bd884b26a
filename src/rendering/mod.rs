//! # Rendering Module
//!
//! Presentation adapters: a plain-text renderer for snapshots and the capped
//! message log. Nothing in here feeds back into game logic.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
