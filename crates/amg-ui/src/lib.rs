//! Terminal UI helpers for amg.
//!
//! Provides terminal and color detection, and the rendering of the
//! one-line repository summaries.

pub mod styles;
pub mod terminal;
