//! Terminal output support for the tips branch report.
//!
//! Provides Ayu-themed styling behind the [`styles::Styler`] trait,
//! terminal detection, and the piece-aware line wrapper that lays styled
//! tokens out within the terminal width.

pub mod styles;
pub mod terminal;
pub mod wrap;
