//! Core types for the tips branch report.
//!
//! This crate holds the branch data model, the rule deciding which local
//! branches have no remote counterpart, and timestamp formatting. Nothing
//! here touches git or the terminal.

pub mod branch;
pub mod classify;
pub mod datefmt;
