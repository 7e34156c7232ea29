//! Configuration management for the tips branch report.
//!
//! Handles locating and loading the optional `.tips.yaml` file and
//! provides typed access to its settings.

pub mod config;
