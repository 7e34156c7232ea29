//! Git integration for the tips branch report.
//!
//! This crate wraps `git` subprocess invocation, detects work trees, and
//! exposes the [`adapter::VcsAdapter`] trait the report is written against
//! together with its real implementation, [`adapter::GitCli`].

pub mod adapter;
pub mod commands;
pub mod gitdir;
