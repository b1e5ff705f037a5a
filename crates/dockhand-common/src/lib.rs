//! # dockhand-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the dockhand workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the data model that the runtime controller
//! and its front ends exchange.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
