//! # dockhand-runtime
//!
//! Controller for a container runtime driven through its command line.
//!
//! - [`probe`]: is the runtime installed, is its daemon alive.
//! - [`lister`]: container listing and parsing.
//! - [`lifecycle`]: start/stop/restart/pause/unpause/remove/open-shell.
//! - [`daemon`]: service-manager status and elevated start/stop.
//! - [`runner`]: the command runner whose completion callbacks always run
//!   on the caller's thread.
//! - [`engine`]: one handle over all of the above.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod daemon;
pub mod engine;
pub mod launcher;
pub mod lifecycle;
pub mod lister;
pub mod probe;
pub mod runner;
pub mod terminal;

#[cfg(test)]
mod testing;
