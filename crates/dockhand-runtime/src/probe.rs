//! Runtime availability probes.
//!
//! Probes answer go/no-go questions and never fail: a probe that cannot
//! run reports the runtime as unavailable.

use dockhand_common::config::DockhandConfig;
use dockhand_common::constants::PROCESS_TABLE;
use dockhand_common::types::CommandLine;

use crate::launcher::Launcher;
use crate::runner::CommandRunner;

/// Detects whether the runtime is installed and its daemon is alive.
#[derive(Debug, Clone)]
pub struct RuntimeProbe {
    runtime: String,
    daemon_process: String,
}

impl RuntimeProbe {
    /// Creates a probe for the configured runtime and daemon.
    #[must_use]
    pub fn from_config(config: &DockhandConfig) -> Self {
        Self {
            runtime: config.runtime.clone(),
            daemon_process: config.daemon_process.clone(),
        }
    }

    /// Returns whether the runtime binary resolves on the search path.
    ///
    /// Callers should skip every other operation when this is false.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        let found = which::which(&self.runtime);
        tracing::debug!(runtime = %self.runtime, found = found.is_ok(), "runtime lookup");
        found.is_ok()
    }

    /// The process table listing used by [`Self::is_running`].
    #[must_use]
    pub fn process_table_command() -> CommandLine {
        CommandLine::new(PROCESS_TABLE[0]).arg(PROCESS_TABLE[1])
    }

    /// Scans the process table for the daemon.
    ///
    /// Stops reading at the first line containing the daemon's process
    /// name; a listing that cannot be spawned counts as "not running".
    pub fn is_running<L: Launcher>(&self, runner: &CommandRunner<L>) -> bool {
        let command = Self::process_table_command();
        match runner.stream(&command) {
            Ok(lines) => {
                let running = table_mentions(lines, &self.daemon_process);
                tracing::debug!(daemon = %self.daemon_process, running, "process table scanned");
                running
            }
            Err(e) => {
                tracing::debug!(command = %command, error = %e, "process table unavailable");
                false
            }
        }
    }
}

/// Returns whether any line contains `process_name` as a substring.
///
/// `docker` therefore also matches `dockerd` and `docker-proxy`.
pub fn table_mentions<I>(lines: I, process_name: &str) -> bool
where
    I: IntoIterator<Item = String>,
{
    lines.into_iter().any(|line| line.contains(process_name))
}
