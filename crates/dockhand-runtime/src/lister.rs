//! Container listing.
//!
//! The runtime prints one `name,status` line per container. Listing is
//! all-or-nothing at the command level, but a single malformed line is
//! skipped rather than failing the whole snapshot.

use dockhand_common::config::DockhandConfig;
use dockhand_common::constants::{LISTING_DELIMITER, LISTING_FORMAT};
use dockhand_common::error::{DockhandError, Result};
use dockhand_common::types::{CommandLine, ContainerRecord};
use thiserror::Error;

use crate::launcher::Launcher;
use crate::runner::CommandRunner;

/// Why a listing line could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLine {
    /// The line has no field delimiter.
    #[error("missing `,` delimiter")]
    MissingDelimiter,
    /// The name field is empty.
    #[error("empty container name")]
    EmptyName,
}

/// Lists containers through the runtime CLI.
#[derive(Debug, Clone)]
pub struct ContainerLister {
    runtime: String,
}

impl ContainerLister {
    /// Creates a lister for the configured runtime.
    #[must_use]
    pub fn from_config(config: &DockhandConfig) -> Self {
        Self {
            runtime: config.runtime.clone(),
        }
    }

    /// The listing command: every container, in the delimited format.
    #[must_use]
    pub fn command(&self) -> CommandLine {
        CommandLine::new(&self.runtime).args(["ps", "-a", "--format", LISTING_FORMAT])
    }

    /// Returns a fresh snapshot of all containers in the runtime's order.
    ///
    /// # Errors
    ///
    /// Returns [`DockhandError::Listing`] if the command cannot be spawned
    /// or exits with a failure status. No partial results are returned.
    pub fn list<L: Launcher>(&self, runner: &CommandRunner<L>) -> Result<Vec<ContainerRecord>> {
        let output = runner
            .run(&self.command())
            .into_success()
            .map_err(DockhandError::listing)?;
        let records = parse_listing(&output.stdout_text());
        tracing::debug!(count = records.len(), "containers listed");
        Ok(records)
    }
}

/// Parses the full listing output, skipping blank and malformed lines.
#[must_use]
pub fn parse_listing(output: &str) -> Vec<ContainerRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_line(line) {
            Ok(record) => Some(record),
            Err(reason) => {
                tracing::warn!(line, %reason, "skipping malformed listing line");
                None
            }
        })
        .collect()
}

/// Splits one line at the first delimiter into name and status.
///
/// # Errors
///
/// Returns [`MalformedLine`] when the delimiter is missing or the name
/// is empty.
pub fn parse_line(line: &str) -> std::result::Result<ContainerRecord, MalformedLine> {
    let (name, status) = line
        .split_once(LISTING_DELIMITER)
        .ok_or(MalformedLine::MissingDelimiter)?;
    if name.is_empty() {
        return Err(MalformedLine::EmptyName);
    }
    Ok(ContainerRecord::new(name, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedLauncher;

    const LS: &str = "docker ps -a --format {{.Names}},{{.Status}}";

    fn lister() -> ContainerLister {
        ContainerLister::from_config(&DockhandConfig::default())
    }

    fn runner(success: bool, stdout: &str) -> CommandRunner<ScriptedLauncher> {
        let launcher = ScriptedLauncher::new();
        launcher.respond_with_stderr(LS, success, stdout, "daemon not running");
        CommandRunner::with_launcher(launcher).expect("runner")
    }

    #[test]
    fn command_uses_delimited_format() {
        assert_eq!(lister().command().to_string(), LS);
    }

    #[test]
    fn well_formed_lines_become_records() {
        let runner = runner(true, "web1,Up 3 hours\ndb,Exited (0) 2 days ago\n");
        let records = lister().list(&runner).expect("list");
        assert_eq!(
            records,
            [
                ContainerRecord::new("web1", "Up 3 hours"),
                ContainerRecord::new("db", "Exited (0) 2 days ago"),
            ]
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        let runner = runner(true, "\nweb1,Up 1 second\n\n   \ncache,Created\n\n");
        let records = lister().list(&runner).expect("list");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "cache");
    }

    #[test]
    fn empty_output_is_empty_listing() {
        let runner = runner(true, "");
        assert!(lister().list(&runner).expect("list").is_empty());
    }

    #[test]
    fn non_zero_exit_fails_even_with_stdout() {
        let runner = runner(false, "web1,Up 3 hours\n");
        let err = lister().list(&runner).expect_err("must fail");
        assert!(matches!(err, DockhandError::Listing { .. }));
        assert!(err.to_string().contains("failed to list containers"));
    }

    #[test]
    fn spawn_failure_fails_listing() {
        let launcher = ScriptedLauncher::new();
        launcher.fail_spawn(LS);
        let runner = CommandRunner::with_launcher(launcher).expect("runner");
        assert!(matches!(
            lister().list(&runner),
            Err(DockhandError::Listing { .. })
        ));
    }

    #[test]
    fn status_keeps_text_after_first_delimiter() {
        let record = parse_line("api,Up 2 hours (healthy), restarting soon").expect("parse");
        assert_eq!(record.name, "api");
        assert_eq!(record.status, "Up 2 hours (healthy), restarting soon");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let records = parse_listing("web1,Up 3 hours\ngarbage\n,Exited (1) now\ndb,Created\n");
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["web1", "db"]);
    }

    #[test]
    fn line_errors_are_specific() {
        assert_eq!(parse_line("nodelimiter"), Err(MalformedLine::MissingDelimiter));
        assert_eq!(parse_line(",Up"), Err(MalformedLine::EmptyName));
    }

    #[test]
    fn crlf_output_is_accepted() {
        let records = parse_listing("web1,Up 3 hours\r\ndb,Created\r\n");
        assert_eq!(records[0].status, "Up 3 hours");
        assert_eq!(records[1].status, "Created");
    }
}
