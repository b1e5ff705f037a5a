//! Formatted output helpers for CLI commands.
//!
//! Provides the container table, action hints, and the serializable view
//! used for `--json`.

use std::fmt::Write;

use dockhand_common::types::{ContainerRecord, ContainerState, LifecycleAction};
use serde::Serialize;

const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// One container as printed by `ps --json`.
#[derive(Debug, Serialize)]
pub struct ContainerView<'a> {
    /// Container name.
    pub name: &'a str,
    /// Raw status text from the runtime.
    pub status: &'a str,
    /// Coarse state derived from the status.
    pub state: ContainerState,
    /// Actions that make sense in this state.
    pub actions: &'static [LifecycleAction],
}

impl<'a> From<&'a ContainerRecord> for ContainerView<'a> {
    fn from(record: &'a ContainerRecord) -> Self {
        Self {
            name: &record.name,
            status: &record.status,
            state: record.state(),
            actions: record.available_actions(),
        }
    }
}

/// Joins action labels for display, e.g. `Stop, Restart, Pause`.
#[must_use]
pub fn action_hint(actions: &[LifecycleAction]) -> String {
    actions
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Colored bullet for a container state.
#[must_use]
pub const fn state_marker(state: ContainerState) -> &'static str {
    match state {
        ContainerState::Running => "\x1b[32m●\x1b[0m",
        ContainerState::Paused | ContainerState::Restarting => "\x1b[33m●\x1b[0m",
        _ => "\x1b[2m○\x1b[0m",
    }
}

/// Renders containers as an aligned table with a header row.
///
/// Column widths follow the longest name and status, so the output stays
/// aligned regardless of what the runtime reports.
#[must_use]
pub fn container_table(records: &[ContainerRecord]) -> String {
    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let status_width = records
        .iter()
        .map(|r| r.status.chars().count())
        .max()
        .unwrap_or(0)
        .max("STATUS".len());

    let mut out = format!(
        "  {:<name_width$}  {:<status_width$}  ACTIONS\n",
        "NAME", "STATUS"
    );
    for record in records {
        let _ = writeln!(
            out,
            "{} {:<name_width$}  {:<status_width$}  {}",
            state_marker(record.state()),
            record.name,
            record.status,
            action_hint(record.available_actions()),
        );
    }
    out
}

/// One-line report for a finished lifecycle action.
#[must_use]
pub fn action_report(action: LifecycleAction, container: &str, success: bool, detail: &str) -> String {
    if success {
        format!("  {GREEN}✓{RESET} {BOLD}{container}{RESET} {DIM}{}{RESET}", action.label())
    } else if detail.is_empty() {
        format!("  {YELLOW}✗{RESET} {BOLD}{container}{RESET} {} failed", action.label())
    } else {
        format!(
            "  {YELLOW}✗{RESET} {BOLD}{container}{RESET} {} failed: {detail}",
            action.label()
        )
    }
}
