//! Terminal emulator selection for the open-shell action.

use dockhand_common::constants::{FALLBACK_TERMINAL, SETTINGS_TOOL, TERMINAL_SETTINGS_SCHEMA};
use dockhand_common::types::CommandLine;

use crate::launcher::Launcher;
use crate::runner::CommandRunner;

/// Query for the desktop's default terminal emulator.
#[must_use]
pub fn settings_command() -> CommandLine {
    CommandLine::new(SETTINGS_TOOL).args(["get", TERMINAL_SETTINGS_SCHEMA, "exec"])
}

/// Extracts the terminal from a settings query, e.g. `'tilix'\n` → `tilix`.
#[must_use]
pub fn parse_settings_terminal(output: &str) -> Option<String> {
    let terminal = output.lines().next()?.replace('\'', "");
    let terminal = terminal.trim();
    (!terminal.is_empty()).then(|| terminal.to_owned())
}

/// Picks the terminal: the configured one, else the desktop default, else
/// [`FALLBACK_TERMINAL`].
pub fn resolve_terminal<L: Launcher>(configured: Option<&str>, runner: &CommandRunner<L>) -> String {
    if let Some(terminal) = configured {
        return terminal.to_owned();
    }
    let result = runner.run(&settings_command());
    let desktop = result
        .exit_succeeded
        .then(|| parse_settings_terminal(&result.stdout_text()))
        .flatten();
    if let Some(terminal) = desktop {
        tracing::debug!(terminal = %terminal, "using desktop default terminal");
        return terminal;
    }
    FALLBACK_TERMINAL.to_owned()
}
