//! Daemon service control through the service manager.
//!
//! Start and stop go through a privilege elevation wrapper, which may
//! prompt the user. The completion of a toggle only says whether the
//! wrapped command succeeded; callers re-query the status to learn the
//! daemon's new state.

use std::rc::Rc;

use dockhand_common::config::DockhandConfig;
use dockhand_common::constants::{ELEVATION_USER, SERVICE_MANAGER};
use dockhand_common::types::{CommandLine, DaemonState, ServiceAction};

use crate::launcher::Launcher;
use crate::runner::{CommandRunner, Ticket};

/// Receives human-readable messages about daemon operations.
pub trait Notifier {
    /// Shows `message` to the user.
    fn notify(&self, message: &str);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "dockhand::notify", "{message}");
    }
}

/// Result of a daemon start or stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the elevated service command succeeded.
    pub success: bool,
    /// The action that was attempted.
    pub action: ServiceAction,
    /// The exact command that was executed.
    pub command_line: CommandLine,
}

impl ToggleOutcome {
    /// One-sentence description naming the command.
    #[must_use]
    pub fn notification(&self) -> String {
        if self.success {
            format!("`{}` terminated successfully", self.command_line)
        } else {
            format!("Error occurred when running `{}`", self.command_line)
        }
    }
}

/// Queries and switches the daemon's service.
#[derive(Clone)]
pub struct DaemonServiceController {
    service: String,
    elevation: String,
    notifier: Rc<dyn Notifier>,
}

impl DaemonServiceController {
    /// Creates a controller that reports through [`LogNotifier`].
    #[must_use]
    pub fn from_config(config: &DockhandConfig) -> Self {
        Self {
            service: config.service.clone(),
            elevation: config.elevation.clone(),
            notifier: Rc::new(LogNotifier),
        }
    }

    /// Replaces the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// `systemctl is-active <service> --system`
    #[must_use]
    pub fn status_command(&self) -> CommandLine {
        CommandLine::new(SERVICE_MANAGER).args(["is-active", self.service.as_str(), "--system"])
    }

    /// The elevated service-manager command for `action`.
    #[must_use]
    pub fn service_command(&self, action: ServiceAction) -> CommandLine {
        CommandLine::new(SERVICE_MANAGER)
            .args([action.as_str(), self.service.as_str(), "--system"])
            .wrapped_by(CommandLine::new(&self.elevation).args(["--user", ELEVATION_USER]))
    }

    /// Asks the service manager whether the daemon is active.
    ///
    /// The unit's exit status is ignored: `is-active` exits non-zero for
    /// inactive units, and only the reported state word matters.
    pub fn query_status<L: Launcher>(&self, runner: &CommandRunner<L>) -> DaemonState {
        let result = runner.run(&self.status_command());
        let state = if !result.spawned {
            DaemonState::Unknown
        } else if reports_active(&result.stdout_text()) {
            DaemonState::Running
        } else {
            DaemonState::Stopped
        };
        tracing::info!(service = %self.service, %state, "daemon status");
        state
    }

    /// Starts a stopped daemon or stops a running one.
    ///
    /// An `Unknown` state is treated as stopped, so the daemon is started.
    pub fn toggle<L, F>(
        &self,
        runner: &CommandRunner<L>,
        current: DaemonState,
        on_complete: F,
    ) -> Ticket
    where
        L: Launcher,
        F: FnOnce(ToggleOutcome) + 'static,
    {
        self.set(runner, current.toggle_action(), on_complete)
    }

    /// Issues `action` regardless of the current state.
    pub fn set<L, F>(&self, runner: &CommandRunner<L>, action: ServiceAction, on_complete: F) -> Ticket
    where
        L: Launcher,
        F: FnOnce(ToggleOutcome) + 'static,
    {
        let command = self.service_command(action);
        tracing::info!(%action, command = %command, "switching daemon");
        let notifier = Rc::clone(&self.notifier);
        runner.run_async(command, move |result| {
            let outcome = ToggleOutcome {
                success: result.exit_succeeded,
                action,
                command_line: result.command_line,
            };
            let message = outcome.notification();
            if outcome.success {
                tracing::info!("{message}");
            } else {
                tracing::error!(stderr = %String::from_utf8_lossy(&result.stderr).trim(), "{message}");
                notifier.notify(&message);
            }
            on_complete(outcome);
        })
    }
}

impl std::fmt::Debug for DaemonServiceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DaemonServiceController")
            .field("service", &self.service)
            .field("elevation", &self.elevation)
            .finish_non_exhaustive()
    }
}

/// Whether a service-manager status reply names the active state.
#[must_use]
pub fn reports_active(output: &str) -> bool {
    output.lines().next().is_some_and(|line| line.trim() == "active")
}
