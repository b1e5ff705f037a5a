//! Domain primitive types exchanged between the controller and its callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A container as reported by one listing call.
///
/// `name` is the join key callers use to target lifecycle actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Container name, non-empty and unique within one snapshot.
    pub name: String,
    /// Raw status text, e.g. `Up 3 hours` or `Exited (0) 2 days ago`.
    pub status: String,
}

impl ContainerRecord {
    /// Creates a record from its two listing fields.
    #[must_use]
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }

    /// Classifies the raw status text.
    #[must_use]
    pub fn state(&self) -> ContainerState {
        ContainerState::from_status(&self.status)
    }

    /// Actions that make sense for the container's current state.
    #[must_use]
    pub fn available_actions(&self) -> &'static [LifecycleAction] {
        self.state().available_actions()
    }
}

/// Coarse lifecycle state derived from the runtime's status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    /// `Up ...`
    Running,
    /// `Up ... (Paused)`
    Paused,
    /// `Restarting (...) ...`
    Restarting,
    /// `Created`
    Created,
    /// `Exited (...) ...`
    Exited,
    /// `Dead`
    Dead,
    /// Anything the runtime reports that is not recognised.
    Unknown,
}

impl ContainerState {
    /// Parses the leading keyword of a runtime status string.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        let status = status.trim();
        if status.starts_with("Up") {
            if status.ends_with("(Paused)") {
                Self::Paused
            } else {
                Self::Running
            }
        } else if status.starts_with("Restarting") {
            Self::Restarting
        } else if status.starts_with("Created") {
            Self::Created
        } else if status.starts_with("Exited") {
            Self::Exited
        } else if status.starts_with("Dead") {
            Self::Dead
        } else {
            Self::Unknown
        }
    }

    /// Returns whether the container's process is alive.
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Running | Self::Paused | Self::Restarting)
    }

    /// Actions offered for a container in this state.
    #[must_use]
    pub const fn available_actions(self) -> &'static [LifecycleAction] {
        use LifecycleAction::{OpenShell, Pause, Remove, Restart, Start, Stop, Unpause};
        match self {
            Self::Running | Self::Restarting => &[Stop, Restart, Pause, OpenShell],
            Self::Paused => &[Unpause, Stop],
            Self::Created | Self::Exited | Self::Dead | Self::Unknown => &[Start, Remove],
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Restarting => write!(f, "restarting"),
            Self::Created => write!(f, "created"),
            Self::Exited => write!(f, "exited"),
            Self::Dead => write!(f, "dead"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A container state transition the runtime CLI can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleAction {
    /// Start a stopped container.
    Start,
    /// Stop a running container.
    Stop,
    /// Restart a container.
    Restart,
    /// Freeze all processes of a container.
    Pause,
    /// Resume a paused container.
    Unpause,
    /// Delete a container.
    Remove,
    /// Open an interactive shell in a terminal window.
    OpenShell,
}

impl LifecycleAction {
    /// Every action, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Start,
        Self::Stop,
        Self::Restart,
        Self::Pause,
        Self::Unpause,
        Self::Remove,
        Self::OpenShell,
    ];

    /// Runtime subcommand implementing the action.
    #[must_use]
    pub const fn subcommand(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Remove => "rm",
            Self::OpenShell => "exec",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Restart => "Restart",
            Self::Pause => "Pause",
            Self::Unpause => "Unpause",
            Self::Remove => "Remove",
            Self::OpenShell => "Open Terminal",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Liveness of the daemon according to the service manager.
///
/// Always derived fresh; the daemon can change state behind our back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaemonState {
    /// The service manager reports the unit active.
    Running,
    /// The unit is in any other state.
    Stopped,
    /// The status query could not be run.
    Unknown,
}

impl DaemonState {
    /// The service action that flips this state.
    ///
    /// `Unknown` is treated as stopped, so toggling it starts the daemon.
    #[must_use]
    pub const fn toggle_action(self) -> ServiceAction {
        match self {
            Self::Running => ServiceAction::Stop,
            Self::Stopped | Self::Unknown => ServiceAction::Start,
        }
    }
}

impl fmt::Display for DaemonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Service-manager verb applied to the daemon unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceAction {
    /// Start the unit.
    Start,
    /// Stop the unit.
    Stop,
}

impl ServiceAction {
    /// Service-manager subcommand.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program and its argument vector.
///
/// Arguments are handed to the launcher as-is, never through a shell, so a
/// container name cannot inject extra commands. `Display` joins the parts
/// with spaces for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Creates a command line with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Prefixes this command with a wrapper program and its arguments,
    /// e.g. a privilege elevation tool or a terminal emulator.
    #[must_use]
    pub fn wrapped_by(self, wrapper: Self) -> Self {
        let Self { program, args } = self;
        wrapper.arg(program).args(args)
    }

    /// Program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Outcome of one command execution.
///
/// Produced exactly once per execution and handed by value to whoever
/// receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the process ran and exited successfully.
    pub exit_succeeded: bool,
    /// Whether the launcher managed to start the process at all.
    pub spawned: bool,
    /// Exit code, absent when the process never started or was signalled.
    pub exit_code: Option<i32>,
    /// Command that was executed.
    pub command_line: CommandLine,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error, or a synthesized diagnostic when the
    /// command could not be spawned.
    pub stderr: Vec<u8>,
}

impl CommandResult {
    /// Builds the result for a command the launcher could not start.
    #[must_use]
    pub fn spawn_failed(command_line: CommandLine, error: &std::io::Error) -> Self {
        let diagnostic = format!("failed to spawn `{command_line}`: {error}");
        Self {
            exit_succeeded: false,
            spawned: false,
            exit_code: None,
            command_line,
            stdout: Vec::new(),
            stderr: diagnostic.into_bytes(),
        }
    }

    /// Standard output decoded lossily as UTF-8.
    #[must_use]
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error decoded lossily as UTF-8.
    #[must_use]
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Converts a failed result into an error, keeping successful ones.
    ///
    /// # Errors
    ///
    /// Returns [`DockhandError::Spawn`] when the process never started and
    /// [`DockhandError::NonZeroExit`] when it exited with a failure status.
    ///
    /// [`DockhandError::Spawn`]: crate::error::DockhandError::Spawn
    /// [`DockhandError::NonZeroExit`]: crate::error::DockhandError::NonZeroExit
    pub fn into_success(self) -> crate::error::Result<Self> {
        use crate::error::DockhandError;

        if self.exit_succeeded {
            Ok(self)
        } else if !self.spawned {
            Err(DockhandError::Spawn {
                command: self.command_line.to_string(),
                source: std::io::Error::other(self.stderr_text()),
            })
        } else {
            Err(DockhandError::NonZeroExit {
                command: self.command_line.to_string(),
                code: self.exit_code,
                stderr: self.stderr_text(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let cases = [
            ("Up 3 hours", ContainerState::Running),
            ("Up 5 minutes (healthy)", ContainerState::Running),
            ("Up 2 days (Paused)", ContainerState::Paused),
            ("Restarting (1) 4 seconds ago", ContainerState::Restarting),
            ("Created", ContainerState::Created),
            ("Exited (0) 2 days ago", ContainerState::Exited),
            ("Dead", ContainerState::Dead),
            ("Removal In Progress", ContainerState::Unknown),
        ];
        for (status, expected) in cases {
            assert_eq!(ContainerState::from_status(status), expected, "{status}");
        }
    }

    #[test]
    fn running_container_offers_stop_and_shell() {
        let rec = ContainerRecord::new("web1", "Up 3 hours");
        let actions = rec.available_actions();
        assert!(actions.contains(&LifecycleAction::Stop));
        assert!(actions.contains(&LifecycleAction::OpenShell));
        assert!(!actions.contains(&LifecycleAction::Start));
    }

    #[test]
    fn exited_container_offers_start_and_remove() {
        let rec = ContainerRecord::new("db", "Exited (137) 1 hour ago");
        assert_eq!(
            rec.available_actions(),
            &[LifecycleAction::Start, LifecycleAction::Remove]
        );
    }

    #[test]
    fn remove_uses_rm_subcommand() {
        assert_eq!(LifecycleAction::Remove.subcommand(), "rm");
        assert_eq!(LifecycleAction::OpenShell.label(), "Open Terminal");
    }

    #[test]
    fn toggle_action_inverts_state() {
        assert_eq!(DaemonState::Running.toggle_action(), ServiceAction::Stop);
        assert_eq!(DaemonState::Stopped.toggle_action(), ServiceAction::Start);
        assert_eq!(DaemonState::Unknown.toggle_action(), ServiceAction::Start);
    }

    #[test]
    fn command_line_displays_space_joined() {
        let cmd = CommandLine::new("docker").args(["start", "web1"]);
        assert_eq!(cmd.to_string(), "docker start web1");
        assert_eq!(cmd.program(), "docker");
        assert_eq!(cmd.arguments(), ["start", "web1"]);
    }

    #[test]
    fn wrapping_prepends_wrapper() {
        let inner = CommandLine::new("systemctl").args(["stop", "docker.service"]);
        let wrapped = inner.wrapped_by(CommandLine::new("pkexec").args(["--user", "root"]));
        assert_eq!(
            wrapped.to_string(),
            "pkexec --user root systemctl stop docker.service"
        );
    }

    #[test]
    fn spawn_failure_synthesizes_stderr() {
        let err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let result = CommandResult::spawn_failed(CommandLine::new("nope"), &err);
        assert!(!result.exit_succeeded);
        assert!(!result.spawned);
        assert!(result.stdout.is_empty());
        assert!(result.stderr_text().starts_with("failed to spawn `nope`"));
        assert!(matches!(
            result.into_success(),
            Err(crate::error::DockhandError::Spawn { .. })
        ));
    }

    #[test]
    fn failed_exit_becomes_non_zero_exit() {
        let result = CommandResult {
            exit_succeeded: false,
            spawned: true,
            exit_code: Some(125),
            command_line: CommandLine::new("docker").arg("ps"),
            stdout: Vec::new(),
            stderr: b"permission denied".to_vec(),
        };
        let err = result.into_success().expect_err("must fail");
        assert!(matches!(
            err,
            crate::error::DockhandError::NonZeroExit { code: Some(125), .. }
        ));
    }
}
