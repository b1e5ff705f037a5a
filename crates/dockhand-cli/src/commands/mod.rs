//! CLI command definitions and dispatch.

pub mod daemon;
pub mod lifecycle;
pub mod ps;
pub mod status;
pub mod watch;

use clap::{Parser, Subcommand};
use dockhand_common::config::DockhandConfig;
use dockhand_common::constants;
use dockhand_common::types::LifecycleAction;
use dockhand_runtime::engine::Engine;

/// Dockhand: a small controller for a local container runtime.
#[derive(Parser, Debug)]
#[command(name = "dockhand", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Container runtime binary.
    #[arg(long, global = true, env = "DOCKHAND_RUNTIME", default_value = constants::DEFAULT_RUNTIME)]
    pub runtime: String,

    /// System service unit running the daemon.
    #[arg(long, global = true, env = "DOCKHAND_SERVICE", default_value = constants::DEFAULT_SERVICE)]
    pub service: String,

    /// Shell started inside containers by `shell`.
    #[arg(long, global = true, env = "DOCKHAND_SHELL", default_value = constants::DEFAULT_SHELL)]
    pub shell: String,

    /// Terminal emulator for `shell` (defaults to the desktop setting).
    #[arg(long, global = true, env = "DOCKHAND_TERMINAL")]
    pub terminal: Option<String>,
}

impl Cli {
    /// Builds the controller configuration from defaults and flags.
    pub fn config(&self) -> DockhandConfig {
        DockhandConfig {
            runtime: self.runtime.clone(),
            service: self.service.clone(),
            shell: self.shell.clone(),
            terminal: self.terminal.clone(),
            ..DockhandConfig::default()
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show whether the runtime is installed and its daemon is running.
    Status(status::StatusArgs),
    /// List containers with their status and available actions.
    Ps(ps::PsArgs),
    /// Start one or more containers.
    Start(lifecycle::TargetArgs),
    /// Stop one or more containers.
    Stop(lifecycle::TargetArgs),
    /// Restart one or more containers.
    Restart(lifecycle::TargetArgs),
    /// Pause one or more containers.
    Pause(lifecycle::TargetArgs),
    /// Unpause one or more containers.
    Unpause(lifecycle::TargetArgs),
    /// Remove one or more containers.
    Rm(lifecycle::TargetArgs),
    /// Open an interactive shell in a terminal window.
    Shell(lifecycle::TargetArgs),
    /// Query or switch the daemon's system service.
    Daemon(daemon::DaemonArgs),
    /// Re-list containers periodically until interrupted.
    Watch(watch::WatchArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the runtime is not installed or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let engine = Engine::new(cli.config()).map_err(|e| anyhow::anyhow!("{e}"))?;
    if !engine.is_installed() {
        anyhow::bail!(
            "`{}` was not found on PATH; install the container runtime first",
            engine.config().runtime
        );
    }

    match cli.command {
        Command::Status(args) => status::execute(&engine, &args),
        Command::Ps(args) => ps::execute(&engine, &args),
        Command::Start(args) => lifecycle::execute(&engine, LifecycleAction::Start, args),
        Command::Stop(args) => lifecycle::execute(&engine, LifecycleAction::Stop, args),
        Command::Restart(args) => lifecycle::execute(&engine, LifecycleAction::Restart, args),
        Command::Pause(args) => lifecycle::execute(&engine, LifecycleAction::Pause, args),
        Command::Unpause(args) => lifecycle::execute(&engine, LifecycleAction::Unpause, args),
        Command::Rm(args) => lifecycle::execute(&engine, LifecycleAction::Remove, args),
        Command::Shell(args) => lifecycle::execute(&engine, LifecycleAction::OpenShell, args),
        Command::Daemon(args) => daemon::execute(engine, &args),
        Command::Watch(args) => watch::execute(&engine, &args),
    }
}
