//! Controller engine bundling the runner with every component.

use std::rc::Rc;

use dockhand_common::config::DockhandConfig;
use dockhand_common::error::Result;
use dockhand_common::types::{
    CommandResult, ContainerRecord, DaemonState, LifecycleAction, ServiceAction,
};

use crate::daemon::{DaemonServiceController, Notifier, ToggleOutcome};
use crate::launcher::{Launcher, SystemLauncher};
use crate::lifecycle::LifecycleController;
use crate::lister::ContainerLister;
use crate::probe::RuntimeProbe;
use crate::runner::{CommandRunner, Ticket};
use crate::terminal;

/// The single handle a front end needs.
///
/// Holds no container or daemon state between calls: every probe and
/// listing goes back to the runtime. Completion callbacks run while the
/// caller drains the queue with [`Engine::poll`], [`Engine::wait_next`] or
/// [`Engine::wait_idle`].
pub struct Engine<L: Launcher = SystemLauncher> {
    config: DockhandConfig,
    runner: CommandRunner<L>,
    probe: RuntimeProbe,
    lister: ContainerLister,
    lifecycle: LifecycleController,
    daemon: DaemonServiceController,
}

impl Engine<SystemLauncher> {
    /// Creates an engine that drives real processes.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the background
    /// executor cannot be started.
    pub fn new(config: DockhandConfig) -> Result<Self> {
        Self::with_launcher(config, SystemLauncher)
    }
}

impl<L: Launcher> Engine<L> {
    /// Creates an engine over a custom launcher.
    ///
    /// Resolves the terminal emulator once, here, so that dispatching an
    /// open-shell action never blocks on a settings query.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the background
    /// executor cannot be started.
    pub fn with_launcher(config: DockhandConfig, launcher: L) -> Result<Self> {
        config.validate()?;
        let runner = CommandRunner::with_launcher(launcher)?;
        let terminal = terminal::resolve_terminal(config.terminal.as_deref(), &runner);
        tracing::debug!(runtime = %config.runtime, terminal = %terminal, "engine ready");
        Ok(Self {
            probe: RuntimeProbe::from_config(&config),
            lister: ContainerLister::from_config(&config),
            lifecycle: LifecycleController::new(&config, terminal),
            daemon: DaemonServiceController::from_config(&config),
            runner,
            config,
        })
    }

    /// Routes daemon failure notifications to `notifier`.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.daemon = self.daemon.with_notifier(notifier);
        self
    }

    /// The configuration the engine was built with.
    pub const fn config(&self) -> &DockhandConfig {
        &self.config
    }

    /// The underlying command runner.
    pub const fn runner(&self) -> &CommandRunner<L> {
        &self.runner
    }

    /// The lifecycle controller, for callers that want to preview commands.
    pub const fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    /// Whether the runtime binary is on the search path.
    pub fn is_installed(&self) -> bool {
        self.probe.is_installed()
    }

    /// Whether the daemon appears in the process table.
    pub fn is_running(&self) -> bool {
        self.probe.is_running(&self.runner)
    }

    /// Lists every container.
    ///
    /// # Errors
    ///
    /// Returns a listing error if the runtime cannot be queried.
    pub fn list(&self) -> Result<Vec<ContainerRecord>> {
        self.lister.list(&self.runner)
    }

    /// Dispatches a lifecycle action.
    pub fn apply<F>(&self, action: LifecycleAction, container: &str, on_complete: F) -> Ticket
    where
        F: FnOnce(CommandResult) + 'static,
    {
        self.lifecycle
            .apply(&self.runner, action, container, on_complete)
    }

    /// Queries the daemon's service state.
    pub fn daemon_status(&self) -> DaemonState {
        self.daemon.query_status(&self.runner)
    }

    /// Starts or stops the daemon depending on `current`.
    pub fn toggle_daemon<F>(&self, current: DaemonState, on_complete: F) -> Ticket
    where
        F: FnOnce(ToggleOutcome) + 'static,
    {
        self.daemon.toggle(&self.runner, current, on_complete)
    }

    /// Issues an explicit daemon start or stop.
    pub fn set_daemon<F>(&self, action: ServiceAction, on_complete: F) -> Ticket
    where
        F: FnOnce(ToggleOutcome) + 'static,
    {
        self.daemon.set(&self.runner, action, on_complete)
    }

    /// Runs callbacks of already-finished commands without blocking.
    pub fn poll(&self) -> usize {
        self.runner.poll()
    }

    /// Blocks for the next completion. Returns `false` when idle.
    pub fn wait_next(&self) -> bool {
        self.runner.wait_next()
    }

    /// Blocks until nothing is in flight.
    pub fn wait_idle(&self) -> usize {
        self.runner.wait_idle()
    }
}

impl<L: Launcher> std::fmt::Debug for Engine<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("runner", &self.runner)
            .finish_non_exhaustive()
    }
}
