//! Synchronous and asynchronous command execution.
//!
//! [`CommandRunner`] behaves like a small event loop. Asynchronous commands
//! are executed on a background tokio runtime, and their results travel
//! back over a channel. Completion callbacks are stored on the caller's
//! side and only run when the caller drains the queue with
//! [`CommandRunner::poll`], [`CommandRunner::wait_next`] or
//! [`CommandRunner::wait_idle`]. A callback therefore always runs on the
//! thread that owns the runner, exactly once, and never concurrently with
//! another callback.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::mpsc;

use dockhand_common::error::{DockhandError, Result};
use dockhand_common::types::{CommandLine, CommandResult};

use crate::launcher::{Launcher, OutputLines, SystemLauncher};

/// Identifies one asynchronous dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

type Completion = Box<dyn FnOnce(CommandResult)>;

/// Executes command lines through a [`Launcher`].
pub struct CommandRunner<L: Launcher = SystemLauncher> {
    launcher: L,
    executor: tokio::runtime::Runtime,
    sender: mpsc::Sender<(Ticket, CommandResult)>,
    receiver: mpsc::Receiver<(Ticket, CommandResult)>,
    pending: RefCell<HashMap<Ticket, Completion>>,
    next_ticket: Cell<u64>,
}

impl CommandRunner<SystemLauncher> {
    /// Creates a runner that spawns real processes.
    ///
    /// # Errors
    ///
    /// Returns an error if the background executor cannot be started.
    pub fn new() -> Result<Self> {
        Self::with_launcher(SystemLauncher)
    }
}

impl<L: Launcher> CommandRunner<L> {
    /// Creates a runner over a custom launcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the background executor cannot be started.
    pub fn with_launcher(launcher: L) -> Result<Self> {
        let executor = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("dockhand-exec")
            .enable_all()
            .build()
            .map_err(|source| DockhandError::EventLoop { source })?;
        let (sender, receiver) = mpsc::channel();
        Ok(Self {
            launcher,
            executor,
            sender,
            receiver,
            pending: RefCell::new(HashMap::new()),
            next_ticket: Cell::new(0),
        })
    }

    /// Returns the underlying launcher.
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Runs a command and blocks until it exits.
    pub fn run(&self, command: &CommandLine) -> CommandResult {
        let result = self.launcher.run(command);
        tracing::debug!(
            command = %command,
            success = result.exit_succeeded,
            "command finished"
        );
        result
    }

    /// Spawns a command and streams its standard output.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the process could not be started.
    pub fn stream(&self, command: &CommandLine) -> std::io::Result<OutputLines> {
        self.launcher.stream(command)
    }

    /// Dispatches a command without waiting for it.
    ///
    /// `on_complete` runs exactly once, during a later call to one of the
    /// queue-draining methods on this runner.
    pub fn run_async<F>(&self, command: CommandLine, on_complete: F) -> Ticket
    where
        F: FnOnce(CommandResult) + 'static,
    {
        let ticket = Ticket(self.next_ticket.get());
        self.next_ticket.set(ticket.0 + 1);
        let _ = self
            .pending
            .borrow_mut()
            .insert(ticket, Box::new(on_complete));

        tracing::debug!(command = %command, ticket = ticket.0, "dispatching command");
        let future = self.launcher.run_async(command);
        let sender = self.sender.clone();
        drop(self.executor.spawn(async move {
            let result = future.await;
            // The receiver lives as long as the runner; a send error only
            // means the runner was dropped and nobody is waiting.
            let _ = sender.send((ticket, result));
        }));
        ticket
    }

    /// Number of dispatched commands whose callbacks have not run yet.
    pub fn in_flight(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Runs the callbacks of every command that has already finished,
    /// without blocking. Returns how many callbacks ran.
    pub fn poll(&self) -> usize {
        let mut delivered = 0;
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            self.deliver(ticket, result);
            delivered += 1;
        }
        delivered
    }

    /// Blocks until the next dispatched command finishes and runs its
    /// callback. Returns `false` immediately when nothing is in flight.
    pub fn wait_next(&self) -> bool {
        if self.in_flight() == 0 {
            return false;
        }
        match self.receiver.recv() {
            Ok((ticket, result)) => {
                self.deliver(ticket, result);
                true
            }
            Err(_) => false,
        }
    }

    /// Blocks until every dispatched command, including ones dispatched by
    /// callbacks along the way, has completed. Returns how many callbacks
    /// ran.
    pub fn wait_idle(&self) -> usize {
        let mut delivered = 0;
        while self.wait_next() {
            delivered += 1;
        }
        delivered
    }

    fn deliver(&self, ticket: Ticket, result: CommandResult) {
        // Release the borrow before calling out: the callback may dispatch.
        let completion = self.pending.borrow_mut().remove(&ticket);
        match completion {
            Some(on_complete) => on_complete(result),
            None => tracing::warn!(ticket = ticket.0, "completion for unknown ticket"),
        }
    }
}

impl<L: Launcher> std::fmt::Debug for CommandRunner<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field("in_flight", &self.in_flight())
            .field("next_ticket", &self.next_ticket.get())
            .finish_non_exhaustive()
    }
}
