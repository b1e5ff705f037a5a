//! `dockhand daemon` — Query or switch the daemon's system service.

use std::cell::RefCell;
use std::rc::Rc;

use clap::{Args, Subcommand};
use dockhand_common::types::{DaemonState, ServiceAction};
use dockhand_runtime::daemon::{Notifier, ToggleOutcome};
use dockhand_runtime::engine::Engine;

/// Arguments for the `daemon` command.
#[derive(Args, Debug)]
pub struct DaemonArgs {
    /// Operation to perform. Defaults to `status`.
    #[command(subcommand)]
    pub command: Option<DaemonCommand>,
}

/// Daemon operations.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DaemonCommand {
    /// Print the service state.
    Status,
    /// Stop the daemon if it is running, start it otherwise.
    Toggle,
    /// Start the daemon.
    Start,
    /// Stop the daemon.
    Stop,
}

/// Prints failure notifications to stderr.
#[derive(Debug, Clone, Copy)]
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("  \x1b[33m!\x1b[0m {message}");
    }
}

/// Executes the `daemon` command.
///
/// Start and stop go through the elevation wrapper and may prompt for a
/// password. The state printed afterwards is queried again rather than
/// assumed from the exit status.
///
/// # Errors
///
/// Returns an error if the service command failed.
pub fn execute(engine: Engine, args: &DaemonArgs) -> anyhow::Result<()> {
    let engine = engine.with_notifier(Rc::new(StderrNotifier));
    let current = engine.daemon_status();

    let outcome = match args.command.unwrap_or(DaemonCommand::Status) {
        DaemonCommand::Status => {
            println!("{current} ({})", engine.config().service);
            return Ok(());
        }
        DaemonCommand::Toggle => switch(&engine, |e, cb| e.toggle_daemon(current, cb)),
        DaemonCommand::Start => switch(&engine, |e, cb| e.set_daemon(ServiceAction::Start, cb)),
        DaemonCommand::Stop => switch(&engine, |e, cb| e.set_daemon(ServiceAction::Stop, cb)),
    };

    let Some(outcome) = outcome else {
        anyhow::bail!("service command did not report back");
    };
    if !outcome.success {
        anyhow::bail!("{}", outcome.notification());
    }
    println!("{}", outcome.notification());
    report_new_state(&engine, outcome.action);
    Ok(())
}

fn switch<F>(engine: &Engine, dispatch: F) -> Option<ToggleOutcome>
where
    F: FnOnce(&Engine, Box<dyn FnOnce(ToggleOutcome)>) -> dockhand_runtime::runner::Ticket,
{
    let slot = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    let _ = dispatch(engine, Box::new(move |outcome| *sink.borrow_mut() = Some(outcome)));
    let _ = engine.wait_idle();
    slot.take()
}

fn report_new_state(engine: &Engine, action: ServiceAction) {
    let state = engine.daemon_status();
    let expected = match action {
        ServiceAction::Start => DaemonState::Running,
        ServiceAction::Stop => DaemonState::Stopped,
    };
    if state == expected {
        println!("{} is now {state}", engine.config().service);
    } else {
        tracing::warn!(%state, %expected, "service state differs from the requested one");
        println!("{} reports {state}", engine.config().service);
    }
}
