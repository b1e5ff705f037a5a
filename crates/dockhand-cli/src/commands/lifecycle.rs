//! `dockhand start|stop|restart|pause|unpause|rm|shell` — Container actions.

use std::cell::RefCell;
use std::rc::Rc;

use clap::Args;
use dockhand_common::types::LifecycleAction;
use dockhand_runtime::engine::Engine;

use crate::output;

/// Arguments shared by every lifecycle command.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Container names.
    #[arg(required = true)]
    pub containers: Vec<String>,
}

#[derive(Debug)]
struct Finished {
    index: usize,
    success: bool,
    detail: String,
}

/// Dispatches `action` on every named container at once, then waits for
/// all of them and reports each result in argument order.
///
/// # Errors
///
/// Returns an error if any of the actions failed.
pub fn execute(engine: &Engine, action: LifecycleAction, args: TargetArgs) -> anyhow::Result<()> {
    let finished = Rc::new(RefCell::new(Vec::with_capacity(args.containers.len())));
    for (index, name) in args.containers.iter().enumerate() {
        let sink = Rc::clone(&finished);
        let _ = engine.apply(action, name, move |result| {
            sink.borrow_mut().push(Finished {
                index,
                success: result.exit_succeeded,
                detail: result.stderr_text().trim().to_owned(),
            });
        });
    }
    let _ = engine.wait_idle();

    let mut finished = finished.take();
    finished.sort_by_key(|f| f.index);
    let failures = finished.iter().filter(|f| !f.success).count();
    for f in &finished {
        println!(
            "{}",
            output::action_report(action, &args.containers[f.index], f.success, &f.detail)
        );
    }

    if failures > 0 {
        anyhow::bail!(
            "{failures} of {} {} action(s) failed",
            args.containers.len(),
            action.subcommand()
        );
    }
    Ok(())
}
