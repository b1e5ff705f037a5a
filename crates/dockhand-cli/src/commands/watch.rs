//! `dockhand watch` — Re-list containers until interrupted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::Args;
use dockhand_runtime::engine::Engine;

use crate::output;

const TICK: Duration = Duration::from_millis(250);
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Arguments for the `watch` command.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between refreshes.
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Only show containers whose process is alive.
    #[arg(short, long)]
    pub running: bool,
}

/// Executes the `watch` command.
///
/// Each refresh takes a fresh snapshot; nothing is cached between frames.
/// A failed listing is shown in place of the table and retried on the
/// next refresh.
///
/// # Errors
///
/// Returns an error if the Ctrl+C handler cannot be installed.
pub fn execute(engine: &Engine, args: &WatchArgs) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {e}"))?;

    let interval = Duration::from_secs(args.interval);
    while running.load(Ordering::SeqCst) {
        print!("{CLEAR}{}", render_frame(engine, args.running));
        println!("\nRefreshing every {}s. Press Ctrl+C to exit.", args.interval);

        let deadline = Instant::now() + interval;
        while running.load(Ordering::SeqCst) && Instant::now() < deadline {
            std::thread::sleep(TICK);
        }
    }
    tracing::debug!("watch interrupted");
    Ok(())
}

fn render_frame(engine: &Engine, only_running: bool) -> String {
    if !engine.is_running() {
        return format!("The {} daemon is not running.\n", engine.config().runtime);
    }
    match engine.list() {
        Ok(mut containers) => {
            if only_running {
                containers.retain(|c| c.state().is_up());
            }
            if containers.is_empty() {
                "No containers found.\n".to_owned()
            } else {
                output::container_table(&containers)
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "listing failed");
            format!("Listing failed: {e}\n")
        }
    }
}
