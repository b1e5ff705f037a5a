//! `dockhand ps` — List containers with their available actions.

use clap::Args;
use dockhand_runtime::engine::Engine;

use crate::output::{self, ContainerView};

/// Arguments for the `ps` command.
#[derive(Args, Debug)]
pub struct PsArgs {
    /// Only show containers whose process is alive.
    #[arg(short, long)]
    pub running: bool,

    /// Print the listing as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `ps` command.
///
/// Warns instead of listing when the daemon is not in the process table,
/// since the runtime would only report a connection error.
///
/// # Errors
///
/// Returns an error if the listing fails or cannot be serialized.
pub fn execute(engine: &Engine, args: &PsArgs) -> anyhow::Result<()> {
    if !engine.is_running() {
        anyhow::bail!(
            "the {} daemon is not running; start it with `dockhand daemon start`",
            engine.config().runtime
        );
    }

    let mut containers = engine.list().map_err(|e| anyhow::anyhow!("{e}"))?;
    if args.running {
        containers.retain(|c| c.state().is_up());
    }

    if args.json {
        let views: Vec<_> = containers.iter().map(ContainerView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if containers.is_empty() {
        println!("No containers found.");
        return Ok(());
    }
    print!("{}", output::container_table(&containers));
    Ok(())
}
