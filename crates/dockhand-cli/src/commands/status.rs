//! `dockhand status` — Show runtime and daemon health.

use clap::Args;
use dockhand_common::types::DaemonState;
use dockhand_runtime::engine::Engine;
use serde::Serialize;

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    runtime: &'a str,
    installed: bool,
    daemon_running: bool,
    service: &'a str,
    service_state: DaemonState,
}

/// Executes the `status` command.
///
/// # Errors
///
/// Returns an error if the JSON report cannot be serialized.
pub fn execute(engine: &Engine, args: &StatusArgs) -> anyhow::Result<()> {
    let config = engine.config();
    let report = StatusReport {
        runtime: &config.runtime,
        installed: engine.is_installed(),
        daemon_running: engine.is_running(),
        service: &config.service,
        service_state: engine.daemon_status(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:<16} {}", "runtime", report.runtime);
    println!("{:<16} {}", "installed", yes_no(report.installed));
    println!("{:<16} {}", "daemon process", yes_no(report.daemon_running));
    println!("{:<16} {} ({})", "service", report.service_state, report.service);
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
