//! Process launcher abstraction.
//!
//! A [`Launcher`] is the controller's only way of touching the outside
//! world. [`SystemLauncher`] spawns real processes; tests substitute a
//! scripted implementation.

use std::future::Future;
use std::io::{BufRead, BufReader};
use std::pin::Pin;
use std::process::{Child, ChildStdout, Output, Stdio};

use dockhand_common::types::{CommandLine, CommandResult};

/// A command execution that completes later.
pub type PendingResult = Pin<Box<dyn Future<Output = CommandResult> + Send + 'static>>;

/// Standard output of a running command, one line at a time.
pub type OutputLines = Box<dyn Iterator<Item = String>>;

/// Starts external commands and captures their output.
///
/// Implementations never fail outright: a command that cannot be spawned
/// yields a [`CommandResult`] with `spawned == false` and a diagnostic in
/// `stderr`. Only [`Launcher::stream`] reports spawn errors, since its
/// callers decide how to degrade.
pub trait Launcher {
    /// Runs a command to completion on the calling thread.
    fn run(&self, command: &CommandLine) -> CommandResult;

    /// Returns a future that runs the command to completion.
    ///
    /// The future is driven by the command runner's background executor,
    /// so it must not borrow from the launcher.
    fn run_async(&self, command: CommandLine) -> PendingResult;

    /// Spawns a command and yields its standard output line by line.
    ///
    /// Dropping the iterator before the end of output terminates the
    /// process.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the process could not be started.
    fn stream(&self, command: &CommandLine) -> std::io::Result<OutputLines>;
}

/// Launcher backed by the operating system's process API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn run(&self, command: &CommandLine) -> CommandResult {
        tracing::debug!(command = %command, "running command");
        let output = std::process::Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .output();
        match output {
            Ok(output) => from_output(command.clone(), &output),
            Err(e) => CommandResult::spawn_failed(command.clone(), &e),
        }
    }

    fn run_async(&self, command: CommandLine) -> PendingResult {
        Box::pin(async move {
            tracing::debug!(command = %command, "running command asynchronously");
            let output = tokio::process::Command::new(command.program())
                .args(command.arguments())
                .stdin(Stdio::null())
                .output()
                .await;
            match output {
                Ok(output) => from_output(command, &output),
                Err(e) => CommandResult::spawn_failed(command, &e),
            }
        })
    }

    fn stream(&self, command: &CommandLine) -> std::io::Result<OutputLines> {
        tracing::debug!(command = %command, "streaming command output");
        let mut child = std::process::Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;
        let stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::other(format!("stdout of `{command}` was not captured"))
        })?;
        Ok(Box::new(ProcessLines {
            child,
            reader: BufReader::new(stdout),
        }))
    }
}

fn from_output(command_line: CommandLine, output: &Output) -> CommandResult {
    CommandResult {
        exit_succeeded: output.status.success(),
        spawned: true,
        exit_code: output.status.code(),
        command_line,
        stdout: output.stdout.clone(),
        stderr: output.stderr.clone(),
    }
}

/// Line iterator over a child's stdout that reaps the child when dropped.
struct ProcessLines {
    child: Child,
    reader: BufReader<ChildStdout>,
}

impl Iterator for ProcessLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                Some(line.trim_end_matches(['\n', '\r']).to_owned())
            }
        }
    }
}

impl Drop for ProcessLines {
    fn drop(&mut self) {
        // The child may already have exited; both calls are best effort.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
