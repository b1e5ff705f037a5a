//! Scripted launcher for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use dockhand_common::types::{CommandLine, CommandResult};

use crate::launcher::{Launcher, OutputLines, PendingResult};

#[derive(Debug, Clone)]
enum Scripted {
    Output {
        success: bool,
        stdout: String,
        stderr: String,
    },
    SpawnFails,
}

/// Launcher that answers from a table keyed by the displayed command line
/// and records every command it was asked to run.
///
/// Unscripted commands succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedLauncher {
    script: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<CommandLine>>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, command: &str, success: bool, stdout: &str) {
        self.respond_with_stderr(command, success, stdout, "");
    }

    pub fn respond_with_stderr(&self, command: &str, success: bool, stdout: &str, stderr: &str) {
        let _ = self.script.lock().unwrap().insert(
            command.to_owned(),
            Scripted::Output {
                success,
                stdout: stdout.to_owned(),
                stderr: stderr.to_owned(),
            },
        );
    }

    pub fn fail_spawn(&self, command: &str) {
        let _ = self
            .script
            .lock()
            .unwrap()
            .insert(command.to_owned(), Scripted::SpawnFails);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn lookup(&self, command: &CommandLine) -> Scripted {
        self.calls.lock().unwrap().push(command.clone());
        self.script
            .lock()
            .unwrap()
            .get(&command.to_string())
            .cloned()
            .unwrap_or(Scripted::Output {
                success: true,
                stdout: String::new(),
                stderr: String::new(),
            })
    }
}

impl Launcher for ScriptedLauncher {
    fn run(&self, command: &CommandLine) -> CommandResult {
        match self.lookup(command) {
            Scripted::Output {
                success,
                stdout,
                stderr,
            } => CommandResult {
                exit_succeeded: success,
                spawned: true,
                exit_code: Some(if success { 0 } else { 1 }),
                command_line: command.clone(),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            },
            Scripted::SpawnFails => CommandResult::spawn_failed(
                command.clone(),
                &std::io::Error::from(std::io::ErrorKind::NotFound),
            ),
        }
    }

    fn run_async(&self, command: CommandLine) -> PendingResult {
        let result = self.run(&command);
        Box::pin(std::future::ready(result))
    }

    fn stream(&self, command: &CommandLine) -> std::io::Result<OutputLines> {
        match self.lookup(command) {
            Scripted::Output { stdout, .. } => {
                let lines: Vec<String> = stdout.lines().map(str::to_owned).collect();
                Ok(Box::new(lines.into_iter()))
            }
            Scripted::SpawnFails => Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
        }
    }
}
