//! Container lifecycle actions.

use dockhand_common::config::DockhandConfig;
use dockhand_common::types::{CommandLine, CommandResult, LifecycleAction};

use crate::launcher::Launcher;
use crate::runner::{CommandRunner, Ticket};

/// Turns a lifecycle action on a named container into a runtime command
/// and dispatches it.
#[derive(Debug, Clone)]
pub struct LifecycleController {
    runtime: String,
    shell: String,
    terminal: String,
    terminal_separator: String,
}

impl LifecycleController {
    /// Creates a controller. `terminal` is the already-resolved terminal
    /// emulator used by [`LifecycleAction::OpenShell`].
    #[must_use]
    pub fn new(config: &DockhandConfig, terminal: impl Into<String>) -> Self {
        Self {
            runtime: config.runtime.clone(),
            shell: config.shell.clone(),
            terminal: terminal.into(),
            terminal_separator: config.terminal_separator.clone(),
        }
    }

    /// The command an action maps to.
    ///
    /// `OpenShell` runs `<runtime> exec -it <name> <shell>` inside the
    /// terminal emulator; every other action is `<runtime> <subcommand>
    /// <name>`.
    #[must_use]
    pub fn command_line(&self, action: LifecycleAction, container: &str) -> CommandLine {
        let runtime = CommandLine::new(&self.runtime);
        match action {
            LifecycleAction::OpenShell => {
                let mut terminal = CommandLine::new(&self.terminal);
                if !self.terminal_separator.is_empty() {
                    terminal = terminal.arg(&self.terminal_separator);
                }
                runtime
                    .args([action.subcommand(), "-it", container, self.shell.as_str()])
                    .wrapped_by(terminal)
            }
            _ => runtime.args([action.subcommand(), container]),
        }
    }

    /// Dispatches `action` against `container` without blocking.
    ///
    /// `on_complete` receives the result once the process returns. For
    /// commands that only launch something (such as a terminal) this
    /// reports the launch, so callers re-list containers to see the
    /// actual state.
    pub fn apply<L, F>(
        &self,
        runner: &CommandRunner<L>,
        action: LifecycleAction,
        container: &str,
        on_complete: F,
    ) -> Ticket
    where
        L: Launcher,
        F: FnOnce(CommandResult) + 'static,
    {
        let command = self.command_line(action, container);
        tracing::info!(
            action = action.subcommand(),
            container,
            command = %command,
            "dispatching lifecycle action"
        );
        let container = container.to_owned();
        runner.run_async(command, move |result| {
            if result.exit_succeeded {
                tracing::info!(action = action.subcommand(), container = %container, "lifecycle action completed");
            } else {
                tracing::warn!(
                    action = action.subcommand(),
                    container = %container,
                    stderr = %result.stderr_text().trim(),
                    "lifecycle action failed"
                );
            }
            on_complete(result);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::ScriptedLauncher;

    fn controller() -> LifecycleController {
        LifecycleController::new(&DockhandConfig::default(), "gnome-terminal")
    }

    fn runner() -> CommandRunner<ScriptedLauncher> {
        CommandRunner::with_launcher(ScriptedLauncher::new()).expect("runner")
    }

    #[test]
    fn simple_actions_map_to_runtime_subcommands() {
        let c = controller();
        let expected = [
            (LifecycleAction::Start, "docker start web1"),
            (LifecycleAction::Stop, "docker stop web1"),
            (LifecycleAction::Restart, "docker restart web1"),
            (LifecycleAction::Pause, "docker pause web1"),
            (LifecycleAction::Unpause, "docker unpause web1"),
            (LifecycleAction::Remove, "docker rm web1"),
        ];
        for (action, line) in expected {
            assert_eq!(c.command_line(action, "web1").to_string(), line);
        }
    }

    #[test]
    fn open_shell_runs_exec_in_terminal() {
        let cmd = controller().command_line(LifecycleAction::OpenShell, "web1");
        assert_eq!(
            cmd.to_string(),
            "gnome-terminal -- docker exec -it web1 /bin/bash"
        );
        assert_eq!(cmd.program(), "gnome-terminal");
    }

    #[test]
    fn open_shell_honours_shell_and_separator() {
        let cfg = DockhandConfig {
            shell: "/bin/sh".into(),
            terminal_separator: "-e".into(),
            ..DockhandConfig::default()
        };
        let cmd = LifecycleController::new(&cfg, "xterm").command_line(LifecycleAction::OpenShell, "db");
        assert_eq!(cmd.to_string(), "xterm -e docker exec -it db /bin/sh");
    }

    #[test]
    fn empty_separator_is_omitted() {
        let cfg = DockhandConfig {
            terminal_separator: String::new(),
            ..DockhandConfig::default()
        };
        let cmd = LifecycleController::new(&cfg, "kitty").command_line(LifecycleAction::OpenShell, "db");
        assert_eq!(cmd.to_string(), "kitty docker exec -it db /bin/bash");
    }

    #[test]
    fn container_name_stays_one_argument() {
        let cmd = controller().command_line(LifecycleAction::Stop, "web1; reboot");
        assert_eq!(cmd.arguments(), ["stop", "web1; reboot"]);
    }

    #[test]
    fn apply_start_dispatches_once_and_completes_once() {
        let runner = runner();
        let results = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&results);
        let _ = controller().apply(&runner, LifecycleAction::Start, "web1", move |r| {
            sink.borrow_mut().push(r);
        });

        assert!(results.borrow().is_empty());
        let _ = runner.wait_idle();

        let results = results.borrow();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].command_line.to_string(), "docker start web1");
        assert!(results[0].exit_succeeded);
        assert_eq!(runner.launcher().calls(), ["docker start web1"]);
    }

    #[test]
    fn failed_action_reaches_callback_with_stderr() {
        let runner = runner();
        runner.launcher().respond_with_stderr(
            "docker stop ghost",
            false,
            "",
            "Error response from daemon: No such container: ghost",
        );
        let got = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&got);
        let _ = controller().apply(&runner, LifecycleAction::Stop, "ghost", move |r| {
            *slot.borrow_mut() = Some(r);
        });
        let _ = runner.wait_idle();
        let result = got.borrow_mut().take().expect("delivered");
        assert!(!result.exit_succeeded);
        assert!(result.stderr_text().contains("No such container"));
    }

    #[test]
    fn independent_actions_each_complete() {
        let runner = runner();
        let count = Rc::new(RefCell::new(0));
        for name in ["a", "b", "c"] {
            let count = Rc::clone(&count);
            let _ = controller().apply(&runner, LifecycleAction::Restart, name, move |_| {
                *count.borrow_mut() += 1;
            });
        }
        assert_eq!(runner.wait_idle(), 3);
        assert_eq!(*count.borrow(), 3);
    }
}
