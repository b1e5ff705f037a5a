//! Configuration model for the dockhand controller.
//!
//! There is no configuration file: front ends build a [`DockhandConfig`]
//! from defaults and override individual fields from flags or environment.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{DockhandError, Result};

/// Root configuration for the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockhandConfig {
    /// Container runtime binary (`docker`, `podman`, ...).
    pub runtime: String,
    /// Substring identifying the daemon in the process table.
    pub daemon_process: String,
    /// Service-manager unit controlling the daemon.
    pub service: String,
    /// Privilege elevation wrapper for service start/stop.
    pub elevation: String,
    /// Shell started by the open-shell action.
    pub shell: String,
    /// Terminal emulator for the open-shell action. `None` means resolve
    /// the desktop default when the engine is built.
    pub terminal: Option<String>,
    /// Argument that separates terminal options from the command to run.
    pub terminal_separator: String,
}

impl DockhandConfig {
    /// Checks that every command name is usable.
    ///
    /// # Errors
    ///
    /// Returns [`DockhandError::Config`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("runtime", &self.runtime),
            ("daemon_process", &self.daemon_process),
            ("service", &self.service),
            ("elevation", &self.elevation),
            ("shell", &self.shell),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DockhandError::Config {
                    message: format!("{field} must not be empty"),
                });
            }
        }
        if self.terminal.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DockhandError::Config {
                message: "terminal must not be empty when set".into(),
            });
        }
        Ok(())
    }
}

impl Default for DockhandConfig {
    fn default() -> Self {
        Self {
            runtime: constants::DEFAULT_RUNTIME.into(),
            daemon_process: constants::DEFAULT_DAEMON_PROCESS.into(),
            service: constants::DEFAULT_SERVICE.into(),
            elevation: constants::DEFAULT_ELEVATION.into(),
            shell: constants::DEFAULT_SHELL.into(),
            terminal: None,
            terminal_separator: constants::DEFAULT_TERMINAL_SEPARATOR.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_docker() {
        let cfg = DockhandConfig::default();
        assert_eq!(cfg.runtime, "docker");
        assert_eq!(cfg.service, "docker.service");
        assert_eq!(cfg.shell, "/bin/bash");
        assert!(cfg.terminal.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_runtime_is_rejected() {
        let cfg = DockhandConfig {
            runtime: "  ".into(),
            ..DockhandConfig::default()
        };
        let err = cfg.validate().expect_err("empty runtime must fail");
        assert!(err.to_string().contains("runtime"));
    }

    #[test]
    fn blank_terminal_override_is_rejected() {
        let cfg = DockhandConfig {
            terminal: Some(String::new()),
            ..DockhandConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_survives_json() {
        let cfg = DockhandConfig {
            runtime: "podman".into(),
            terminal: Some("kitty".into()),
            ..DockhandConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: DockhandConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
