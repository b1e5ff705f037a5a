//! System-wide constants and default command names.

/// Default container runtime binary.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Default process name searched for in the process table.
///
/// Matched as a substring, so `dockerd` and `docker-proxy` both count.
pub const DEFAULT_DAEMON_PROCESS: &str = "docker";

/// Default service-manager unit for the daemon.
pub const DEFAULT_SERVICE: &str = "docker.service";

/// Service manager binary.
pub const SERVICE_MANAGER: &str = "systemctl";

/// Default privilege elevation wrapper.
pub const DEFAULT_ELEVATION: &str = "pkexec";

/// User the elevation wrapper runs the service command as.
pub const ELEVATION_USER: &str = "root";

/// Default shell opened inside a container. Not every image ships it.
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Terminal emulator used when neither the configuration nor the desktop
/// settings name one.
pub const FALLBACK_TERMINAL: &str = "gnome-terminal";

/// Argument separating the terminal's own options from the command it runs.
pub const DEFAULT_TERMINAL_SEPARATOR: &str = "--";

/// Process table listing command and its arguments.
pub const PROCESS_TABLE: [&str; 2] = ["/bin/ps", "cax"];

/// Delimiter between fields of the container listing format.
pub const LISTING_DELIMITER: char = ',';

/// Go template handed to the runtime's `ps --format` flag.
pub const LISTING_FORMAT: &str = "{{.Names}},{{.Status}}";

/// Desktop settings key holding the default terminal emulator.
pub const TERMINAL_SETTINGS_SCHEMA: &str = "org.gnome.desktop.default-applications.terminal";

/// Settings store query tool.
pub const SETTINGS_TOOL: &str = "gsettings";
