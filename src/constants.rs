//! Common constants used throughout the dorts application.

/// Application name, used for the default config directory and file name
pub const APP_NAME: &str = "dorts";

/// Configuration file name inside the config directory
pub const CONFIG_FILE: &str = "dorts.toml";

/// Extension appended to an entry name to locate its template
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Name of the mandatory table holding variables shared by every entry
pub const COMMON_TABLE: &str = "common";

/// Settings key that disables an entry when set to `false`
pub const ENABLED_KEY: &str = "enabled";

/// Settings key naming the destination file of an entry
pub const PATH_KEY: &str = "path";

/// Settings keys consumed by the orchestrator and never exposed to templates
pub const RESERVED_KEYS: [&str; 2] = [ENABLED_KEY, PATH_KEY];

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "DORTS_DIR";

/// XDG base directory variable for user configuration
pub const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

pub const HOME_ENV: &str = "HOME";

/// Command queried by the template lookup functions
pub const QUERY_PROGRAM: &str = "xrdb";
pub const QUERY_ARGS: [&str; 1] = ["-query"];
