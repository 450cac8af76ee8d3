//! Configuration handling for dorts.
//! This module locates the config directory, parses `dorts.toml` into a tree of
//! typed values and splits it into the common scope and the list of entries.

use crate::constants::{
    APP_NAME, COMMON_TABLE, CONFIG_DIR_ENV, CONFIG_FILE, ENABLED_KEY, HOME_ENV, PATH_KEY,
    TEMPLATE_EXTENSION, XDG_CONFIG_HOME_ENV,
};
use crate::env::EnvLookup;
use crate::error::{DortsError, DortsResult};
use crate::scope::Scope;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A node of the configuration tree.
///
/// TOML integers, floats, arrays and datetimes match none of the variants and
/// are rejected while parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
    Table(IndexMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Human readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::String(_) => "string",
            ConfigValue::Table(_) => "table",
        }
    }
}

/// A scalar setting of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    String(String),
    Bool(bool),
}

impl Setting {
    pub fn type_name(&self) -> &'static str {
        match self {
            Setting::String(_) => "string",
            Setting::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::String(s) => f.write_str(s),
            Setting::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Setting::String(value.to_string())
    }
}

impl From<bool> for Setting {
    fn from(value: bool) -> Self {
        Setting::Bool(value)
    }
}

/// One named template-to-file generation task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub settings: IndexMap<String, Setting>,
}

impl Entry {
    pub fn new(name: impl Into<String>, settings: IndexMap<String, Setting>) -> Self {
        Self { name: name.into(), settings }
    }

    /// Whether the entry should be processed.
    ///
    /// # Errors
    /// * `DortsError::ConfigError` if `enabled` is present but not a boolean
    pub fn enabled(&self) -> DortsResult<bool> {
        match self.settings.get(ENABLED_KEY) {
            None => Ok(true),
            Some(Setting::Bool(enabled)) => Ok(*enabled),
            Some(other) => Err(DortsError::ConfigError(format!(
                "entry `{}': `{}' must be a boolean, found {}",
                self.name,
                ENABLED_KEY,
                other.type_name()
            ))),
        }
    }

    /// The raw destination path, before home substitution.
    ///
    /// # Errors
    /// * `DortsError::MissingPath` if the entry has no `path` key
    /// * `DortsError::ConfigError` if `path` is not a string
    pub fn path(&self) -> DortsResult<&str> {
        match self.settings.get(PATH_KEY) {
            Some(Setting::String(path)) => Ok(path),
            Some(other) => Err(DortsError::ConfigError(format!(
                "entry `{}': `{}' must be a string, found {}",
                self.name,
                PATH_KEY,
                other.type_name()
            ))),
            None => Err(DortsError::MissingPath { entry: self.name.clone() }),
        }
    }

    /// Template location for this entry inside `config_dir`.
    pub fn template_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(format!("{}.{}", self.name, TEMPLATE_EXTENSION))
    }
}

/// Everything a run needs, resolved once at load time.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config_dir: PathBuf,
    pub home: String,
    pub common: Scope,
    pub entries: Vec<Entry>,
}

/// Resolves the user's home directory: `HOME` first, then the platform lookup.
///
/// # Errors
/// * `DortsError::HomeDirectoryNotFound` if neither source yields a directory
pub fn resolve_home(env: &dyn EnvLookup) -> DortsResult<String> {
    if let Some(home) = env.get_non_empty(HOME_ENV) {
        return Ok(home);
    }
    dirs::home_dir()
        .map(|home| home.to_string_lossy().into_owned())
        .ok_or(DortsError::HomeDirectoryNotFound)
}

/// Resolves the config directory.
///
/// Precedence: `explicit` (command line), then `DORTS_DIR`, then
/// `$XDG_CONFIG_HOME/dorts` where `XDG_CONFIG_HOME` defaults to `<home>/.config`.
pub fn resolve_config_dir(explicit: Option<&Path>, env: &dyn EnvLookup, home: &str) -> PathBuf {
    if let Some(dir) = explicit.filter(|dir| !dir.as_os_str().is_empty()) {
        debug!("Using config directory from command line: {}", dir.display());
        return dir.to_path_buf();
    }
    if let Some(dir) = env.get_non_empty(CONFIG_DIR_ENV) {
        debug!("Using config directory from {}: {}", CONFIG_DIR_ENV, dir);
        return PathBuf::from(dir);
    }
    let xdg_config_home = env
        .get_non_empty(XDG_CONFIG_HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(home).join(".config"));
    xdg_config_home.join(APP_NAME)
}

/// Location of the configuration file inside `config_dir`.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE)
}

/// Parses configuration content into the common scope and the entry list.
///
/// # Arguments
/// * `content` - Raw TOML content
/// * `path` - Origin of the content, used in error messages
///
/// # Errors
/// * `DortsError::ConfigParseError` if the content is not a valid tree
/// * `DortsError::ConfigError` if the tree has the wrong shape
pub fn parse_config(content: &str, path: &Path) -> DortsResult<(Scope, Vec<Entry>)> {
    let tree: IndexMap<String, ConfigValue> =
        toml::from_str(content).map_err(|source| DortsError::ConfigParseError {
            path: path.to_path_buf(),
            source,
        })?;
    split_tree(tree)
}

/// Validates the tree and splits it into the common scope and the entries,
/// preserving document order.
pub fn split_tree(tree: IndexMap<String, ConfigValue>) -> DortsResult<(Scope, Vec<Entry>)> {
    let common = match tree.get(COMMON_TABLE) {
        Some(ConfigValue::Table(table)) => flatten_common(table)?,
        Some(other) => {
            return Err(DortsError::ConfigError(format!(
                "mandatory `{}' must be a table, found {}",
                COMMON_TABLE,
                other.type_name()
            )))
        }
        None => {
            return Err(DortsError::ConfigError(format!(
                "mandatory `{}' table does not exist",
                COMMON_TABLE
            )))
        }
    };

    let entries = tree
        .into_iter()
        .filter(|(name, _)| name != COMMON_TABLE)
        .map(|(name, value)| into_entry(name, value))
        .collect::<DortsResult<Vec<_>>>()?;

    Ok((common, entries))
}

fn flatten_common(table: &IndexMap<String, ConfigValue>) -> DortsResult<Scope> {
    table
        .iter()
        .map(|(key, value)| match value {
            ConfigValue::String(s) => Ok((key.clone(), s.clone())),
            other => Err(DortsError::ConfigError(format!(
                "`{}.{}' must be a string, found {}",
                COMMON_TABLE,
                key,
                other.type_name()
            ))),
        })
        .collect()
}

fn into_entry(name: String, value: ConfigValue) -> DortsResult<Entry> {
    let table = match value {
        ConfigValue::Table(table) => table,
        other => {
            return Err(DortsError::ConfigError(format!(
                "entry `{}' must be a table, found {}",
                name,
                other.type_name()
            )))
        }
    };

    let mut settings = IndexMap::with_capacity(table.len());
    for (key, value) in table {
        let setting = match value {
            ConfigValue::String(s) => Setting::String(s),
            ConfigValue::Bool(b) => Setting::Bool(b),
            ConfigValue::Table(_) => {
                return Err(DortsError::ConfigError(format!(
                    "`{}.{}' must be a string or boolean, found table",
                    name, key
                )))
            }
        };
        settings.insert(key, setting);
    }

    Ok(Entry { name, settings })
}

/// Loads the configuration for a run.
///
/// # Arguments
/// * `explicit_dir` - Config directory given on the command line, if any
/// * `env` - Environment used for directory and home resolution
///
/// # Returns
/// * `DortsResult<RunContext>` - Resolved directory, home, common scope and entries
pub fn load_config(explicit_dir: Option<&Path>, env: &dyn EnvLookup) -> DortsResult<RunContext> {
    let home = resolve_home(env)?;
    let config_dir = resolve_config_dir(explicit_dir, env, &home);
    let config_path = config_file_path(&config_dir);

    debug!("Loading configuration from {}", config_path.display());
    let content =
        std::fs::read_to_string(&config_path).map_err(|source| DortsError::ConfigReadError {
            path: config_path.clone(),
            source,
        })?;

    let (common, entries) = parse_config(&content, &config_path)?;
    debug!(
        "Loaded {} common variable(s) and {} entries",
        common.len(),
        entries.len()
    );

    Ok(RunContext { config_dir, home, common, entries })
}
