//! Template functions backed by an external resource database.
//!
//! Templates can pull values out of the X resource database (or any other
//! command producing `key:\tvalue` lines) at render time:
//!
//! ```text
//! foreground = {{ lookup("*.foreground") }}
//! background = {{ xrdb_grep("\\*\\.background:\\s*(\\S+)") }}
//! ```
//!
//! Every call runs the query command again. Failures are returned to the
//! template engine and abort the render.

use crate::constants::{QUERY_ARGS, QUERY_PROGRAM};
use crate::error::{DortsError, DortsResult};
use log::debug;
use minijinja::{Environment, ErrorKind};
use regex::Regex;
use std::process::Command;
use std::sync::Arc;

/// Names under which the raw-pattern function is registered.
const GREP_FUNCTION_NAMES: [&str; 2] = ["xrdb_grep", "XrdbGrep"];

/// Source of the text that lookup patterns are matched against.
pub trait ResourceQuery: Send + Sync {
    /// Returns the full output of the resource query.
    fn query(&self) -> DortsResult<String>;
}

/// Runs an external command and captures its standard output.
#[derive(Debug, Clone)]
pub struct CommandQuery {
    program: String,
    args: Vec<String>,
}

impl CommandQuery {
    pub fn new<S: Into<String>>(program: S, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `xrdb -query`
    pub fn xrdb() -> Self {
        Self::new(QUERY_PROGRAM, QUERY_ARGS)
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommandQuery {
    fn default() -> Self {
        Self::xrdb()
    }
}

impl ResourceQuery for CommandQuery {
    fn query(&self) -> DortsResult<String> {
        debug!("Running query command: {}", self.command_line());
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| DortsError::CommandFailed {
                command: self.command_line(),
                source,
            })?;

        if !output.status.success() {
            return Err(DortsError::CommandNonZeroExit {
                command: self.command_line(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The set of functions installed into the template environment.
#[derive(Clone)]
pub struct ResourceFunctions {
    source: Arc<dyn ResourceQuery>,
}

impl ResourceFunctions {
    pub fn new(source: Arc<dyn ResourceQuery>) -> Self {
        Self { source }
    }

    /// Returns the value of `key`, matched as `<key>:\t(.*)` in the query output.
    pub fn lookup(&self, key: &str) -> DortsResult<String> {
        self.grep(&format!("{}:\\t(.*)", regex::escape(key)))
    }

    /// Returns the first capture group of `pattern` in the query output.
    ///
    /// # Errors
    /// * `DortsError::InvalidPattern` if `pattern` does not compile
    /// * `DortsError::NoMatch` if `pattern` matches nothing or has no first group
    /// * Any error of the underlying query
    pub fn grep(&self, pattern: &str) -> DortsResult<String> {
        let re = Regex::new(pattern).map_err(|source| DortsError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let output = self.source.query()?;

        re.captures(&output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| DortsError::NoMatch {
                pattern: pattern.to_string(),
            })
    }

    /// Registers `lookup` and `xrdb_grep` in `env`.
    ///
    /// `xrdb_grep` is also available as `XrdbGrep`, the name older templates use.
    pub fn install(&self, env: &mut Environment<'static>) {
        let functions = self.clone();
        env.add_function("lookup", move |key: String| {
            functions.lookup(&key).map_err(|e| function_error("lookup", &key, e))
        });

        for name in GREP_FUNCTION_NAMES {
            let functions = self.clone();
            env.add_function(name, move |pattern: String| {
                functions
                    .grep(&pattern)
                    .map_err(|e| function_error(name, &pattern, e))
            });
        }
    }
}

fn function_error(name: &str, arg: &str, err: DortsError) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, format!("{name}({arg:?}) failed: {err}"))
}
