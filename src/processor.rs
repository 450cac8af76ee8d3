//! Batch processing of configuration entries.
//! Walks the entries in configuration order, applies the skip rules, renders
//! each template against its effective scope and writes the result.

use crate::config::{Entry, RunContext};
use crate::error::{DortsError, DortsResult};
use crate::path::substitute_home;
use crate::renderer::TemplateRenderer;
use crate::scope::resolve_scope;
use log::{debug, error, info};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What happened to a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// The template was rendered and written to `output`.
    Rendered { output: PathBuf },
    /// The template was rendered but not written (dry run).
    DryRun { output: PathBuf, content: String },
    /// `enabled = false`
    SkippedDisabled,
    /// No `<name>.tmpl` in the config directory.
    SkippedNoTemplate,
}

impl EntryOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, EntryOutcome::SkippedDisabled | EntryOutcome::SkippedNoTemplate)
    }
}

impl fmt::Display for EntryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryOutcome::Rendered { output } => write!(f, "rendered to '{}'", output.display()),
            EntryOutcome::DryRun { output, .. } => {
                write!(f, "would render to '{}'", output.display())
            }
            EntryOutcome::SkippedDisabled => f.write_str("disabled, skipped"),
            EntryOutcome::SkippedNoTemplate => f.write_str("no template, skipped"),
        }
    }
}

/// Outcome of one entry, tagged with the entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub name: String,
    pub outcome: EntryOutcome,
}

/// Result of a whole run.
///
/// `entries` lists every entry handled before the run finished or aborted.
/// Files written before an abort stay on disk.
#[derive(Debug)]
pub struct BatchResult {
    pub entries: Vec<EntryReport>,
    /// The entry name and error that aborted the run, if any.
    pub fatal: Option<(String, DortsError)>,
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        self.fatal.is_none()
    }

    pub fn rendered(&self) -> usize {
        self.entries.iter().filter(|report| !report.outcome.is_skipped()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|report| report.outcome.is_skipped()).count()
    }

    pub fn into_result(self) -> DortsResult<Vec<EntryReport>> {
        match self.fatal {
            Some((_, err)) => Err(err),
            None => Ok(self.entries),
        }
    }
}

/// Main processor that renders every entry of a run.
pub struct Processor<'a> {
    /// Template renderer
    renderer: &'a dyn TemplateRenderer,
    /// Config directory, home directory, common scope and entries
    context: &'a RunContext,
    /// Render without writing
    dry_run: bool,
}

impl<'a> Processor<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, context: &'a RunContext, dry_run: bool) -> Self {
        Self { renderer, context, dry_run }
    }

    /// Processes all entries in order, stopping at the first fatal error.
    pub fn run(&self) -> BatchResult {
        let mut entries = Vec::with_capacity(self.context.entries.len());

        for entry in &self.context.entries {
            match self.process(entry) {
                Ok(outcome) => {
                    info!("{}: {}", entry.name, outcome);
                    entries.push(EntryReport { name: entry.name.clone(), outcome });
                }
                Err(err) => {
                    error!("{}: {}", entry.name, err);
                    return BatchResult {
                        entries,
                        fatal: Some((entry.name.clone(), err)),
                    };
                }
            }
        }

        BatchResult { entries, fatal: None }
    }

    /// Processes a single entry.
    ///
    /// # Returns
    /// * `Ok(EntryOutcome)` for rendered and skipped entries
    /// * `Err(DortsError)` for conditions that must abort the run
    pub fn process(&self, entry: &Entry) -> DortsResult<EntryOutcome> {
        let template_path = entry.template_path(&self.context.config_dir);

        if !entry.enabled()? {
            return Ok(EntryOutcome::SkippedDisabled);
        }

        if !template_path.exists() {
            debug!("Template {} does not exist", template_path.display());
            return Ok(EntryOutcome::SkippedNoTemplate);
        }

        let output = PathBuf::from(substitute_home(entry.path()?, &self.context.home));
        let scope = resolve_scope(&self.context.common, &entry.settings);
        debug!("Entry `{}' has {} variable(s) in scope", entry.name, scope.len());

        let content = self.renderer.render_file(&template_path, &scope)?;

        if self.dry_run {
            return Ok(EntryOutcome::DryRun { output, content });
        }

        write_output(&output, &content)?;
        Ok(EntryOutcome::Rendered { output })
    }
}

/// Writes `content` to `path`, creating the file or truncating it.
///
/// The data is synced before the file is closed so that deferred write errors
/// surface here instead of being lost on drop.
fn write_output(path: &Path, content: &str) -> DortsResult<()> {
    let to_write_error = |source: std::io::Error| DortsError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(to_write_error)?;
    file.write_all(content.as_bytes()).map_err(to_write_error)?;
    file.sync_all().map_err(to_write_error)
}
