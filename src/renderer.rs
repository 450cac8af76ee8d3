//! Template renderer and rendering functionality for dorts.
//! Handles template strings and template files with support for MiniJinja
//! template processing and the resource lookup functions.
use crate::error::{DortsError, DortsResult};
use crate::functions::ResourceFunctions;
use crate::scope::Scope;
use log::debug;
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

/// Name given to templates rendered from a plain string.
const STRING_TEMPLATE_NAME: &str = "<string>";

/// Delimiters: `{{ expr }}`, `{{% stmt %}}` and `{{/* comment */}}`.
///
/// Everything starts with `{{`, so text such as `${#arr[@]}` or `printf '{%s}'`
/// passes through untouched.
const VARIABLE_DELIMITERS: (&str, &str) = ("{{", "}}");
const BLOCK_DELIMITERS: (&str, &str) = ("{{%", "%}}");
const COMMENT_DELIMITERS: (&str, &str) = ("{{/*", "*/}}");

/// Expression, statement and comment tags.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("valid tag regex"));

/// A string literal (group 1), or a `.field` access that is not an attribute
/// of a preceding expression (groups 2 and 3).
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')|(^|[^\w.)\]])\.([A-Za-z_][A-Za-z0-9_]*)"#,
    )
    .expect("valid field regex")
});

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `template` under `name` with the given scope.
    ///
    /// # Errors
    /// * `DortsError::TemplateError` on parse errors, undefined variables and
    ///   failing template functions
    fn render(&self, name: &str, template: &str, scope: &Scope) -> DortsResult<String>;

    /// Renders a template string.
    fn render_string(&self, template: &str, scope: &Scope) -> DortsResult<String> {
        self.render(STRING_TEMPLATE_NAME, template, scope)
    }

    /// Reads and renders a template file.
    ///
    /// # Errors
    /// * `DortsError::TemplateReadError` if the file cannot be read
    /// * `DortsError::TemplateError` if rendering fails
    fn render_file(&self, path: &Path, scope: &Scope) -> DortsResult<String> {
        let template =
            std::fs::read_to_string(path).map_err(|source| DortsError::TemplateReadError {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Rendering template file {}", path.display());
        self.render(&name, &template, scope)
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer without any resource functions.
    ///
    /// Undefined variables are errors and a trailing newline of the template
    /// is kept in the output.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_syntax(syntax());
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Creates a renderer with `lookup` and `xrdb_grep` available to templates.
    pub fn with_functions(functions: &ResourceFunctions) -> Self {
        let mut renderer = Self::new();
        functions.install(&mut renderer.env);
        renderer
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, template: &str, scope: &Scope) -> DortsResult<String> {
        let source = normalize_field_access(template);
        self.env
            .render_named_str(name, &source, scope)
            .map_err(|source| DortsError::TemplateError {
                name: name.to_string(),
                source,
            })
    }
}

fn syntax() -> SyntaxConfig {
    SyntaxConfig::builder()
        .variable_delimiters(VARIABLE_DELIMITERS.0, VARIABLE_DELIMITERS.1)
        .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
        .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
        .build()
        .expect("valid template delimiters")
}

/// Rewrites Go-style `{{ .name }}` field access to plain `{{ name }}`.
///
/// Only text inside `{{ }}` tags (including `{{% %}}`) is touched; string literals,
/// attribute access such as `a.b` and number literals are left alone.
pub fn normalize_field_access(template: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(template, |tag: &Captures| {
        FIELD_RE
            .replace_all(&tag[0], |caps: &Captures| match caps.get(1) {
                Some(literal) => literal.as_str().to_string(),
                None => format!("{}{}", &caps[2], &caps[3]),
            })
            .into_owned()
    })
}
