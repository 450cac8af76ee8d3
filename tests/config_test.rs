use dorts::config::{load_config, parse_config, resolve_config_dir, Entry, Setting};
use dorts::error::DortsError;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn parse(content: &str) -> Result<(dorts::scope::Scope, Vec<Entry>), DortsError> {
    parse_config(content, Path::new("dorts.toml"))
}

#[test]
fn test_explicit_dir_wins() {
    let env = env(&[("DORTS_DIR", "/from/env"), ("XDG_CONFIG_HOME", "/xdg")]);
    let dir = resolve_config_dir(Some(Path::new("/from/flag")), &env, "/home/u");
    assert_eq!(dir, PathBuf::from("/from/flag"));
}

#[test]
fn test_env_dir_wins_over_default() {
    let env = env(&[("DORTS_DIR", "/from/env"), ("XDG_CONFIG_HOME", "/xdg")]);
    assert_eq!(resolve_config_dir(None, &env, "/home/u"), PathBuf::from("/from/env"));

    // An empty flag value does not count as an override.
    assert_eq!(
        resolve_config_dir(Some(Path::new("")), &env, "/home/u"),
        PathBuf::from("/from/env")
    );
}

#[test]
fn test_xdg_default() {
    let env = env(&[("XDG_CONFIG_HOME", "/xdg"), ("DORTS_DIR", "")]);
    assert_eq!(resolve_config_dir(None, &env, "/home/u"), PathBuf::from("/xdg/dorts"));
}

#[test]
fn test_home_default_when_xdg_empty() {
    let env = env(&[("XDG_CONFIG_HOME", "")]);
    assert_eq!(
        resolve_config_dir(None, &env, "/home/u"),
        PathBuf::from("/home/u/.config/dorts")
    );
}

#[test]
fn test_common_and_entries_are_split() {
    let (common, entries) = parse(
        r#"
[common]
font = "mono"
size = "12"

[term]
path = "~/.termrc"
enabled = true
color = "red"
"#,
    )
    .unwrap();

    assert_eq!(common.len(), 2);
    assert_eq!(common["font"], "mono");
    assert_eq!(common["size"], "12");

    let mut settings = IndexMap::new();
    settings.insert("path".to_string(), Setting::from("~/.termrc"));
    settings.insert("enabled".to_string(), Setting::from(true));
    settings.insert("color".to_string(), Setting::from("red"));
    assert_eq!(entries, vec![Entry::new("term", settings)]);
}

#[test]
fn test_missing_common_is_fatal() {
    let result = parse(
        r#"
[term]
path = "~/.termrc"

[bar]
path = "~/.barrc"
"#,
    );

    match result {
        Err(DortsError::ConfigError(msg)) => assert!(msg.contains("common")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_common_must_be_table() {
    let result = parse(r#"common = "oops""#);
    assert!(matches!(result, Err(DortsError::ConfigError(_))));
}

#[test]
fn test_common_values_must_be_strings() {
    let result = parse(
        r#"
[common]
dark = true
"#,
    );

    match result {
        Err(DortsError::ConfigError(msg)) => assert!(msg.contains("common.dark")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_entry_must_be_table() {
    let result = parse(
        r#"
stray = "value"

[common]
"#,
    );

    match result {
        Err(DortsError::ConfigError(msg)) => assert!(msg.contains("stray")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = parse("[common\nfont = ");
    assert!(matches!(result, Err(DortsError::ConfigParseError { .. })));
}

#[test]
fn test_entry_accessors() {
    let (_, entries) = parse(
        r#"
[common]

[good]
path = "~/x"
enabled = false

[no_path]

[odd]
enabled = "no"
path = true
"#,
    )
    .unwrap();

    assert_eq!(entries[0].path().unwrap(), "~/x");
    assert!(!entries[0].enabled().unwrap());
    assert_eq!(
        entries[0].template_path(Path::new("/conf")),
        PathBuf::from("/conf/good.tmpl")
    );

    assert!(entries[1].enabled().unwrap());
    assert!(matches!(
        entries[1].path(),
        Err(DortsError::MissingPath { entry }) if entry == "no_path"
    ));

    assert!(matches!(entries[2].enabled(), Err(DortsError::ConfigError(_))));
    assert!(matches!(entries[2].path(), Err(DortsError::ConfigError(_))));
}

#[test]
fn test_load_config_from_explicit_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("dorts.toml"),
        "[common]\nfont = \"mono\"\n\n[term]\npath = \"~/.termrc\"\n",
    )
    .unwrap();
    let env = env(&[("HOME", "/home/u"), ("DORTS_DIR", "/elsewhere")]);

    let context = load_config(Some(temp_dir.path()), &env).unwrap();

    assert_eq!(context.config_dir, temp_dir.path());
    assert_eq!(context.home, "/home/u");
    assert_eq!(context.common["font"], "mono");
    assert_eq!(context.entries.len(), 1);
    assert_eq!(context.entries[0].name, "term");
}

#[test]
fn test_load_config_from_env_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("dorts.toml"), "[common]\n").unwrap();
    let dir = temp_dir.path().display().to_string();
    let env = env(&[("HOME", "/home/u"), ("DORTS_DIR", &dir)]);

    let context = load_config(None, &env).unwrap();

    assert_eq!(context.config_dir, temp_dir.path());
    assert!(context.common.is_empty());
    assert!(context.entries.is_empty());
}

#[test]
fn test_load_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let env = env(&[("HOME", "/home/u")]);

    match load_config(Some(temp_dir.path()), &env) {
        Err(DortsError::ConfigReadError { path, .. }) => {
            assert_eq!(path, temp_dir.path().join("dorts.toml"))
        }
        other => panic!("Expected ConfigReadError, got {other:?}"),
    }
}
