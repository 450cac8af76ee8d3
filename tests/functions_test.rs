use dorts::error::{DortsError, DortsResult};
use dorts::functions::{CommandQuery, ResourceFunctions, ResourceQuery};
use std::sync::Arc;

struct StaticQuery(&'static str);

impl ResourceQuery for StaticQuery {
    fn query(&self) -> DortsResult<String> {
        Ok(self.0.to_string())
    }
}

#[test]
fn test_lookup_returns_first_match() {
    let functions = ResourceFunctions::new(Arc::new(StaticQuery(
        "URxvt.font:\txft:mono:size=10\nURxvt.font:\txft:other\n",
    )));

    assert_eq!(functions.lookup("URxvt.font").unwrap(), "xft:mono:size=10");
}

#[test]
fn test_lookup_missing_key() {
    let functions = ResourceFunctions::new(Arc::new(StaticQuery("a:\t1\n")));

    match functions.lookup("b") {
        Err(DortsError::NoMatch { pattern }) => assert_eq!(pattern, "b:\\t(.*)"),
        other => panic!("Expected NoMatch, got {other:?}"),
    }
}

#[test]
fn test_invalid_pattern() {
    let functions = ResourceFunctions::new(Arc::new(StaticQuery("a:\t1\n")));

    assert!(matches!(
        functions.grep("a:(\\t"),
        Err(DortsError::InvalidPattern { .. })
    ));
}

#[test]
fn test_command_not_found() {
    let query = CommandQuery::new("dorts-no-such-command", ["-query"]);

    assert!(matches!(query.query(), Err(DortsError::CommandFailed { .. })));
}

#[cfg(unix)]
#[test]
fn test_command_output_is_captured() {
    let query = CommandQuery::new("sh", ["-c", "printf 'Xft.dpi:\\t96\\n'"]);
    let functions = ResourceFunctions::new(Arc::new(query));

    assert_eq!(functions.lookup("Xft.dpi").unwrap(), "96");
}

#[cfg(unix)]
#[test]
fn test_command_failure_status() {
    let query = CommandQuery::new("sh", ["-c", "exit 3"]);

    match query.query() {
        Err(DortsError::CommandNonZeroExit { command, status }) => {
            assert_eq!(command, "sh -c exit 3");
            assert_eq!(status.code(), Some(3));
        }
        other => panic!("Expected CommandNonZeroExit, got {other:?}"),
    }
}
