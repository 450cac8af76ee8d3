//! Destination path handling.

/// Replaces the first `~` in `path` with `home`.
///
/// Only one replacement is made, wherever the `~` appears; this is not shell
/// tilde expansion.
pub fn substitute_home(path: &str, home: &str) -> String {
    path.replacen('~', home, 1)
}
