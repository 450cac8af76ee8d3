//! Variable scopes handed to templates.

use crate::config::Setting;
use crate::constants::RESERVED_KEYS;
use indexmap::IndexMap;

/// Variable name to value lookup table used for template interpolation.
pub type Scope = IndexMap<String, String>;

/// Returns true for settings keys consumed by the orchestrator itself.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Builds the effective scope of an entry.
///
/// Starts from a copy of `common` and overlays every non-reserved setting.
/// Entry values win on collision; booleans stringify as `true`/`false`.
pub fn resolve_scope(common: &Scope, settings: &IndexMap<String, Setting>) -> Scope {
    let mut scope = common.clone();
    for (key, value) in settings {
        if is_reserved_key(key) {
            continue;
        }
        scope.insert(key.clone(), value.to_string());
    }
    scope
}
