//! Language catalog offered by the creation form.

use super::syntax::{alias_for_name, syntax_set};
use crate::models::paste::LanguageOption;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Recognized languages, sorted by alias.
///
/// Built from the bundled syntect grammars on first call and cached for the
/// life of the process. Concurrent first callers block on the same
/// initialization instead of racing.
pub fn list() -> &'static [LanguageOption] {
    static CATALOG: OnceLock<Vec<LanguageOption>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let options = build();
        tracing::info!("Initialized language catalog with {} entries", options.len());
        options
    })
}

fn build() -> Vec<LanguageOption> {
    let mut by_alias: BTreeMap<String, String> = BTreeMap::new();
    for syntax in syntax_set().syntaxes() {
        if syntax.hidden {
            continue;
        }
        let alias = alias_for_name(&syntax.name);
        if alias.is_empty() {
            continue;
        }
        by_alias.entry(alias).or_insert_with(|| syntax.name.clone());
    }
    by_alias
        .into_iter()
        .map(|(alias, display_name)| LanguageOption {
            alias,
            display_name,
        })
        .collect()
}
