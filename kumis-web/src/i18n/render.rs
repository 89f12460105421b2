use super::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(root, |node, part| node.get(part))
        .and_then(Value::as_str)
}

fn interpolate(mut text: String, args: Option<&BTreeMap<&str, &str>>) -> String {
    if let Some(args) = args {
        for (k, v) in args {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    text
}

/// Translate a key in the current language, falling back to English.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate with `{name}` placeholders filled from `args`.
/// Missing keys render as the key itself.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    let found = with_bundle(|bundle| {
        lookup(&bundle.translations, key)
            .or_else(|| lookup(&bundle.fallback, key))
            .map(str::to_string)
    });
    found.map_or_else(|| key.to_string(), |text| interpolate(text, args))
}
