use once_cell::sync::Lazy;
use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DEFAULT_LANG: &str = "id";
pub(super) const FALLBACK_LANG: &str = "en";

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "id",
        name: "Bahasa Indonesia",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("id", include_str!("../../i18n/id.json")),
    ("en", include_str!("../../i18n/en.json")),
];

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

pub(super) fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang)
}

/// Parsed once per process; a locale that fails to parse stays `None`.
static PARSED: Lazy<Vec<(&'static str, Option<Value>)>> = Lazy::new(|| {
    LOCALE_TABLE
        .iter()
        .map(|(code, raw)| match serde_json::from_str(raw) {
            Ok(value) => (*code, Some(value)),
            Err(err) => {
                log::warn!("i18n/{code}.json is invalid: {err}");
                (*code, None)
            }
        })
        .collect()
});

pub(super) fn load_translations(lang: &str) -> Option<Value> {
    PARSED
        .iter()
        .find(|(code, _)| *code == lang)
        .and_then(|(_, value)| value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_parses() {
        for meta in locales() {
            assert!(load_translations(meta.code).is_some_and(|v| v.is_object()));
        }
        assert!(load_translations("xx").is_none());
        assert!(is_supported(DEFAULT_LANG));
        assert!(is_supported(FALLBACK_LANG));
    }
}
