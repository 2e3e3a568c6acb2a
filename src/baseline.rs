use crate::models::MetaTags;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Baseline path used by `--update-baseline` when `--baseline` is not given
pub const DEFAULT_BASELINE_PATH: &str = "og-baseline.json";

/// Persisted `{finalUrl, meta}` snapshot used to detect preview drift
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    #[serde(default)]
    pub final_url: String,
    #[serde(default)]
    pub meta: MetaTags,
}

impl Baseline {
    pub fn new(final_url: impl Into<String>, meta: MetaTags) -> Self {
        Self {
            final_url: final_url.into(),
            meta,
        }
    }

    /// Loads a baseline, returning `None` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No baseline file, skipping comparison");
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read baseline file: {}", path.display()))?;
        let baseline = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse baseline file: {}", path.display()))?;

        Ok(Some(baseline))
    }

    /// Writes the whole snapshot as pretty-printed JSON, replacing any previous file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write baseline file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), keys = self.meta.len(), "Baseline written");
        Ok(())
    }
}

/// Lists field-level differences between the current snapshot and a baseline.
///
/// Baseline keys come first, then keys only present in `current`, then
/// `finalUrl`. Absent values display as empty strings.
pub fn diff_baseline(current: &Baseline, baseline: &Baseline) -> Vec<String> {
    let mut diffs = Vec::new();

    let keys = baseline
        .meta
        .keys()
        .chain(current.meta.keys().filter(|k| !baseline.meta.contains_key(*k)));

    for key in keys {
        let now = current.meta.get(key);
        let before = baseline.meta.get(key);
        if now != before {
            diffs.push(format_diff(
                key,
                before.map(String::as_str).unwrap_or(""),
                now.map(String::as_str).unwrap_or(""),
            ));
        }
    }

    if current.final_url != baseline.final_url {
        diffs.push(format_diff(
            "finalUrl",
            &baseline.final_url,
            &current.final_url,
        ));
    }

    diffs
}

fn format_diff(key: &str, before: &str, after: &str) -> String {
    format!("{}: '{}' -> '{}'", key, before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn meta(pairs: &[(&str, &str)]) -> MetaTags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_changed_value_yields_single_line() {
        let current = Baseline::new("https://a", meta(&[("og:title", "New")]));
        let baseline = Baseline::new("https://a", meta(&[("og:title", "Old")]));

        assert_eq!(
            diff_baseline(&current, &baseline),
            vec!["og:title: 'Old' -> 'New'".to_string()]
        );
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        let snapshot = Baseline::new(
            "https://a",
            meta(&[("og:title", "Same"), ("twitter:card", "summary")]),
        );
        assert!(diff_baseline(&snapshot, &snapshot.clone()).is_empty());
    }

    #[test]
    fn test_added_and_removed_keys() {
        let current = Baseline::new("https://a", meta(&[("og:image", "https://a/new.png")]));
        let baseline = Baseline::new("https://a", meta(&[("og:title", "Gone")]));

        assert_eq!(
            diff_baseline(&current, &baseline),
            vec![
                "og:title: 'Gone' -> ''".to_string(),
                "og:image: '' -> 'https://a/new.png'".to_string(),
            ]
        );
    }

    #[test]
    fn test_final_url_change_is_last() {
        let current = Baseline::new("https://b", meta(&[("og:title", "New")]));
        let baseline = Baseline::new("https://a", meta(&[("og:title", "Old")]));

        let diffs = diff_baseline(&current, &baseline);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[1], "finalUrl: 'https://a' -> 'https://b'");
    }

    #[test]
    fn test_save_then_load_round_trip_has_no_diff() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("og-baseline.json");
        let snapshot = Baseline::new(
            "https://example.com/",
            meta(&[("og:title", "Example"), ("canonical", "https://example.com/")]),
        );

        snapshot.save(&path).unwrap();
        let loaded = Baseline::load(&path).unwrap().expect("baseline should exist");

        assert_eq!(loaded, snapshot);
        assert!(diff_baseline(&snapshot, &loaded).is_empty());
    }

    #[test]
    fn test_saved_format_is_pretty_camel_case() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("baseline.json");
        Baseline::new("https://a", meta(&[("og:title", "T")]))
            .save(&path)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "{\n  \"finalUrl\": \"https://a\",\n  \"meta\": {\n    \"og:title\": \"T\"\n  }\n}"
        );
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let result = Baseline::load(&dir.path().join("absent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Baseline::load(&path).is_err());
    }
}
