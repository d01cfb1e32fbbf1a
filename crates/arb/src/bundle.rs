//! ARB bundle reading, writing and enumeration
//!
//! An ARB bundle is a JSON object mapping message keys to translated
//! strings. Keys prefixed with `@` carry metadata and arbitrary JSON
//! values; the reserved `@@last_modified` key holds the generation
//! timestamp. Serialization is deterministic (sorted keys, pretty
//! printed, trailing newline) so rewriting unchanged content is
//! byte-identical.

use flutterlane_core::error::{Error, ErrorCode, Result, ResultExt};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Reserved key holding the bundle generation timestamp
pub const LAST_MODIFIED_KEY: &str = "@@last_modified";

/// File name of the canonical bundle extracted from source code
pub const CANONICAL_FILE_NAME: &str = "intl_messages.arb";

/// Glob pattern matching all bundles in an output directory
pub const BUNDLE_PATTERN: &str = "intl_*.arb";

/// A parsed ARB translation bundle
#[derive(Debug, Clone, PartialEq)]
pub struct ArbBundle {
    entries: Map<String, Value>,
}

impl ArbBundle {
    /// Parse a bundle from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(Error::new(
                ErrorCode::NotAnObject,
                "ARB content is not a JSON object",
            )),
        }
    }

    /// Read a bundle from disk
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(Error::from)
            .context(format!("While reading {}", path.display()))?;
        Self::from_slice(&bytes).context(format!("While parsing {}", path.display()))
    }

    /// Serialize deterministically: pretty JSON, sorted keys, trailing newline
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(&self.entries)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the bundle back to disk in normalized form
    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)
            .map_err(Error::from)
            .context(format!("While writing {}", path.display()))
    }

    /// Value for a key, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether the bundle contains the key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Translatable message keys (everything not prefixed with `@`)
    pub fn message_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .filter(|k| !k.starts_with('@'))
            .map(String::as_str)
    }

    /// Entries minus the reserved timestamp key, for semantic comparison
    pub fn without_timestamp(&self) -> Map<String, Value> {
        let mut entries = self.entries.clone();
        entries.remove(LAST_MODIFIED_KEY);
        entries
    }
}

/// Whether a path names the canonical source-strings bundle
pub fn is_canonical(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n == CANONICAL_FILE_NAME)
}

/// Derive the locale tag from an `intl_<locale>.arb` file name
///
/// Returns `None` for the canonical bundle and for names outside the
/// convention.
pub fn locale_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let locale = name.strip_prefix("intl_")?.strip_suffix(".arb")?;
    if locale.is_empty() || name == CANONICAL_FILE_NAME {
        return None;
    }
    Some(locale.to_string())
}

/// Enumerate all ARB bundles in a directory, lexicographically sorted
///
/// Sorting is independent of filesystem return order; downstream
/// regeneration depends on a stable file sequence.
pub fn list_locale_bundles(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(BUNDLE_PATTERN);
    let pattern = pattern
        .to_str()
        .ok_or_else(|| Error::io(format!("Non-UTF8 bundle directory: {}", dir.display())))?;

    let mut paths = Vec::new();
    let matches = glob::glob(pattern)
        .map_err(|e| Error::io(format!("Bad bundle pattern {}: {}", pattern, e)))?;
    for entry in matches {
        let path =
            entry.map_err(|e| Error::io(format!("Failed to enumerate bundles: {}", e)))?;
        paths.push(path);
    }

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_slice_object() {
        let bundle = ArbBundle::from_slice(b"{\"@@last_modified\": 1, \"foo\": \"bar\"}").unwrap();
        assert_eq!(bundle.get("foo").unwrap(), "bar");
        assert!(bundle.contains_key(LAST_MODIFIED_KEY));
    }

    #[test]
    fn test_from_slice_rejects_non_object() {
        let err = ArbBundle::from_slice(b"[1, 2]").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAnObject);
    }

    #[test]
    fn test_from_slice_rejects_invalid_json() {
        let err = ArbBundle::from_slice(b"{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::FormatError);
    }

    #[test]
    fn test_message_keys_skip_metadata() {
        let bundle = ArbBundle::from_slice(
            b"{\"@@last_modified\": 1, \"@foo\": {\"type\": \"text\"}, \"foo\": \"bar\"}",
        )
        .unwrap();
        let keys: Vec<&str> = bundle.message_keys().collect();
        assert_eq!(keys, vec!["foo"]);
    }

    #[test]
    fn test_write_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("intl_en.arb");

        let bundle = ArbBundle::from_slice(b"{\"b\": \"2\", \"a\": \"1\"}").unwrap();
        bundle.write(&path).unwrap();
        let first = std::fs::read(&path).unwrap();

        ArbBundle::read(&path).unwrap().write(&path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(first.ends_with(b"\n"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = ArbBundle::read(Path::new("/nonexistent/intl_en.arb")).unwrap_err();
        assert_eq!(err.code.category(), "IO");
    }

    #[test]
    fn test_locale_from_path() {
        assert_eq!(
            locale_from_path(Path::new("lib/l10n/intl_de.arb")),
            Some("de".to_string())
        );
        assert_eq!(locale_from_path(Path::new("lib/l10n/intl_messages.arb")), None);
        assert_eq!(locale_from_path(Path::new("lib/l10n/strings_de.arb")), None);
    }

    #[test]
    fn test_is_canonical() {
        assert!(is_canonical(Path::new("lib/l10n/intl_messages.arb")));
        assert!(!is_canonical(Path::new("lib/l10n/intl_de.arb")));
    }

    #[test]
    fn test_list_locale_bundles_sorted() {
        let tmp = TempDir::new().unwrap();
        // Created out of order on purpose.
        for name in ["intl_ru.arb", "intl_de.arb", "intl_messages.arb", "intl_en.arb"] {
            std::fs::write(tmp.path().join(name), "{}").unwrap();
        }
        std::fs::write(tmp.path().join("notes.txt"), "skip me").unwrap();

        let paths = list_locale_bundles(tmp.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["intl_de.arb", "intl_en.arb", "intl_messages.arb", "intl_ru.arb"]
        );
    }
}
