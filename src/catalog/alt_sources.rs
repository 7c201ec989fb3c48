//! Alternate source annotations
//!
//! A secondary document that numbers some items and lists acquisition
//! methods which replace the primary sources in the detail view. The file
//! is optional and any failure to read it is logged and ignored.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One acquisition method of an alternate entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AltMethod {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
}

/// Alternate entry for one item
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AltSource {
    #[serde(rename = "action")]
    pub item_id: u32,
    #[serde(rename = "no", default)]
    pub number: Option<u32>,
    #[serde(rename = "method", default)]
    pub methods: Vec<AltMethod>,
}

/// Alternate entries keyed by item id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltSourceIndex(HashMap<u32, AltSource>);

impl AltSourceIndex {
    /// Parse the alternate document
    ///
    /// Later entries for the same item id replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the document is not an array of entries.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<AltSource> = serde_json::from_str(json)?;
        Ok(entries.into_iter().collect())
    }

    /// Load the alternate document, degrading to an empty index
    ///
    /// A missing path, unreadable file or malformed document yields an empty
    /// index; the cause is logged.
    #[must_use]
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no alternate sources");
                return Self::default();
            }
        };

        match Self::from_json_str(&contents) {
            Ok(index) => {
                tracing::info!(path = %path.display(), entries = index.len(), "loaded alternate sources");
                index
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed alternate sources");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn get(&self, item_id: u32) -> Option<&AltSource> {
        self.0.get(&item_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AltSource> for AltSourceIndex {
    fn from_iter<I: IntoIterator<Item = AltSource>>(iter: I) -> Self {
        Self(iter.into_iter().map(|entry| (entry.item_id, entry)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"[
        {"action": 11383, "no": 1, "method": [{"type": "Duty", "name": "The Aurum Vale", "place": "Coerthas"}]},
        {"action": 11384, "method": []}
    ]"#;

    #[test]
    fn test_parse_entries() {
        let index = AltSourceIndex::from_json_str(SAMPLE).unwrap();
        assert_eq!(index.len(), 2);

        let entry = index.get(11383).unwrap();
        assert_eq!(entry.number, Some(1));
        assert_eq!(entry.methods[0].kind.as_deref(), Some("Duty"));
        assert_eq!(entry.methods[0].place.as_deref(), Some("Coerthas"));

        let bare = index.get(11384).unwrap();
        assert_eq!(bare.number, None);
        assert!(bare.methods.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let index = AltSourceIndex::load_or_empty(Some(Path::new("/nonexistent/alt.json")));
        assert!(index.is_empty());
        assert!(AltSourceIndex::load_or_empty(None).is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        assert!(AltSourceIndex::load_or_empty(Some(file.path())).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        let index = AltSourceIndex::load_or_empty(Some(file.path()));
        assert_eq!(index.len(), 2);
    }
}
