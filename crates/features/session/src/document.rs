use crate::error::{SessionError, SessionErrorExt};
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use vanity_domain::ChoiceMap;

/// Current document format revision.
pub const FORMAT_VERSION: u16 = 1;

/// Longest accepted session id.
pub const MAX_ID_LEN: usize = 64;

const fn current_version() -> u16 {
    FORMAT_VERSION
}

/// Ids name files on disk: ASCII letters, digits, `_` and `-` only.
fn valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// The persisted state of one configuration session.
///
/// Only settled selections are ever written; the document itself does not validate
/// `choices` against a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionDocument {
    pub id: String,
    pub product: String,
    #[serde(default = "current_version")]
    pub version: u16,
    pub choices: ChoiceMap,
    #[serde(default, with = "crate::metadata")]
    pub metadata: Metadata,
}

impl SessionDocument {
    #[must_use]
    pub fn new(id: impl Into<String>, product: impl Into<String>, choices: ChoiceMap) -> Self {
        Self {
            id: id.into(),
            product: product.into(),
            version: FORMAT_VERSION,
            choices,
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Serializes the document as pretty JSON.
    ///
    /// # Errors
    /// Returns [`SessionError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string_pretty(self).context("Failed to serialize session")
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    /// Returns [`SessionError::Json`] for malformed input,
    /// [`SessionError::UnsupportedVersion`] for documents newer than [`FORMAT_VERSION`] and
    /// [`SessionError::InvalidId`] for ids that cannot name a file.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let document: Self = serde_json::from_str(json).context("Failed to parse session")?;
        document.checked()
    }

    /// Serializes the document with postcard.
    ///
    /// # Errors
    /// Returns [`SessionError::Binary`] if serialization fails.
    pub fn encode_bin(&self) -> Result<Vec<u8>, SessionError> {
        postcard::to_stdvec(self).context("Failed to encode session")
    }

    /// Decodes a postcard document.
    ///
    /// # Errors
    /// Returns [`SessionError::Binary`] for corrupted input, otherwise as
    /// [`SessionDocument::from_json`].
    pub fn decode_bin(bytes: &[u8]) -> Result<Self, SessionError> {
        let document: Self = postcard::from_bytes(bytes).context("Failed to decode session")?;
        document.checked()
    }

    /// Decodes either encoding: input whose first non-blank byte is `{` is read as JSON.
    ///
    /// # Errors
    /// As [`SessionDocument::from_json`] or [`SessionDocument::decode_bin`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SessionError> {
        if bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{') {
            let json = std::str::from_utf8(bytes)
                .map_err(|e| SessionError::from(format!("session is not UTF-8: {e}")))?;
            return Self::from_json(json);
        }
        Self::decode_bin(bytes)
    }

    /// Writes `<directory>/<id>.json`, creating the directory when missing.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidId`] if the id cannot name a file,
    /// [`SessionError::Io`] on file system failures and [`SessionError::Json`] if
    /// serialization fails.
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<PathBuf, SessionError> {
        if !valid_id(&self.id) {
            return Err(SessionError::InvalidId { id: self.id.clone(), context: None });
        }
        let directory = directory.as_ref();
        fs::create_dir_all(directory).context("Failed to create session directory")?;

        let path = directory.join(format!("{}.json", self.id));
        fs::write(&path, self.to_json()?).context("Failed to write session")?;
        debug!(id = %self.id, path = %path.display(), "Session written");
        Ok(path)
    }

    /// Reads a document in either encoding.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if the file cannot be read, otherwise as
    /// [`SessionDocument::decode`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let bytes = fs::read(path.as_ref()).context("Failed to read session")?;
        Self::decode(&bytes)
    }

    fn checked(self) -> Result<Self, SessionError> {
        if self.version > FORMAT_VERSION {
            return Err(SessionError::UnsupportedVersion { version: self.version, context: None });
        }
        if !valid_id(&self.id) {
            return Err(SessionError::InvalidId { id: self.id, context: None });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanity_domain::{ChoiceValue, SlotType};

    fn sample() -> SessionDocument {
        let choices = [
            (SlotType::Breadth, ChoiceValue::Number(46)),
            (SlotType::Top, ChoiceValue::text("insert-basin")),
            (SlotType::Handle, ChoiceValue::None),
        ]
        .into_iter()
        .collect();
        SessionDocument::new("cfg_test", "vanity", choices)
            .with_metadata("lead", "L-1")
            .with_metadata("room", serde_json::json!({ "wall": 2.4, "tags": ["guest", 2] }))
    }

    #[test]
    fn json_shape_uses_scalar_choices() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "cfg_test",
                "product": "vanity",
                "version": 1,
                "choices": { "breadth": 46, "top": "insert-basin", "handle": null },
                "metadata": { "lead": "L-1", "room": { "wall": 2.4, "tags": ["guest", 2] } }
            })
        );
    }

    #[test]
    fn version_and_metadata_are_optional_in_json() {
        let doc = SessionDocument::from_json(
            r#"{ "id": "cfg_a", "product": "vanity", "choices": { "width": 80 } }"#,
        )
        .unwrap();
        assert_eq!(doc.version, FORMAT_VERSION);
        assert!(doc.metadata.is_empty());
        assert_eq!(doc.choices.number(SlotType::Width), Some(80));
    }

    #[test]
    fn newer_versions_are_rejected() {
        let err = SessionDocument::from_json(
            r#"{ "id": "cfg_a", "product": "vanity", "version": 9, "choices": {} }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedVersion { version: 9, .. }));
    }

    #[test]
    fn decode_sniffs_the_encoding() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        let padded = format!("\n  {json}");

        assert_eq!(SessionDocument::decode(padded.as_bytes()).unwrap(), doc);
        assert_eq!(SessionDocument::decode(&doc.encode_bin().unwrap()).unwrap(), doc);
    }

    #[test]
    fn ids_that_leave_the_directory_are_rejected() {
        for id in ["../escaped", "a/b", "a\\b", "", "cfg .json"] {
            let json = serde_json::json!({ "id": id, "product": "vanity", "choices": {} });
            let err = SessionDocument::from_json(&json.to_string()).unwrap_err();
            assert!(matches!(err, SessionError::InvalidId { .. }), "{id:?} -> {err}");
        }
        assert!(valid_id("cfg_eT6fWPmJtRZ9"));
        assert!(!valid_id(&"x".repeat(MAX_ID_LEN + 1)));
    }

    #[test]
    fn binary_documents_with_bad_ids_are_rejected() {
        let mut doc = sample();
        doc.id = "../escaped".to_owned();
        let bytes = doc.encode_bin().unwrap();
        assert_eq!(SessionDocument::decode_bin(&bytes).unwrap_err().kind(), "InvalidId");
    }

    #[test]
    fn garbage_is_a_binary_error() {
        let err = SessionDocument::decode(&[0xff, 0xff, 0xff]).unwrap_err();
        assert_eq!(err.kind(), "Binary");
    }
}
