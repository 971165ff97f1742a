use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AuditRecord, ViewMode};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlobError {
    #[error("progress blob could not be decoded: {0}")]
    Decode(String),

    #[error("progress blob could not be encoded: {0}")]
    Encode(String),
}

/// Persisted shape of an audit in progress.
///
/// Every field is optional on read: missing values fall back to an empty
/// record, index 0 and the chapter intro. `viewMode` and `savedAt` are
/// additive; older blobs without them still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBlob {
    pub audit_data: AuditRecord,
    pub current_age_index: i64,
    pub current_skill_index: i64,
    pub show_age_intro: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for ProgressBlob {
    fn default() -> Self {
        Self {
            audit_data: AuditRecord::default(),
            current_age_index: 0,
            current_skill_index: 0,
            show_age_intro: true,
            view_mode: None,
            saved_at: None,
        }
    }
}

impl ProgressBlob {
    /// # Errors
    ///
    /// Returns `BlobError::Decode` if the payload is not JSON or has the wrong shape.
    pub fn decode(raw: &str) -> Result<Self, BlobError> {
        serde_json::from_str(raw).map_err(|err| BlobError::Decode(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `BlobError::Encode` if serialization fails.
    pub fn encode(&self) -> Result<String, BlobError> {
        serde_json::to_string(self).map_err(|err| BlobError::Encode(err.to_string()))
    }

    /// The view to restore: the explicit mode when present, otherwise derived
    /// from the intro flag.
    #[must_use]
    pub fn resolved_view_mode(&self) -> ViewMode {
        self.view_mode.unwrap_or(if self.show_age_intro {
            ViewMode::AgeIntro
        } else {
            ViewMode::SkillPrompt
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    #[test]
    fn missing_fields_take_defaults() {
        let blob = ProgressBlob::decode("{}").unwrap();
        assert_eq!(blob, ProgressBlob::default());
        assert!(blob.show_age_intro);
        assert_eq!(blob.resolved_view_mode(), ViewMode::AgeIntro);
    }

    #[test]
    fn reads_legacy_blob_without_view_mode() {
        let raw = r#"{
            "auditData": {"3": {"sharing": ["Alice"]}},
            "currentAgeIndex": 0,
            "currentSkillIndex": 0,
            "showAgeIntro": false
        }"#;
        let blob = ProgressBlob::decode(raw).unwrap();
        assert_eq!(blob.resolved_view_mode(), ViewMode::SkillPrompt);
        let stored = blob.audit_data.get("3", "sharing").unwrap();
        assert_eq!(stored.as_slice(), &[Person::from("Alice")]);
    }

    #[test]
    fn explicit_view_mode_wins_over_intro_flag() {
        let raw = r#"{"showAgeIntro": true, "viewMode": "chapterSummary"}"#;
        let blob = ProgressBlob::decode(raw).unwrap();
        assert_eq!(blob.resolved_view_mode(), ViewMode::ChapterSummary);
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        assert!(ProgressBlob::decode("not json").is_err());
        assert!(ProgressBlob::decode("[]").is_err());
        assert!(ProgressBlob::decode(r#"{"auditData": {"3": {"x": 7}}}"#).is_err());
    }

    #[test]
    fn encodes_camel_case_keys() {
        let encoded = ProgressBlob::default().encode().unwrap();
        assert!(encoded.contains("\"auditData\""));
        assert!(encoded.contains("\"showAgeIntro\":true"));
        assert!(!encoded.contains("viewMode"));
    }
}
