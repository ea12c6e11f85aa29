//! Domain models for documents and their AI annotations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// A stored document as owned by the document subsystem.
///
/// The AI workflow only ever changes `description`, `category`, `tags` and
/// `updated_at`; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Free text. Overwritten by the generated summary on every workflow run.
    pub description: String,
    /// Path of the stored bytes, absolute or relative to the storage root.
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub owner_id: String,
    pub team_id: String,
    pub status: String,
    /// Single free-form classification label.
    pub category: String,
    /// Ordered tag list serialized as a JSON array (see [`encode_tags`]).
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a document with empty annotation fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        file_path: impl Into<String>,
        mime_type: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            file_path: file_path.into(),
            file_size: 0,
            mime_type: mime_type.into(),
            owner_id: owner_id.into(),
            team_id: String::new(),
            status: "active".to_string(),
            category: String::new(),
            tags: "[]".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Decode the stored tags field back into the ordered tag list.
    ///
    /// An empty stored value (never annotated) decodes to an empty list.
    pub fn decoded_tags(&self) -> Result<Vec<String>> {
        decode_tags(&self.tags)
    }
}

/// Transient output of one annotation run.
///
/// All three fields are populated together or the value does not exist;
/// the pipeline never builds a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub classification: String,
    pub tags: Vec<String>,
    pub summary: String,
}

/// Encode an ordered tag list as a JSON array string.
///
/// Order and duplicates are preserved, an empty list encodes as `[]`.
pub fn encode_tags(tags: &[String]) -> String {
    JsonValue::from(tags.to_vec()).to_string()
}

/// Decode a JSON array string produced by [`encode_tags`].
pub fn decode_tags(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_tags_keeps_order() {
        assert_eq!(encode_tags(&tags(&["技术", "测试"])), "[\"技术\",\"测试\"]");
    }

    #[test]
    fn test_encode_empty_tags() {
        assert_eq!(encode_tags(&[]), "[]");
    }

    #[test]
    fn test_encode_tags_keeps_duplicates() {
        assert_eq!(encode_tags(&tags(&["b", "a", "b"])), "[\"b\",\"a\",\"b\"]");
    }

    #[test]
    fn test_encode_tags_escapes_quotes() {
        let original = tags(&["say \"hi\"", "back\\slash", "line\nbreak"]);
        let encoded = encode_tags(&original);
        assert_eq!(decode_tags(&encoded).unwrap(), original);
    }

    #[test]
    fn test_decode_tags_inverts_encode() {
        for case in [
            tags(&[]),
            tags(&["技术", "测试"]),
            tags(&["z", "a", "m", "a"]),
            tags(&["", " padded "]),
        ] {
            assert_eq!(decode_tags(&encode_tags(&case)).unwrap(), case);
        }
    }

    #[test]
    fn test_decode_blank_tags() {
        assert!(decode_tags("").unwrap().is_empty());
        assert!(decode_tags("   ").unwrap().is_empty());
    }

    #[test]
    fn test_decode_invalid_tags() {
        assert!(decode_tags("not json").is_err());
        assert!(decode_tags("{\"a\":1}").is_err());
    }

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new("doc-1", "Report", "reports/q1.pdf", "application/pdf", "u1");
        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.tags, "[]");
        assert!(doc.description.is_empty());
        assert!(doc.category.is_empty());
        assert!(doc.decoded_tags().unwrap().is_empty());
        assert_eq!(doc.created_at, doc.updated_at);
    }
}
