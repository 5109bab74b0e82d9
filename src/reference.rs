//! Embed references and content segments.
//!
//! These are the values exchanged with the page renderer. Their JSON shape is
//! what `vps-embed parse --json` prints:
//!
//! ```json
//! [
//!   { "kind": "text", "content": "<p>Before</p>" },
//!   { "kind": "embed", "reference": { "kind": "image", "targetId": 3 } },
//!   { "kind": "text", "content": "<p>After</p>" }
//! ]
//! ```

use crate::kind::EmbedKind;
use serde::{Deserialize, Serialize};

/// One embed occurrence: what to render and which record it points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedReference {
    pub kind: EmbedKind,
    /// Gallery, file or page id. Not range-checked against the backend.
    pub target_id: u64,
    /// Raw trailing payload, kept verbatim. Only carousels give it meaning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

impl EmbedReference {
    pub fn new(kind: EmbedKind, target_id: u64) -> Self {
        Self {
            kind,
            target_id,
            extra: None,
        }
    }

    pub fn with_extra(kind: EmbedKind, target_id: u64, extra: impl Into<String>) -> Self {
        Self {
            kind,
            target_id,
            extra: Some(extra.into()),
        }
    }
}

/// A contiguous span of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSegment {
    /// Markup between tags, exactly as written.
    Text { content: String },
    Embed { reference: EmbedReference },
}

impl ContentSegment {
    pub fn text(content: impl Into<String>) -> Self {
        ContentSegment::Text {
            content: content.into(),
        }
    }

    pub fn embed(reference: EmbedReference) -> Self {
        ContentSegment::Embed { reference }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentSegment::Text { content } => Some(content),
            ContentSegment::Embed { .. } => None,
        }
    }

    pub fn as_embed(&self) -> Option<&EmbedReference> {
        match self {
            ContentSegment::Text { .. } => None,
            ContentSegment::Embed { reference } => Some(reference),
        }
    }
}
