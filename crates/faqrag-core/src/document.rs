//! Document types produced by FAQ ingestion

use serde::{Deserialize, Serialize};

/// Metadata attached to an ingested FAQ document.
///
/// Both fields come from optional record fields in the source collection,
/// so either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    /// FAQ section the document belongs to
    pub section: Option<String>,
    /// Deep link into the source material
    pub source: Option<String>,
}

/// A single ingested document. Immutable after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocMetadata,
}

impl Document {
    pub fn new(content: impl Into<String>, metadata: DocMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}
