//! FAQ document ingestion
//!
//! The source collection is a JSON array of FAQ records. A record's `answer`
//! becomes the document content; `section` and `deep_link` become metadata.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use faqrag_core::{DocMetadata, Document, Error, Result};

#[derive(Debug, Deserialize)]
struct FaqRecord {
    answer: String,
    section: Option<String>,
    deep_link: Option<String>,
}

impl From<FaqRecord> for Document {
    fn from(record: FaqRecord) -> Self {
        Document {
            content: record.answer,
            metadata: DocMetadata {
                section: record.section,
                source: record.deep_link,
            },
        }
    }
}

/// Load the FAQ collection from a JSON file.
///
/// A malformed file is fatal: the caller must not start serving on an
/// ingestion failure.
pub fn load_faq_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|e| {
        Error::Ingestion(format!("cannot read {}: {e}", path.display()))
    })?;

    let records: Vec<FaqRecord> = serde_json::from_str(&raw).map_err(|e| {
        Error::Ingestion(format!("cannot parse {}: {e}", path.display()))
    })?;

    let documents: Vec<Document> = records.into_iter().map(Document::from).collect();

    info!(count = documents.len(), path = %path.display(), "loaded FAQ documents");

    Ok(documents)
}
