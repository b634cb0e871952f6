//! The question → answer pipeline
//!
//! One request runs the stages strictly in sequence: retrieve, format the
//! context block, render the prompt, generate, assemble the result. A
//! failure at retrieval or generation aborts the whole request; nothing is
//! retried and no partial answer is produced.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use faqrag_core::{
    AnswerResult, AnswerService, EmbeddingProvider, Result, ScoredDocument, TextGenerator,
    VectorStore,
};

use crate::retriever::FaqRetriever;

/// Join retrieved document contents into one context block, a blank line
/// between documents, retrieval order preserved.
pub fn format_context(documents: &[ScoredDocument]) -> String {
    documents
        .iter()
        .map(|d| d.document.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Source deep links aligned with retrieval order. A document without a
/// source contributes an empty string so alignment with the context is kept.
fn collect_sources(documents: &[ScoredDocument]) -> Vec<String> {
    documents
        .iter()
        .map(|d| d.document.metadata.source.clone().unwrap_or_default())
        .collect()
}

/// Render the fixed answering prompt
pub fn render_prompt(context: &str, question: &str) -> String {
    format!(
        "Use the following pieces of context to answer the question at the end.\n\
         If you don't know the answer from the provided context, just say that your \
         training materials don't include this information, don't try to make up an answer.\n\
         Keep the answer as concise as possible.\n\
         \n\
         {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Helpful Answer:"
    )
}

/// End-to-end answer pipeline over a retriever and a text generator
pub struct AnswerPipeline<E, V, G>
where
    E: EmbeddingProvider,
    V: VectorStore,
    G: TextGenerator,
{
    retriever: FaqRetriever<E, V>,
    generator: Arc<G>,
}

impl<E, V, G> AnswerPipeline<E, V, G>
where
    E: EmbeddingProvider,
    V: VectorStore,
    G: TextGenerator,
{
    /// Create a new pipeline
    pub fn new(retriever: FaqRetriever<E, V>, generator: Arc<G>) -> Self {
        Self {
            retriever,
            generator,
        }
    }
}

#[async_trait]
impl<E, V, G> AnswerService for AnswerPipeline<E, V, G>
where
    E: EmbeddingProvider + 'static,
    V: VectorStore + 'static,
    G: TextGenerator + 'static,
{
    async fn answer(&self, question: &str, model: Option<&str>) -> Result<AnswerResult> {
        let retrieved = self.retriever.retrieve(question).await?;

        // An empty retrieval still renders a prompt and invokes generation;
        // the template tells the model what to do with missing context.
        let context = format_context(&retrieved);
        let sources = collect_sources(&retrieved);
        let prompt = render_prompt(&context, question);

        let raw = self.generator.generate(model, &prompt).await?;
        let answer = raw.trim().to_string();

        info!(
            retrieved = retrieved.len(),
            answer_len = answer.len(),
            "answered question"
        );

        Ok(AnswerResult {
            answer,
            sources,
            context: retrieved.into_iter().map(|d| d.document).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqrag_core::{DocMetadata, Document};

    fn scored(content: &str, source: Option<&str>) -> ScoredDocument {
        ScoredDocument {
            document: Document::new(
                content,
                DocMetadata {
                    section: None,
                    source: source.map(str::to_string),
                },
            ),
            score: 1.0,
        }
    }

    #[test]
    fn context_joins_documents_with_blank_line() {
        let docs = vec![scored("A", None), scored("B", None)];
        assert_eq!(format_context(&docs), "A\n\nB");
    }

    #[test]
    fn formatting_is_idempotent() {
        let docs = vec![scored("first", None), scored("second", None)];
        assert_eq!(format_context(&docs), format_context(&docs));
    }

    #[test]
    fn empty_retrieval_yields_empty_context() {
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn sources_keep_alignment_and_duplicates() {
        let docs = vec![
            scored("A", Some("https://faq/a")),
            scored("B", None),
            scored("C", Some("https://faq/a")),
        ];
        assert_eq!(
            collect_sources(&docs),
            vec!["https://faq/a".to_string(), String::new(), "https://faq/a".to_string()]
        );
    }

    #[test]
    fn prompt_contains_context_and_question() {
        let prompt = render_prompt("X is a fruit.", "What is X?");
        assert!(prompt.contains("X is a fruit."));
        assert!(prompt.contains("Question: What is X?"));
        assert!(prompt.ends_with("Helpful Answer:"));
    }

    #[test]
    fn prompt_is_non_empty_for_empty_context() {
        let prompt = render_prompt("", "What is X?");
        assert!(!prompt.is_empty());
        assert!(prompt.contains("Question: What is X?"));
    }
}
