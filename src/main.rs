use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use faqrag_bedrock::{BedrockClient, TitanEmbeddings};
use faqrag_core::AnswerService;
use faqrag_rag::{AnswerPipeline, FaqRetriever, InMemoryVectorStore, load_faq_documents};
use faqrag_server::{AppState, serve};

#[derive(Parser)]
#[command(name = "faqrag")]
#[command(about = "Retrieval-augmented FAQ answering over AWS Bedrock", long_about = None)]
struct Cli {
    /// Path to the FAQ JSON collection
    #[arg(short, long)]
    data: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Documents retrieved per question
    #[arg(long, default_value_t = 4)]
    top_k: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Ingestion is fatal: we never serve without an index.
    let documents = load_faq_documents(&cli.data)?;

    let embeddings = Arc::new(TitanEmbeddings::from_env()?);
    let store = Arc::new(InMemoryVectorStore::new());
    let retriever = FaqRetriever::new(embeddings, store).with_top_k(cli.top_k);
    let indexed = retriever.build(documents).await?;
    info!(indexed, "vector index ready");

    let generator = Arc::new(BedrockClient::from_env()?);
    info!(
        default_model = generator.registry().default_key(),
        "bedrock client ready"
    );

    let pipeline = AnswerPipeline::new(retriever, generator);
    let service: Arc<dyn AnswerService> = Arc::new(pipeline);

    let addr = format!("{}:{}", cli.host, cli.port);
    serve(&addr, AppState::new(service)).await?;

    Ok(())
}
