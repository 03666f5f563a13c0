use anyhow::Result;
use clap::Parser;
use server::{build_app, DEFAULT_PREVIEW_CHARS};
use std::net::SocketAddr;
use std::sync::Arc;
use tfidf_core::{EngineConfig, Language, SearchEngine};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 5000)]
    port: u16,
    /// Stemming language: english or french
    #[arg(long, default_value = "english")]
    language: Language,
    /// Characters of document text returned with each search result
    #[arg(long, default_value_t = DEFAULT_PREVIEW_CHARS)]
    preview_chars: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let engine = Arc::new(SearchEngine::new(EngineConfig { language: args.language, ..EngineConfig::default() }));
    let app = build_app(engine, args.preview_chars);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, language = %args.language, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
