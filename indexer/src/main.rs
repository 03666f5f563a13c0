use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tfidf_core::stopwords::STOPWORDS_VERSION;
use tfidf_core::{Document, EngineConfig, Language, Posting, SearchEngine, SimilarityMethod};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a TF-IDF index over plain-text files and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every .txt file under a directory (or a single file)
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Write the inverted index snapshot as JSON to this file
        #[arg(long)]
        output: Option<String>,
        /// Stemming language: english or french
        #[arg(long, default_value = "english")]
        language: Language,
    },
    /// Index the input and rank its documents against a query
    Search {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Free-text query
        #[arg(long)]
        query: String,
        /// Similarity method: cosine or euclidean
        #[arg(long, default_value = "cosine")]
        method: String,
        /// Maximum number of results to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Stemming language: english or french
        #[arg(long, default_value = "english")]
        language: Language,
    },
}

#[derive(Serialize)]
struct SnapshotFile<'a> {
    created_at: String,
    language: Language,
    stopwords_version: u32,
    documents: Vec<String>,
    terms_count: usize,
    index: &'a BTreeMap<String, Vec<Posting>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, language } => build_index(&input, output.as_deref(), language),
        Commands::Search { input, query, method, limit, language } => {
            search(&input, &query, &method, limit, language)
        }
    }
}

fn load_engine(input: &str, language: Language) -> Result<SearchEngine> {
    let docs = load_documents(Path::new(input))?;
    if docs.is_empty() {
        tracing::warn!(input, "no .txt files found");
    }
    let engine = SearchEngine::new(EngineConfig { language, ..EngineConfig::default() });
    let report = engine.ingest(docs);
    for (id, err) in &report.rejected {
        tracing::warn!(id = %id, error = %err, "skipped document");
    }
    Ok(engine)
}

fn build_index(input: &str, output: Option<&str>, language: Language) -> Result<()> {
    let engine = load_engine(input, language)?;
    let snapshot = engine.build();
    let report = snapshot.report();
    println!("{} documents, {} terms", report.document_count, report.term_count);

    if let Some(output) = output {
        let index = snapshot.postings();
        let file = SnapshotFile {
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            language,
            stopwords_version: STOPWORDS_VERSION,
            documents: engine.document_ids(),
            terms_count: report.term_count,
            index: &index,
        };
        fs::write(output, serde_json::to_string_pretty(&file)?)
            .with_context(|| format!("writing snapshot to {output}"))?;
        tracing::info!(output, "snapshot written");
    }
    Ok(())
}

fn search(input: &str, query: &str, method: &str, limit: usize, language: Language) -> Result<()> {
    let method: SimilarityMethod = method.parse()?;
    let engine = load_engine(input, language)?;
    let hits = engine.build().search(query, method)?;
    if hits.is_empty() {
        bail!("no documents indexed under {input}");
    }
    for (rank, hit) in hits.iter().take(limit).enumerate() {
        println!("{:>3}. {:<40} {:.6}", rank + 1, hit.document, hit.score);
    }
    Ok(())
}

/// `.txt` files under `input`, sorted. A file argument is returned as is.
fn collect_text_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files.sort();
    files
}

/// Document ids are paths relative to `input` with `/` separators, or the file name
/// when `input` is a single file.
fn load_documents(input: &Path) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    for file in collect_text_files(input) {
        let rel = file.strip_prefix(input).ok().filter(|r| !r.as_os_str().is_empty());
        let id = match rel {
            Some(rel) => rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/"),
            None => file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
        };
        let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
        docs.push(Document::new(id, text));
    }
    Ok(docs)
}
