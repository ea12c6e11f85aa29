//! office-reprocess: re-run AI processing for stored documents.
//!
//! ```bash
//! office-reprocess doc-001 doc-002
//! office-reprocess --parallel doc-003
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use office_core::{DocumentRepository, OfficeConfig};
use office_db::Database;
use office_jobs::{
    setup, AnnotationMode, DocumentProcessingHandler, Job, JobContext, JobHandler, JobResult,
    JobType,
};

#[derive(Parser)]
#[command(name = "office-reprocess")]
#[command(author, version, about = "Re-run AI classification, tagging and summarization for documents")]
struct Cli {
    /// IDs of the documents to reprocess
    #[arg(required = true, num_args = 1..)]
    document_ids: Vec<String>,

    /// Run classify, tag and summarize concurrently
    #[arg(long)]
    parallel: bool,
}

/// Initialize tracing.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "office_jobs=info,office_inference=info")
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "office_jobs=info,office_inference=info,office_db=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("office-reprocess.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = init_tracing();

    let config = OfficeConfig::from_env()?;
    let db = Database::from_config(&config).await?;
    let repository: Arc<dyn DocumentRepository> = Arc::new(db.documents.clone());

    let mode = if cli.parallel {
        AnnotationMode::Parallel
    } else {
        AnnotationMode::Sequential
    };
    let workflow = Arc::new(setup::workflow_from_config(&config, repository.clone(), mode)?);
    let handler = DocumentProcessingHandler::new(repository, workflow);

    let mut failed = 0usize;
    for document_id in &cli.document_ids {
        let job = Job::new(
            JobType::DocumentProcessing,
            Some(json!({ "document_id": document_id })),
        );
        let job_id = job.id;
        let ctx = JobContext::new(job).with_progress_callback(move |percent, message| {
            debug!(job_id = %job_id, percent, message = message.unwrap_or(""), "Progress");
        });

        match handler.execute(ctx).await {
            JobResult::Success(result) => {
                let summary = result.map(|r| r.to_string()).unwrap_or_default();
                println!("{}\tok\t{}", document_id, summary);
            }
            JobResult::Failed(message) | JobResult::Retry(message) => {
                failed += 1;
                println!("{}\tfailed\t{}", document_id, message);
            }
        }
    }

    info!(
        total = cli.document_ids.len(),
        failed,
        "Reprocessing finished"
    );

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
