// WHY: analyze many local documents concurrently with one shared analyzer
// Each file is an independent analysis; one failure never leaks into another file's result

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::aggregator::Polarity;
use crate::error::AnalysisError;
use crate::oracle::SentimentOracle;
use crate::pipeline::Analyzer;
use crate::report::AnalysisReport;

/// Configuration for batch analysis
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Abort on the first failed file instead of reporting it and continuing
    pub fail_fast: bool,
    /// Upper bound on files analyzed at once
    pub max_concurrency: usize,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_concurrency: num_cpus::get().max(1),
            show_progress: false,
        }
    }
}

/// How a file's content is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Html,
    Text,
}

impl InputKind {
    /// Kind implied by the file extension, `None` for unsupported files
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "html" | "htm" | "xhtml" => Some(InputKind::Html),
            "txt" | "text" | "md" => Some(InputKind::Text),
            _ => None,
        }
    }
}

/// Result of analyzing one file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
    Ok { report: AnalysisReport },
    Failed { kind: String, message: String },
}

/// Per-file outcome with timing
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: String,
    #[serde(rename = "input")]
    pub input_kind: InputKind,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, FileStatus::Ok { .. })
    }
}

/// Aggregate counts for a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub total_ms: u64,
}

/// Expand the given paths into the files to analyze
///
/// Files named explicitly are always included. Directories are walked recursively
/// and contribute only files with a supported extension, in sorted order.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Input path does not exist: {}", path.display()))?;
        if metadata.is_file() {
            inputs.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path).follow_links(false) {
            let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && InputKind::from_path(entry.path()).is_some() {
                debug!("Found input file: {}", entry.path().display());
                found.push(entry.into_path());
            }
        }
        found.sort();
        info!("Found {} input files under {}", found.len(), path.display());
        inputs.extend(found);
    }
    Ok(inputs)
}

/// Analyze every file, returning outcomes in input order
pub async fn analyze_files<O>(
    files: Vec<PathBuf>,
    analyzer: Arc<Analyzer<O>>,
    config: BatchConfig,
) -> Result<Vec<FileOutcome>>
where
    O: SentimentOracle + 'static,
{
    info!(
        "Analyzing {} files with concurrency {}",
        files.len(),
        config.max_concurrency
    );

    let progress = if config.show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} files {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut outcomes_stream = stream::iter(files)
        .map(|path| analyze_file(path, Arc::clone(&analyzer)))
        .buffered(config.max_concurrency.max(1));

    let mut outcomes = Vec::new();
    while let Some(outcome) = outcomes_stream.next().await {
        progress.inc(1);
        if let FileStatus::Failed { kind, message } = &outcome.status {
            warn!("Analysis of {} failed ({}): {}", outcome.path, kind, message);
            if config.fail_fast {
                progress.abandon();
                anyhow::bail!("Analysis of {} failed: {}", outcome.path, message);
            }
        }
        outcomes.push(outcome);
    }
    progress.finish_and_clear();

    Ok(outcomes)
}

/// Read and analyze one file on the blocking pool
pub async fn analyze_file<O>(path: PathBuf, analyzer: Arc<Analyzer<O>>) -> FileOutcome
where
    O: SentimentOracle + 'static,
{
    let start = Instant::now();
    let kind = InputKind::from_path(&path).unwrap_or(InputKind::Text);

    let status = match tokio::fs::read(&path).await {
        Err(e) => FileStatus::Failed {
            kind: "io".to_string(),
            message: format!("Failed to read {}: {}", path.display(), e),
        },
        Ok(bytes) => {
            let task = tokio::task::spawn_blocking(move || match kind {
                InputKind::Html => analyzer.analyze_html_bytes(&bytes),
                InputKind::Text => std::str::from_utf8(&bytes)
                    .map_err(AnalysisError::from)
                    .and_then(|text| analyzer.analyze_text(text)),
            });
            match task.await {
                Ok(Ok(report)) => FileStatus::Ok { report },
                Ok(Err(e)) => FileStatus::Failed {
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                },
                Err(e) => FileStatus::Failed {
                    kind: "internal".to_string(),
                    message: format!("Analysis task failed: {e}"),
                },
            }
        }
    };

    FileOutcome {
        path: path.display().to_string(),
        input_kind: kind,
        duration_ms: start.elapsed().as_millis() as u64,
        status,
    }
}

/// Count successes, failures and document bands
pub fn summarize(outcomes: &[FileOutcome]) -> BatchSummary {
    let mut summary = BatchSummary {
        files: outcomes.len(),
        ..BatchSummary::default()
    };
    for outcome in outcomes {
        summary.total_ms += outcome.duration_ms;
        match &outcome.status {
            FileStatus::Ok { report } => {
                summary.succeeded += 1;
                match report.overall.band {
                    Polarity::Positive => summary.positive += 1,
                    Polarity::Neutral => summary.neutral += 1,
                    Polarity::Negative => summary.negative += 1,
                }
            }
            FileStatus::Failed { .. } => summary.failed += 1,
        }
    }
    summary
}
