use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

use tonescope::batch::{self, BatchConfig};
use tonescope::{AnalysisReport, Analyzer, AnalyzerConfig, SegmentationSource, SegmenterConfig};

#[derive(Parser, Debug)]
#[command(name = "tonescope")]
#[command(about = "Lexicon-based sentiment analysis for text and HTML pages")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    analysis: AnalysisArgs,
}

#[derive(ClapArgs, Debug)]
struct AnalysisArgs {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Segment HTML from the flattened page text instead of its lines
    #[arg(long, global = true)]
    segment_flattened: bool,

    /// Reject HTML the parser reports errors for
    #[arg(long, global = true)]
    strict_markup: bool,

    /// Lines must be longer than this many characters to count as paragraphs
    #[arg(long, global = true, default_value_t = tonescope::segmenter::MIN_PARAGRAPH_CHARS)]
    min_paragraph_chars: usize,

    /// Maximum number of paragraphs analyzed individually
    #[arg(long, global = true, default_value_t = tonescope::segmenter::MAX_PARAGRAPHS)]
    max_paragraphs: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze plain text given as argument, or read from stdin
    Text {
        text: Option<String>,
    },
    /// Analyze an HTML document from a file, or read from stdin
    Html {
        file: Option<PathBuf>,
    },
    /// Analyze files and directories (.txt, .md, .html, .htm) in parallel
    Batch {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Abort on first failed file
        #[arg(long)]
        fail_fast: bool,

        /// Suppress the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

impl AnalysisArgs {
    fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            segmenter: SegmenterConfig {
                min_chars: self.min_paragraph_chars,
                max_paragraphs: self.max_paragraphs,
            },
            segmentation: if self.segment_flattened {
                SegmentationSource::Flattened
            } else {
                SegmentationSource::Lines
            },
            strict_markup: self.strict_markup,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries results only
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let analyzer = Analyzer::with_config(args.analysis.analyzer_config());

    match args.command {
        Command::Text { text } => {
            let text = match text {
                Some(text) => text,
                None => String::from_utf8(read_stdin().await?)
                    .context("stdin is not valid UTF-8")?,
            };
            let report = analyzer.analyze_text(&text).context("Text analysis failed")?;
            print_report(&report, args.analysis.json)?;
        }
        Command::Html { file } => {
            let bytes = match file {
                Some(path) => tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => read_stdin().await?,
            };
            let report = analyzer
                .analyze_html_bytes(&bytes)
                .context("HTML analysis failed")?;
            print_report(&report, args.analysis.json)?;
        }
        Command::Batch {
            paths,
            fail_fast,
            no_progress,
        } => {
            let files = batch::collect_inputs(&paths)?;
            let config = BatchConfig {
                fail_fast,
                show_progress: !no_progress && !args.analysis.json,
                ..BatchConfig::default()
            };
            let outcomes = batch::analyze_files(files, Arc::new(analyzer), config).await?;
            let summary = batch::summarize(&outcomes);

            if args.analysis.json {
                for outcome in &outcomes {
                    println!("{}", serde_json::to_string(outcome)?);
                }
                println!("{}", serde_json::to_string(&serde_json::json!({ "summary": summary }))?);
            } else {
                for outcome in &outcomes {
                    match &outcome.status {
                        batch::FileStatus::Ok { report } => println!(
                            "{:+.4}  {:<8}  {} paragraphs  {}",
                            report.overall.compound,
                            report.overall.band,
                            report.paragraphs.rows.len(),
                            outcome.path
                        ),
                        batch::FileStatus::Failed { kind, message } => {
                            println!("FAILED ({kind})  {}  {message}", outcome.path)
                        }
                    }
                }
                println!(
                    "{} files: {} ok, {} failed ({} positive, {} neutral, {} negative)",
                    summary.files,
                    summary.succeeded,
                    summary.failed,
                    summary.positive,
                    summary.neutral,
                    summary.negative
                );
            }

            if summary.failed > 0 {
                anyhow::bail!("{} of {} files failed", summary.failed, summary.files);
            }
        }
    }

    Ok(())
}

async fn read_stdin() -> Result<Vec<u8>> {
    let mut input = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut input)
        .await
        .context("Failed to read stdin")?;
    Ok(input)
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
