use serde::Serialize;
use std::fmt::Write as _;

use crate::aggregator::{Aggregate, Polarity, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD};
use crate::oracle::SentimentScores;

/// Excerpts longer than this many characters are truncated
pub const EXCERPT_CHARS: usize = 100;

/// Appended to truncated excerpts
pub const TRUNCATION_MARKER: &str = "...";

/// Column names of the paragraph table, present even when it has no rows
pub const PARAGRAPH_COLUMNS: [&str; 3] = ["Paragraph", "Text", "Compound Score"];

/// Lower end of the gauge scale
pub const GAUGE_MIN: f64 = -1.0;
/// Upper end of the gauge scale
pub const GAUGE_MAX: f64 = 1.0;

/// Width of the text gauge, in cells
const GAUGE_WIDTH: usize = 40;

/// A colored region of the overall-score gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub polarity: Polarity,
    pub lower: f64,
    pub upper: f64,
}

impl GaugeBand {
    /// Whether a compound value renders inside this band
    ///
    /// Membership is decided by [`Polarity::classify`] so band edges can never
    /// disagree with the labels.
    pub fn contains(&self, compound: f64) -> bool {
        (GAUGE_MIN..=GAUGE_MAX).contains(&compound) && Polarity::classify(compound) == self.polarity
    }
}

/// Gauge regions from negative to positive
pub fn gauge_bands() -> [GaugeBand; 3] {
    [
        GaugeBand {
            polarity: Polarity::Negative,
            lower: GAUGE_MIN,
            upper: NEGATIVE_THRESHOLD,
        },
        GaugeBand {
            polarity: Polarity::Neutral,
            lower: NEGATIVE_THRESHOLD,
            upper: POSITIVE_THRESHOLD,
        },
        GaugeBand {
            polarity: Polarity::Positive,
            lower: POSITIVE_THRESHOLD,
            upper: GAUGE_MAX,
        },
    ]
}

/// Document compound score and the band it falls in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallScore {
    pub compound: f64,
    pub band: Polarity,
}

impl OverallScore {
    pub fn new(compound: f64) -> Self {
        Self {
            compound,
            band: Polarity::classify(compound),
        }
    }
}

/// One bar of the distribution chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionRow {
    pub sentiment: Polarity,
    pub score: f64,
}

/// Distribution rows in the fixed order Positive, Neutral, Negative
pub fn distribution(scores: &SentimentScores) -> [DistributionRow; 3] {
    Polarity::ALL.map(|sentiment| DistributionRow {
        sentiment,
        score: sentiment.share_of(scores),
    })
}

/// One row of the paragraph table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphRow {
    #[serde(rename = "Paragraph")]
    pub label: String,
    #[serde(rename = "Text")]
    pub excerpt: String,
    #[serde(rename = "Compound Score")]
    pub compound: f64,
}

/// Per-paragraph breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphTable {
    pub columns: [&'static str; 3],
    pub rows: Vec<ParagraphRow>,
}

impl ParagraphTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for ParagraphTable {
    fn default() -> Self {
        Self {
            columns: PARAGRAPH_COLUMNS,
            rows: Vec::new(),
        }
    }
}

/// Truncate to [`EXCERPT_CHARS`] characters plus the marker; shorter text is unchanged
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Complete result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Raw document-level scores
    pub scores: SentimentScores,
    pub overall: OverallScore,
    pub distribution: [DistributionRow; 3],
    pub paragraphs: ParagraphTable,
}

impl AnalysisReport {
    /// Shape aggregator output into the three artifacts
    pub fn assemble(aggregate: Aggregate<'_>) -> Self {
        let rows = aggregate
            .paragraphs
            .iter()
            .map(|p| ParagraphRow {
                label: format!("Paragraph {}", p.index),
                excerpt: excerpt(p.text),
                compound: p.compound,
            })
            .collect();

        Self {
            scores: aggregate.document,
            overall: OverallScore::new(aggregate.document.compound()),
            distribution: distribution(&aggregate.document),
            paragraphs: ParagraphTable {
                columns: PARAGRAPH_COLUMNS,
                rows,
            },
        }
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Overall sentiment: {:+.4} ({})",
            self.overall.compound, self.overall.band
        );
        let _ = writeln!(out, "  {}", render_gauge(self.overall.compound));

        let _ = writeln!(out, "\nSentiment distribution:");
        for row in &self.distribution {
            let bar = "#".repeat((row.score * 20.0).round() as usize);
            let _ = writeln!(out, "  {:<8} {:.3} {}", row.sentiment.label(), row.score, bar);
        }

        let _ = writeln!(out, "\nParagraph analysis:");
        let [label, text, score] = self.paragraphs.columns;
        let _ = writeln!(out, "  {label:<12} | {score:>14} | {text}");
        if self.paragraphs.is_empty() {
            let _ = writeln!(out, "  (no paragraphs over the length threshold)");
        }
        for row in &self.paragraphs.rows {
            let _ = writeln!(
                out,
                "  {:<12} | {:>+14.4} | {}",
                row.label, row.compound, row.excerpt
            );
        }
        out
    }
}

/// Draw the [-1, 1] scale with a marker at `compound`
fn render_gauge(compound: f64) -> String {
    let bands = gauge_bands();
    let marker = (((compound.clamp(GAUGE_MIN, GAUGE_MAX) - GAUGE_MIN) / (GAUGE_MAX - GAUGE_MIN))
        * GAUGE_WIDTH as f64)
        .round() as usize;

    let mut gauge = String::with_capacity(GAUGE_WIDTH + 16);
    gauge.push_str("-1 [");
    for cell in 0..=GAUGE_WIDTH {
        if cell == marker {
            gauge.push('|');
            continue;
        }
        let value = GAUGE_MIN + (GAUGE_MAX - GAUGE_MIN) * cell as f64 / GAUGE_WIDTH as f64;
        let ch = match bands.iter().find(|b| b.contains(value)).map(|b| b.polarity) {
            Some(Polarity::Negative) => '-',
            Some(Polarity::Positive) => '+',
            _ => '.',
        };
        gauge.push(ch);
    }
    gauge.push_str("] +1");
    gauge
}
