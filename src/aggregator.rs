// WHY: document and paragraph scores come from independent oracle calls
// Paragraph scores are never averaged into the document score

use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::error::AnalysisError;
use crate::oracle::{SentimentOracle, SentimentScores};
use crate::segmenter::SegmentedParagraph;

/// Compound scores at or above this are positive
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Discrete sentiment class derived from a compound score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Neutral,
    Negative,
}

impl Polarity {
    /// Fixed display order used by the distribution
    pub const ALL: [Polarity; 3] = [Polarity::Positive, Polarity::Neutral, Polarity::Negative];

    /// Classify a compound score; the single source of truth for every label and band
    pub fn classify(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Polarity::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Positive => "Positive",
            Polarity::Neutral => "Neutral",
            Polarity::Negative => "Negative",
        }
    }

    /// The share of this class in a score's distribution
    pub fn share_of(&self, scores: &SentimentScores) -> f64 {
        match self {
            Polarity::Positive => scores.positive(),
            Polarity::Neutral => scores.neutral(),
            Polarity::Negative => scores.negative(),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A retained paragraph with its own compound score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredParagraph<'a> {
    pub index: usize,
    pub text: &'a str,
    pub compound: f64,
}

/// Scores for one document and its paragraphs
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<'a> {
    pub document: SentimentScores,
    pub paragraphs: Vec<ScoredParagraph<'a>>,
}

/// Runs the scoring oracle over a document and its paragraphs
pub struct SentimentAggregator<O> {
    oracle: O,
}

impl<O: SentimentOracle> SentimentAggregator<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Score the whole document once and each paragraph once
    pub fn aggregate<'a>(
        &self,
        document: &str,
        paragraphs: &[SegmentedParagraph<'a>],
    ) -> Result<Aggregate<'a>, AnalysisError> {
        let document_scores = self.score(document)?;

        let paragraphs = paragraphs
            .iter()
            .map(|p| {
                Ok(ScoredParagraph {
                    index: p.index,
                    text: p.text,
                    compound: self.score(p.text)?.compound(),
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        debug!(
            compound = document_scores.compound(),
            paragraphs = paragraphs.len(),
            "Aggregated document sentiment"
        );

        Ok(Aggregate {
            document: document_scores,
            paragraphs,
        })
    }

    fn score(&self, text: &str) -> Result<SentimentScores, AnalysisError> {
        let scores = self.oracle.polarity_scores(text);
        if let Err(e) = scores.validate() {
            warn!("Scoring oracle broke its contract: {}", e);
            return Err(e);
        }
        Ok(scores)
    }
}
