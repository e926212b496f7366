// WHY: scoring sits behind a trait so the pipeline depends only on the contract
// (deterministic, pure, total) and not on one particular lexicon engine

use serde::Serialize;

use crate::error::AnalysisError;

pub mod emoji;
pub mod vader;

pub use vader::VaderAnalyzer;

/// Tolerance used when checking that the distribution sums to one
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Polarity scores for a span of text
///
/// `compound` lies in [-1, 1]; `positive`, `neutral` and `negative` lie in [0, 1]
/// and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScores {
    compound: f64,
    positive: f64,
    neutral: f64,
    negative: f64,
}

impl SentimentScores {
    /// Score of text that carries no sentiment at all
    pub const NEUTRAL: SentimentScores = SentimentScores {
        compound: 0.0,
        positive: 0.0,
        neutral: 1.0,
        negative: 0.0,
    };

    pub fn new(compound: f64, positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            compound,
            positive,
            neutral,
            negative,
        }
    }

    pub fn compound(&self) -> f64 {
        self.compound
    }

    pub fn positive(&self) -> f64 {
        self.positive
    }

    pub fn neutral(&self) -> f64 {
        self.neutral
    }

    pub fn negative(&self) -> f64 {
        self.negative
    }

    /// Check the ranges and the distribution sum
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let fields = [
            ("compound", self.compound),
            ("positive", self.positive),
            ("neutral", self.neutral),
            ("negative", self.negative),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::Scoring(format!("{name} is not finite: {value}")));
        }
        if !(-1.0..=1.0).contains(&self.compound) {
            return Err(AnalysisError::Scoring(format!(
                "compound {} outside [-1, 1]",
                self.compound
            )));
        }
        if let Some((name, value)) = fields[1..].iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
            return Err(AnalysisError::Scoring(format!("{name} {value} outside [0, 1]")));
        }
        let sum = self.positive + self.neutral + self.negative;
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(AnalysisError::Scoring(format!(
                "distribution sums to {sum}, expected 1"
            )));
        }
        Ok(())
    }
}

impl Default for SentimentScores {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Maps text to polarity scores
///
/// Implementations must be deterministic and side-effect free, accept any string
/// (empty included) and return [`SentimentScores::NEUTRAL`] for empty input.
pub trait SentimentOracle: Send + Sync {
    fn polarity_scores(&self, text: &str) -> SentimentScores;
}

impl<T: SentimentOracle + ?Sized> SentimentOracle for &T {
    fn polarity_scores(&self, text: &str) -> SentimentScores {
        (**self).polarity_scores(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_valid() {
        assert!(SentimentScores::NEUTRAL.validate().is_ok());
        assert_eq!(SentimentScores::default(), SentimentScores::NEUTRAL);
    }

    #[test]
    fn test_validate_rejects_out_of_range_compound() {
        let scores = SentimentScores::new(1.5, 0.5, 0.5, 0.0);
        assert!(matches!(scores.validate(), Err(AnalysisError::Scoring(_))));
    }

    #[test]
    fn test_validate_rejects_bad_sum() {
        let scores = SentimentScores::new(0.2, 0.5, 0.4, 0.0);
        assert!(matches!(scores.validate(), Err(AnalysisError::Scoring(_))));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let scores = SentimentScores::new(f64::NAN, 0.0, 1.0, 0.0);
        assert!(matches!(scores.validate(), Err(AnalysisError::Scoring(_))));
    }

    #[test]
    fn test_validate_rejects_negative_share() {
        let scores = SentimentScores::new(0.0, -0.1, 1.1, 0.0);
        assert!(matches!(scores.validate(), Err(AnalysisError::Scoring(_))));
    }

    #[test]
    fn test_serializes_field_names() {
        let json = serde_json::to_value(SentimentScores::new(0.5, 0.3, 0.7, 0.0)).unwrap();
        assert_eq!(json["compound"], 0.5);
        assert_eq!(json["positive"], 0.3);
        assert_eq!(json["neutral"], 0.7);
        assert_eq!(json["negative"], 0.0);
    }
}
