// Word valences and the VADER rules (boosters, caps emphasis, negation, "but",
// idioms, punctuation emphasis) come from `vader_sentiment`. This wrapper fits
// its raw output to the SentimentScores contract.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, warn};

use super::emoji::EMOJI;
use super::{SentimentOracle, SentimentScores};

/// Compound scores are reported to four decimals
const COMPOUND_SCALE: f64 = 10_000.0;

static SHARED_ANALYZER: OnceLock<VaderAnalyzer> = OnceLock::new();

/// Raw engine output as (compound, positive, neutral, negative)
type RawScores = (f64, f64, f64, f64);
type RawScorer = Box<dyn Fn(&str) -> RawScores + Send + Sync>;

/// VADER sentiment scorer
pub struct VaderAnalyzer {
    engine: RawScorer,
    emoji: HashMap<char, &'static str>,
}

impl fmt::Debug for VaderAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderAnalyzer")
            .field("emoji", &self.emoji.len())
            .finish_non_exhaustive()
    }
}

impl VaderAnalyzer {
    pub fn new() -> Self {
        let engine = vader_sentiment::SentimentIntensityAnalyzer::new();
        let engine: RawScorer = Box::new(move |text: &str| {
            let raw = engine.polarity_scores(text);
            let field = |name: &str| raw.get(name).copied().unwrap_or(0.0);
            (field("compound"), field("pos"), field("neu"), field("neg"))
        });
        let emoji: HashMap<char, &'static str> = EMOJI.iter().copied().collect();
        debug!("Built VADER analyzer with {} emoji descriptions", emoji.len());
        Self { engine, emoji }
    }

    /// Process-wide instance, built on first use
    pub fn shared() -> &'static VaderAnalyzer {
        SHARED_ANALYZER.get_or_init(VaderAnalyzer::new)
    }

    /// Replace known emoji with their description, padded with spaces
    fn describe_emoji(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut prev_space = true;
        let mut after_emoji = false;
        for ch in text.chars() {
            if ch == '\u{FE0F}' {
                continue;
            }
            match self.emoji.get(&ch) {
                Some(description) => {
                    if !prev_space {
                        out.push(' ');
                    }
                    out.push_str(description);
                    prev_space = false;
                    after_emoji = true;
                }
                None => {
                    if after_emoji && !ch.is_whitespace() {
                        out.push(' ');
                    }
                    out.push(ch);
                    prev_space = ch.is_whitespace();
                    after_emoji = false;
                }
            }
        }
        out.trim().to_string()
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentOracle for VaderAnalyzer {
    fn polarity_scores(&self, text: &str) -> SentimentScores {
        let text = self.describe_emoji(text);
        if text.is_empty() {
            return SentimentScores::NEUTRAL;
        }
        let (compound, positive, neutral, negative) = (self.engine)(&text);
        fit_to_contract(compound, positive, neutral, negative)
    }
}

/// Round the compound score and rescale the shares so they sum to one
///
/// The engine rounds shares to three decimals, so their sum can drift from 1.
/// Text without any scored token yields no shares at all and maps to neutral.
fn fit_to_contract(compound: f64, positive: f64, neutral: f64, negative: f64) -> SentimentScores {
    let compound = if compound.is_finite() {
        (compound.clamp(-1.0, 1.0) * COMPOUND_SCALE).round() / COMPOUND_SCALE
    } else {
        warn!("Engine produced a non-finite compound score: {}", compound);
        0.0
    };

    let shares = [positive, neutral, negative].map(|s| if s.is_finite() { s.abs() } else { 0.0 });
    let mass: f64 = shares.iter().sum();
    if mass <= 0.0 {
        return SentimentScores::new(compound, 0.0, 1.0, 0.0);
    }
    let [positive, neutral, negative] = shares.map(|s| s / mass);
    SentimentScores::new(compound, positive, neutral, negative)
}
