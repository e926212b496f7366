// WHY: single entry point wiring normalizer -> segmenter -> aggregator -> report
// Every stage runs synchronously; any failure aborts the whole analysis

use tracing::{debug, info, warn};

use crate::aggregator::SentimentAggregator;
use crate::error::AnalysisError;
use crate::normalizer::{ContentNormalizer, NormalizedText, RawInput};
use crate::oracle::{SentimentOracle, VaderAnalyzer};
use crate::report::AnalysisReport;
use crate::segmenter::{ParagraphSegmenter, SegmentationSource, SegmenterConfig};

/// Configuration for an analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Paragraph threshold and cap
    pub segmenter: SegmenterConfig,
    /// Which text HTML input is segmented from
    pub segmentation: SegmentationSource,
    /// Reject HTML the parser reported errors for
    pub strict_markup: bool,
}

/// Text and HTML sentiment analyzer
///
/// Holds no per-call state, so one instance can serve concurrent callers.
pub struct Analyzer<O> {
    normalizer: ContentNormalizer,
    segmenter: ParagraphSegmenter,
    aggregator: SentimentAggregator<O>,
    segmentation: SegmentationSource,
}

impl Analyzer<&'static VaderAnalyzer> {
    /// Analyzer backed by the shared built-in scorer
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self::new(VaderAnalyzer::shared(), config)
    }
}

impl Default for Analyzer<&'static VaderAnalyzer> {
    fn default() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }
}

impl<O: SentimentOracle> Analyzer<O> {
    pub fn new(oracle: O, config: AnalyzerConfig) -> Self {
        Self {
            normalizer: ContentNormalizer::new(config.strict_markup),
            segmenter: ParagraphSegmenter::new(config.segmenter),
            aggregator: SentimentAggregator::new(oracle),
            segmentation: config.segmentation,
        }
    }

    /// Analyze typed or pasted text
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisReport, AnalysisError> {
        self.analyze(&RawInput::PlainText(text.to_string()))
    }

    /// Analyze a fetched HTML document
    pub fn analyze_html(&self, html: &str) -> Result<AnalysisReport, AnalysisError> {
        self.analyze(&RawInput::Html(html.to_string()))
    }

    /// Analyze an HTML body that has not been decoded yet
    pub fn analyze_html_bytes(&self, bytes: &[u8]) -> Result<AnalysisReport, AnalysisError> {
        let normalized = self
            .normalizer
            .normalize_html_bytes(bytes)
            .inspect_err(|e| warn!("Normalization failed: {}", e))?;
        self.analyze_normalized(&normalized)
    }

    pub fn analyze(&self, input: &RawInput) -> Result<AnalysisReport, AnalysisError> {
        let normalized = self
            .normalizer
            .normalize(input)
            .inspect_err(|e| warn!("Normalization failed: {}", e))?;
        self.analyze_normalized(&normalized)
    }

    fn analyze_normalized(&self, normalized: &NormalizedText) -> Result<AnalysisReport, AnalysisError> {
        let segment_source = normalized.segmentation_text(self.segmentation);
        let paragraphs = self.segmenter.segment(&segment_source);
        debug!("Retained {} paragraphs for scoring", paragraphs.len());

        let aggregate = self.aggregator.aggregate(normalized.as_str(), &paragraphs)?;
        let report = AnalysisReport::assemble(aggregate);

        info!(
            compound = report.overall.compound,
            band = %report.overall.band,
            paragraphs = report.paragraphs.rows.len(),
            "Analysis complete"
        );
        Ok(report)
    }
}

/// Analyze plain text with default settings and the shared scorer
pub fn analyze_text(text: &str) -> Result<AnalysisReport, AnalysisError> {
    Analyzer::default().analyze_text(text)
}

/// Analyze an HTML document with default settings and the shared scorer
pub fn analyze_html(html: &str) -> Result<AnalysisReport, AnalysisError> {
    Analyzer::default().analyze_html(html)
}

/// Analyze undecoded HTML bytes with default settings and the shared scorer
pub fn analyze_html_bytes(bytes: &[u8]) -> Result<AnalysisReport, AnalysisError> {
    Analyzer::default().analyze_html_bytes(bytes)
}
