pub mod aggregator;
pub mod batch;
pub mod error;
pub mod normalizer;
pub mod oracle;
pub mod pipeline;
pub mod report;
pub mod segmenter;

// Re-export main types for convenient access
pub use aggregator::{Polarity, SentimentAggregator};
pub use error::AnalysisError;
pub use normalizer::{ContentNormalizer, NormalizedText, RawInput};
pub use oracle::{SentimentOracle, SentimentScores, VaderAnalyzer};
pub use pipeline::{analyze_html, analyze_html_bytes, analyze_text, Analyzer, AnalyzerConfig};
pub use report::{AnalysisReport, DistributionRow, OverallScore, ParagraphRow, ParagraphTable};
pub use segmenter::{ParagraphSegmenter, SegmentationSource, SegmenterConfig};
