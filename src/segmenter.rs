// Short lines (headings, nav fragments, boilerplate) never become paragraphs

use serde::Serialize;
use tracing::debug;

/// Lines must be strictly longer than this many characters to count as paragraphs
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// At most this many paragraphs are kept per document
pub const MAX_PARAGRAPHS: usize = 5;

/// Which text HTML input is segmented from
///
/// HTML extraction flattens the page into one line. Segmenting that single line
/// almost never yields more than one paragraph, so by default the per-line text
/// from before flattening is used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentationSource {
    /// Extracted lines before flattening
    #[default]
    Lines,
    /// The flattened document text
    Flattened,
}

/// Configuration for paragraph selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Minimum trimmed length, exclusive, in characters
    pub min_chars: usize,
    /// Cap on retained paragraphs
    pub max_paragraphs: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_chars: MIN_PARAGRAPH_CHARS,
            max_paragraphs: MAX_PARAGRAPHS,
        }
    }
}

/// A retained paragraph borrowed from the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentedParagraph<'a> {
    /// 1-based position among retained paragraphs
    pub index: usize,
    /// Trimmed line content
    pub text: &'a str,
}

/// Splits text into the paragraphs worth scoring individually
#[derive(Debug, Clone, Default)]
pub struct ParagraphSegmenter {
    config: SegmenterConfig,
}

impl ParagraphSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Return the first qualifying lines of `text`, indexed from 1
    ///
    /// Only `\n` separates lines; a trailing `\r` is removed by the trim.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<SegmentedParagraph<'a>> {
        let paragraphs: Vec<SegmentedParagraph<'a>> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| line.chars().count() > self.config.min_chars)
            .take(self.config.max_paragraphs)
            .enumerate()
            .map(|(i, line)| SegmentedParagraph { index: i + 1, text: line })
            .collect();

        debug!(
            "Segmented {} chars into {} paragraphs",
            text.len(),
            paragraphs.len()
        );
        paragraphs
    }
}

/// Segment with the default threshold and cap
pub fn segment_paragraphs(text: &str) -> Vec<SegmentedParagraph<'_>> {
    ParagraphSegmenter::default().segment(text)
}
