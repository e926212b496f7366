// WHY: standalone content normalization so segmentation and scoring never see markup
// Produces both the flattened document text and the per-line view it was built from

use std::borrow::Cow;

use scraper::{Html, Node};
use tracing::debug;

use crate::error::AnalysisError;
use crate::segmenter::SegmentationSource;

/// Elements whose contents never count as visible text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Raw input to the pipeline before any cleanup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// An HTML document, typically a fetched page body
    Html(String),
    /// Text typed or pasted directly
    PlainText(String),
}

impl RawInput {
    pub fn as_str(&self) -> &str {
        match self {
            RawInput::Html(s) | RawInput::PlainText(s) => s,
        }
    }
}

/// Clean text ready for scoring
///
/// `text` is what the document-level score is computed from. For HTML input it is
/// the flattened single-line form; `lines` keeps the line structure it was flattened
/// from so paragraphs can still be found. Plain text keeps its own line breaks and
/// has no separate line view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    lines: Option<Vec<String>>,
}

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Per-line extracted text before flattening (HTML input only)
    pub fn lines(&self) -> Option<&[String]> {
        self.lines.as_deref()
    }

    /// Text handed to the paragraph segmenter
    pub fn segmentation_text(&self, source: SegmentationSource) -> Cow<'_, str> {
        match (source, &self.lines) {
            (SegmentationSource::Lines, Some(lines)) => Cow::Owned(lines.join("\n")),
            _ => Cow::Borrowed(&self.text),
        }
    }
}

/// Converts raw HTML or plain text into [`NormalizedText`]
#[derive(Debug, Clone, Default)]
pub struct ContentNormalizer {
    /// Reject documents the HTML parser reported errors for
    strict_markup: bool,
}

impl ContentNormalizer {
    pub fn new(strict_markup: bool) -> Self {
        Self { strict_markup }
    }

    pub fn normalize(&self, input: &RawInput) -> Result<NormalizedText, AnalysisError> {
        match input {
            RawInput::Html(html) => self.normalize_html(html),
            RawInput::PlainText(text) => Ok(NormalizedText {
                text: text.clone(),
                lines: None,
            }),
        }
    }

    /// Decode bytes as UTF-8 before normalizing them as HTML
    pub fn normalize_html_bytes(&self, bytes: &[u8]) -> Result<NormalizedText, AnalysisError> {
        let html = std::str::from_utf8(bytes)?;
        self.normalize_html(html)
    }

    pub fn normalize_html(&self, html: &str) -> Result<NormalizedText, AnalysisError> {
        let document = Html::parse_document(html);

        if !document.errors.is_empty() {
            debug!("HTML parser reported {} diagnostics", document.errors.len());
            if self.strict_markup {
                return Err(AnalysisError::MalformedInput(format!(
                    "markup rejected: {}",
                    document.errors[0]
                )));
            }
        }

        let extracted = visible_text(&document);
        let lines: Vec<String> = split_lines(&extracted)
            .into_iter()
            .map(join_phrases)
            .filter(|line| !line.is_empty())
            .collect();
        let text = lines.join(" ");

        debug!(
            "Normalized {} bytes of HTML into {} lines, {} chars",
            html.len(),
            lines.len(),
            text.len()
        );

        Ok(NormalizedText {
            text,
            lines: Some(lines),
        })
    }
}

/// Normalize an HTML document with default settings
pub fn normalize_html(html: &str) -> Result<NormalizedText, AnalysisError> {
    ContentNormalizer::default().normalize_html(html)
}

/// Concatenate every text node in document order, skipping script and style contents
fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.tree.root().descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                out.push_str(text);
            }
        }
    }
    out
}

/// Split a line on double spaces and rejoin the fragments with single spaces
///
/// Whitespace runs inside a fragment (tabs included) collapse to one space.
fn join_phrases(line: &str) -> String {
    line.split("  ")
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text on line breaks, treating \r\n as a single break
///
/// A trailing break does not produce a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if is_line_break(ch) {
            lines.push(&text[start..idx]);
            let mut end = idx + ch.len_utf8();
            if ch == '\r' && matches!(chars.peek(), Some(&(_, '\n'))) {
                chars.next();
                end += 1;
            }
            start = end;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_contents_excluded() {
        let normalized = normalize_html("<script>ignored</script><p>Great day!</p>").unwrap();
        assert!(normalized.as_str().contains("Great day!"));
        assert!(!normalized.as_str().contains("ignored"));
    }

    #[test]
    fn test_style_contents_excluded() {
        let html = "<html><head><style>body { color: red; }</style></head><body><p>Visible</p></body></html>";
        let normalized = normalize_html(html).unwrap();
        assert_eq!(normalized.as_str(), "Visible");
    }

    #[test]
    fn test_nested_script_in_body_excluded() {
        let html = "<div>Before<script>var x = 'hidden';</script>After</div>";
        let normalized = normalize_html(html).unwrap();
        assert_eq!(normalized.as_str(), "BeforeAfter");
    }

    #[test]
    fn test_lines_flattened_with_single_spaces() {
        let html = "<body>\n  <h1>Title</h1>\n\n  <p>First   paragraph here.</p>\n  <p>Second</p>\n</body>";
        let normalized = normalize_html(html).unwrap();
        assert_eq!(normalized.as_str(), "Title First paragraph here. Second");
        assert_eq!(
            normalized.lines().unwrap(),
            &["Title".to_string(), "First paragraph here.".to_string(), "Second".to_string()]
        );
    }

    #[test]
    fn test_double_space_splits_phrases() {
        assert_eq!(join_phrases("  alpha  beta    gamma  "), "alpha beta gamma");
        assert_eq!(join_phrases("one two"), "one two");
        assert_eq!(join_phrases("   "), "");
        assert_eq!(join_phrases("good\t\tday"), "good day");
        assert_eq!(join_phrases("a \t b\u{A0}\u{A0}c"), "a b c");
    }

    #[test]
    fn test_output_has_no_tags() {
        let html = "<div><b>bold</b> and <i>italic</i><!-- a comment --></div>";
        let normalized = normalize_html(html).unwrap();
        assert_eq!(normalized.as_str(), "bold and italic");
        assert!(!normalized.as_str().contains('<'));
    }

    #[test]
    fn test_tab_runs_collapsed() {
        let normalized = normalize_html("<p>good\t\tday</p>").unwrap();
        assert_eq!(normalized.as_str(), "good day");
        assert_eq!(normalized.lines().unwrap(), &["good day".to_string()]);
    }

    #[test]
    fn test_entities_decoded() {
        let normalized = normalize_html("<p>Fish &amp; chips</p>").unwrap();
        assert_eq!(normalized.as_str(), "Fish & chips");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let raw = RawInput::PlainText("  keep\n\n  as is  ".to_string());
        let normalized = ContentNormalizer::default().normalize(&raw).unwrap();
        assert_eq!(normalized.as_str(), "  keep\n\n  as is  ");
        assert!(normalized.lines().is_none());
    }

    #[test]
    fn test_plain_text_segmentation_text_is_original() {
        let raw = RawInput::PlainText("a\nb".to_string());
        let normalized = ContentNormalizer::default().normalize(&raw).unwrap();
        assert_eq!(normalized.segmentation_text(SegmentationSource::Lines), "a\nb");
        assert_eq!(normalized.segmentation_text(SegmentationSource::Flattened), "a\nb");
    }

    #[test]
    fn test_html_segmentation_text_by_source() {
        let normalized = normalize_html("<p>one</p>\n<p>two</p>").unwrap();
        assert_eq!(normalized.segmentation_text(SegmentationSource::Lines), "one\ntwo");
        assert_eq!(normalized.segmentation_text(SegmentationSource::Flattened), "one two");
    }

    #[test]
    fn test_invalid_utf8_bytes_rejected() {
        let result = ContentNormalizer::default().normalize_html_bytes(&[0x3C, 0x70, 0xFF, 0xFE]);
        assert!(matches!(result, Err(AnalysisError::MalformedInput(_))));
    }

    #[test]
    fn test_strict_markup_rejects_parser_errors() {
        let strict = ContentNormalizer::new(true);
        let result = strict.normalize_html("<p>unbalanced</b></i>");
        assert!(matches!(result, Err(AnalysisError::MalformedInput(_))));
    }

    #[test]
    fn test_lenient_markup_accepts_parser_errors() {
        let normalized = normalize_html("<p>unbalanced</b></i>").unwrap();
        assert_eq!(normalized.as_str(), "unbalanced");
    }

    #[test]
    fn test_empty_html() {
        let normalized = normalize_html("").unwrap();
        assert_eq!(normalized.as_str(), "");
        assert_eq!(normalized.lines().unwrap().len(), 0);
    }

    #[test]
    fn test_split_lines_variants() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("x\u{2028}y"), vec!["x", "y"]);
        assert!(split_lines("").is_empty());
    }
}
