// Test utilities shared by the integration suites
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding input documents for a test
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write a file relative to the fixture root, creating parent directories
    pub fn create_file<P: AsRef<Path>>(&self, relative: P, content: &[u8]) -> PathBuf {
        let path = self.root_path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    pub fn create_text_file<P: AsRef<Path>>(&self, relative: P, content: &str) -> PathBuf {
        self.create_file(relative, content.as_bytes())
    }
}

/// Lines long enough to be retained as paragraphs
pub fn long_lines(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Line number {i} is a pleasant sentence that easily passes the length threshold."))
        .collect::<Vec<_>>()
        .join("\n")
}

pub const POSITIVE_HTML: &str = "<html><head><style>p { color: red; }</style></head><body>\n\
    <p>The new library opened today and the whole town thinks it is wonderful and inspiring.</p>\n\
    <script>var mood = 'terrible awful horrible';</script>\n\
    </body></html>";

pub const NEGATIVE_TEXT: &str =
    "The service was terrible and the food was the worst I have ever had in my life.\n\
     Everything about the evening was a horrible, miserable disaster.";
