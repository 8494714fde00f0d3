//! Input manager for handling different file types

use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor, UnavailableExtractor,
};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Bundled sample posting, for trying the tool without a job description file
pub const SAMPLE_JOB_DESCRIPTION: &str = "We are hiring a Data Scientist with strong Python, SQL and Machine Learning experience.
Responsibilities: build predictive models (scikit-learn, xgboost), create dashboards (Power BI), work with datasets and deploy models.
Preferred: NLP, transformers, cloud (AWS).";

pub struct InputManager {
    pdf: Box<dyn TextExtractor>,
    text: PlainTextExtractor,
    markdown: MarkdownExtractor,
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        let pdf: Box<dyn TextExtractor> = if PdfExtractor.is_available() {
            Box::new(PdfExtractor)
        } else {
            warn!("PDF support not compiled in; PDF resumes will yield no text");
            Box::new(UnavailableExtractor)
        };
        Self::with_pdf_extractor(pdf)
    }

    /// Use a specific PDF strategy instead of the build default
    pub fn with_pdf_extractor(pdf: Box<dyn TextExtractor>) -> Self {
        Self {
            pdf,
            text: PlainTextExtractor,
            markdown: MarkdownExtractor,
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn pdf_available(&self) -> bool {
        self.pdf.is_available()
    }

    /// Read and extract a file. Missing files, unknown types and parse failures yield `""`.
    pub async fn extract_text(&mut self, path: &Path) -> String {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return cached_text.clone();
            }
        }

        let text = match fs::read(path).await {
            Ok(bytes) => self.extract_bytes(&path_str, &bytes),
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                String::new()
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        text
    }

    /// Extract in-memory content, routed by the extension of `name`
    pub fn extract_bytes(&self, name: &str, bytes: &[u8]) -> String {
        let text = match FileType::from_path(Path::new(name)) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", name);
                self.pdf.extract(bytes)
            }
            FileType::Text => {
                info!("Reading plain text file: {}", name);
                self.text.extract(bytes)
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", name);
                self.markdown.extract(bytes)
            }
            FileType::Unknown => {
                warn!("Unsupported file type, treating as plain text: {}", name);
                self.text.extract(bytes)
            }
        };

        if text.trim().is_empty() {
            warn!("Could not extract text from {}", name);
        }
        text
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
