//! Text extraction from various file formats
//!
//! Extractors are total: any failure is logged and reported as empty text so a
//! single bad upload never aborts a screening batch.

use lazy_static::lazy_static;
use log::warn;
use pulldown_cmark::{html, Parser};
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
}

pub trait TextExtractor: Send + Sync {
    /// Whether this extractor can produce text at all in the current build
    fn is_available(&self) -> bool {
        true
    }

    fn extract(&self, bytes: &[u8]) -> String;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn is_available(&self) -> bool {
        cfg!(feature = "pdf")
    }

    #[cfg(feature = "pdf")]
    fn extract(&self, bytes: &[u8]) -> String {
        // The parser can panic on malformed input
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Failed to extract text from PDF: {}", e);
                String::new()
            }
            Err(_) => {
                warn!("PDF parser aborted on malformed input");
                String::new()
            }
        }
    }

    #[cfg(not(feature = "pdf"))]
    fn extract(&self, _bytes: &[u8]) -> String {
        String::new()
    }
}

/// Stands in for PDF support when it is switched off at startup
pub struct UnavailableExtractor;

impl TextExtractor for UnavailableExtractor {
    fn is_available(&self) -> bool {
        false
    }

    fn extract(&self, _bytes: &[u8]) -> String {
        String::new()
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        decode_utf8_ignoring_errors(bytes)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        let markdown_content = decode_utf8_ignoring_errors(bytes);

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let clean_text = TAG_RE.replace_all(&text, "");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them
pub fn decode_utf8_ignoring_errors(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_drops_invalid_bytes() {
        let bytes = b"Python \xff\xfeand SQL";
        assert_eq!(PlainTextExtractor.extract(bytes), "Python and SQL");
    }

    #[test]
    fn test_markdown_strips_formatting() {
        let md = b"## Skills\n\n- **Rust** and `C++`\n- Node.js &amp; SQL\n";
        let text = MarkdownExtractor.extract(md);

        assert!(text.contains("Skills"));
        assert!(text.contains("Rust"));
        assert!(text.contains("C++"));
        assert!(text.contains("Node.js"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        assert_eq!(PdfExtractor.extract(b"%PDF-1.4 definitely not a pdf"), "");
        assert_eq!(PdfExtractor.extract(b""), "");
    }

    #[test]
    fn test_unavailable_extractor() {
        assert!(!UnavailableExtractor.is_available());
        assert_eq!(UnavailableExtractor.extract(b"anything"), "");
    }
}
