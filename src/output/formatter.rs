//! Output formatters for screening reports

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::ScreeningReport;
use crate::processing::screener::ScreeningResult;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Separator for list-valued cells (skills, terms)
pub const LIST_DELIMITER: &str = ", ";

/// Trait for formatting screening reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console table with optional per-resume details
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    show_raw: bool,
    raw_preview_chars: usize,
}

pub struct JsonFormatter {
    pretty: bool,
}

/// One row per resume: filename, score, matched, missing, top terms
pub struct CsvFormatter;

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_formatter: CsvFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Screening Results</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 1100px; margin: 0 auto; padding: 20px; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border-bottom: 1px solid #e9ecef; padding: 8px; text-align: left; vertical-align: top; }
        th { color: #007acc; }
        .score { font-weight: bold; }
        .missing { color: #dc3545; }
        .warning { background: #fff3cd; padding: 8px; border-radius: 6px; margin: 6px 0; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Resume Screening Results</h1>
    <p>Generated {{ generated_at }} | Job description: {{ job_description }} | Skills: {{ vocabulary }}</p>
    <p>Job skills: {{ job_skills }}</p>
    {% for warning in warnings %}
    <div class="warning">{{ warning }}</div>
    {% endfor %}
    <table>
        <tr><th>#</th><th>File</th><th>Score</th><th>Matched skills</th><th>Missing skills</th><th>Top terms</th></tr>
        {% for row in rows %}
        <tr>
            <td>{{ row.rank }}</td>
            <td>{{ row.filename }}</td>
            <td class="score">{{ row.score }}%</td>
            <td>{{ row.matched_skills }}</td>
            <td class="missing">{{ row.missing_skills }}</td>
            <td>{{ row.top_terms }}</td>
        </tr>
        {% endfor %}
    </table>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    job_description: String,
    vocabulary: String,
    job_skills: String,
    warnings: Vec<String>,
    rows: Vec<HtmlRow>,
}

struct HtmlRow {
    rank: usize,
    filename: String,
    score: String,
    matched_skills: String,
    missing_skills: String,
    top_terms: String,
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(LIST_DELIMITER)
    }
}

fn joined_terms(result: &ScreeningResult) -> String {
    result.top_term_names().join(LIST_DELIMITER)
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
            show_raw: false,
            raw_preview_chars: 20_000,
        }
    }

    pub fn with_raw_text(mut self, show_raw: bool, raw_preview_chars: usize) -> Self {
        self.show_raw = show_raw;
        self.raw_preview_chars = raw_preview_chars;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 70.0 => ("STRONG", Color::Green),
            s if s >= 50.0 => ("GOOD", Color::BrightGreen),
            s if s >= 30.0 => ("FAIR", Color::Yellow),
            s if s > 0.0 => ("WEAK", Color::Red),
            _ => ("NO MATCH", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_details(&self, result: &ScreeningResult) -> String {
        let mut output = self.format_header(
            &format!("Details — {} (Score: {:.2}%)", result.filename, result.score),
            3,
        );
        let terms = joined_terms(result);
        output.push_str(&format!(
            "  Top matched terms: {}\n",
            if terms.is_empty() { "—" } else { terms.as_str() }
        ));
        output.push_str(&format!(
            "  Matched skills: {}\n",
            self.colorize(&join_or_dash(&result.matched_skills), Color::Green)
        ));
        output.push_str(&format!(
            "  Missing skills: {}\n",
            self.colorize(&join_or_dash(&result.missing_skills), Color::Yellow)
        ));

        if self.show_raw {
            let preview: String = result.raw_text.chars().take(self.raw_preview_chars).collect();
            output.push_str(&format!(
                "  Parsed resume text (first {} chars):\n{}\n",
                self.raw_preview_chars, preview
            ));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING (TF-IDF)", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));
        output.push_str(&format!(
            "Skills: {} ({} entries)\n",
            report.vocabulary_label(),
            report.metadata.vocabulary_size
        ));
        output.push_str(&format!("Job skills: {}\n", join_or_dash(&report.job_skills)));

        if !report.warnings.is_empty() {
            output.push_str(&self.format_header("Warnings", 2));
            for warning in &report.warnings {
                output.push_str(&format!("  • {}\n", self.colorize(warning, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header("Results", 2));
        for (i, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {:<30} {:>6.2}% {}\n",
                i + 1,
                result.filename,
                result.score,
                self.format_score_badge(result.score)
            ));
            output.push_str(&format!(
                "     matched: {} | missing: {}\n",
                join_or_dash(&result.matched_skills),
                join_or_dash(&result.missing_skills)
            ));
        }

        if self.detailed || self.show_raw {
            for result in &report.results {
                output.push_str(&self.format_details(result));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "filename",
            "score_tfidf",
            "matched_skills",
            "missing_skills",
            "top_terms",
        ])?;

        for result in &report.results {
            writer.write_record([
                result.filename.clone(),
                format!("{:.2}", result.score),
                result.matched_skills.join(LIST_DELIMITER),
                result.missing_skills.join(LIST_DELIMITER),
                joined_terms(result),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ScreenerError::OutputFormatting(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ScreenerError::OutputFormatting(format!("CSV is not valid UTF-8: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        let mut content = String::new();

        content.push_str("# Resume Screening Results\n\n");
        if self.include_metadata {
            content.push_str(&format!(
                "**Generated:** {}  \n**Job description:** {}  \n**Skills:** {} ({} entries)\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.job_description,
                report.vocabulary_label(),
                report.metadata.vocabulary_size
            ));
        }

        for warning in &report.warnings {
            content.push_str(&format!("> ⚠️ {}\n", warning));
        }
        if !report.warnings.is_empty() {
            content.push('\n');
        }

        content.push_str("| # | File | Score | Matched skills | Missing skills | Top terms |\n");
        content.push_str("|---|------|-------|----------------|----------------|-----------|\n");
        for (i, result) in report.results.iter().enumerate() {
            content.push_str(&format!(
                "| {} | {} | {:.2}% | {} | {} | {} |\n",
                i + 1,
                result.filename.replace('|', "\\|"),
                result.score,
                join_or_dash(&result.matched_skills),
                join_or_dash(&result.missing_skills),
                joined_terms(result)
            ));
        }

        if self.include_metadata {
            content.push_str(&format!(
                "\nGenerated by resume-screener v{}\n",
                report.metadata.screener_version
            ));
        }

        Ok(content)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ScreeningReport) -> HtmlTemplate {
        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            job_description: report.metadata.job_description.clone(),
            vocabulary: report.vocabulary_label(),
            job_skills: join_or_dash(&report.job_skills),
            warnings: report.warnings.clone(),
            rows: report
                .results
                .iter()
                .enumerate()
                .map(|(i, result)| HtmlRow {
                    rank: i + 1,
                    filename: result.filename.clone(),
                    score: format!("{:.2}", result.score),
                    matched_skills: join_or_dash(&result.matched_skills),
                    missing_skills: join_or_dash(&result.missing_skills),
                    top_terms: joined_terms(result),
                })
                .collect(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ScreeningReport) -> Result<String> {
        Ok(self.create_template_data(report).render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            csv_formatter: CsvFormatter,
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        show_raw: bool,
        raw_preview_chars: usize,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed)
                .with_raw_text(show_raw, raw_preview_chars),
            ..Self::new()
        }
    }

    pub fn generate_report(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("screening_results{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("screening_results{}.json", timestamp_suffix),
        OutputFormat::Csv => format!("screening_results{}.csv", timestamp_suffix),
        OutputFormat::Markdown => format!("screening_results{}.md", timestamp_suffix),
        OutputFormat::Html => format!("screening_results{}.html", timestamp_suffix),
    }
}
