//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, MatcherError};
use crate::output::report::*;
use crate::processing::heatmap::HeatmapEntry;
use crate::processing::scorer::ScoringPath;
use askama::Template;
use colored::{Colorize, Color};
use std::path::{Path, PathBuf};

const BAR_WIDTH: usize = 20;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter producing the wire shape
pub struct JsonFormatter {
    pretty: bool,
}

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
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .pill { display: inline-block; border-radius: 9999px; padding: 2px 12px; margin: 3px; font-size: 0.85em; font-weight: 600; }
        .pill-matched { background: #d4edda; color: #155724; }
        .pill-missing { background: #f8d7da; color: #721c24; }
        .pill-extra { background: #e2e3e5; color: #383d41; }
        .pill-title { background: #d1ecf1; color: #0c5460; }
        .empty { color: #6c757d; }
        .heat-row { margin: 10px 0; }
        .heat-label { display: flex; justify-content: space-between; }
        .heat-track { background: #e9ecef; border-radius: 9999px; height: 10px; }
        .heat-fill { background: #007acc; border-radius: 9999px; height: 10px; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Match Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Match Score: {{ match_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h2>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            <p><strong>Experience level:</strong> {{ experience_level }}</p>
            {% if has_job_titles %}
            <p><strong>Job titles:</strong>
                {% for title in job_titles %}<span class="pill pill-title">{{ title }}</span>{% endfor %}
            </p>
            {% endif %}
        </div>

        <div class="section">
            <h2>Matched Skills ({{ matched_skills.len() }})</h2>
            {% if matched_skills.is_empty() %}<p class="empty">No skills matched</p>{% endif %}
            {% for skill in matched_skills %}<span class="pill pill-matched">{{ skill }}</span>{% endfor %}
        </div>

        <div class="section">
            <h2>Missing Skills ({{ missing_skills.len() }})</h2>
            {% if missing_skills.is_empty() %}<p class="empty">No missing skills</p>{% endif %}
            {% for skill in missing_skills %}<span class="pill pill-missing">{{ skill }}</span>{% endfor %}
        </div>

        <div class="section">
            <h2>Extra Skills ({{ extra_skills.len() }})</h2>
            {% if extra_skills.is_empty() %}<p class="empty">No extra skills</p>{% endif %}
            {% for skill in extra_skills %}<span class="pill pill-extra">{{ skill }}</span>{% endfor %}
        </div>

        <div class="section">
            <h2>Keyword Heatmap</h2>
            {% if heatmap_rows.is_empty() %}<p class="empty">Not enough data for keyword analysis</p>{% endif %}
            {% for row in heatmap_rows %}
            <div class="heat-row">
                <div class="heat-label"><span>{{ row.keyword }}</span><span>JD: {{ row.jd_frequency }}, Resume: {{ row.resume_frequency }}</span></div>
                <div class="heat-track"><div class="heat-fill" style="width: {{ row.percent }}%"></div></div>
            </div>
            {% endfor %}
        </div>

        <div class="metadata">
            <p><strong>Generated by Resume Matcher v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_source }} | <strong>Job:</strong> {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    match_score: u8,
    score_class: String,
    score_label: String,
    verdict: String,
    experience_level: String,
    has_job_titles: bool,
    job_titles: Vec<String>,
    matched_skills: Vec<String>,
    missing_skills: Vec<String>,
    extra_skills: Vec<String>,
    heatmap_rows: Vec<HtmlHeatmapRow>,
    version: String,
    resume_source: String,
    job_source: String,
}

#[derive(Debug, Clone)]
struct HtmlHeatmapRow {
    keyword: String,
    jd_frequency: usize,
    resume_frequency: usize,
    percent: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
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

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::BelowAverage => Color::Red,
            ScoreBand::Poor => Color::BrightRed,
        };
        let badge = band.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_skill_list(&self, title: &str, skills: &[String], color: Color, empty: &str) -> String {
        let mut output = self.format_header(&format!("{} ({})", title, skills.len()), 3);
        if skills.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize(empty, Color::BrightBlack)));
        } else {
            for skill in skills {
                output.push_str(&format!("  • {}\n", self.colorize(skill, color)));
            }
        }
        output
    }

    fn format_heatmap_row(&self, entry: &HeatmapEntry, keyword_width: usize) -> String {
        let filled = heat_bar_cells(entry.match_ratio);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let color = if entry.match_ratio >= 1.0 {
            Color::Green
        } else if entry.match_ratio > 0.0 {
            Color::Yellow
        } else {
            Color::Red
        };

        format!(
            "  {:<width$} {} JD: {:>2}  Resume: {:>2}\n",
            entry.keyword,
            self.colorize(&bar, color),
            entry.jd_frequency,
            entry.resume_frequency,
            width = keyword_width
        )
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!("Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        let band = report.score_band();
        output.push_str(&format!("Match Score: {}% {}\n",
            report.match_score,
            self.format_score_badge(band)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(band.verdict(), Color::Cyan)));
        output.push_str(&format!("Experience Level: {}\n", report.experience_level));
        if !report.job_titles.is_empty() {
            output.push_str(&format!("Job Titles: {}\n", report.job_titles.join(", ")));
        }

        output.push_str(&self.format_skill_list("Matched Skills", &report.matched_skills, Color::Green, "No skills matched"));
        output.push_str(&self.format_skill_list("Missing Skills", &report.missing_skills, Color::Red, "No missing skills"));
        output.push_str(&self.format_skill_list("Extra Skills", &report.extra_skills, Color::BrightBlack, "No extra skills"));

        output.push_str(&self.format_header("Keyword Heatmap", 2));
        if report.heatmap_data.is_empty() {
            output.push_str("  Not enough data for keyword analysis\n");
        } else {
            let width = report.heatmap_data
                .iter()
                .map(|e| e.keyword.chars().count())
                .max()
                .unwrap_or(0);
            for entry in &report.heatmap_data {
                output.push_str(&self.format_heatmap_row(entry, width));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 2));
            output.push_str(&format!("Scoring: {}\n", describe_scoring_path(report.details.scoring_path)));
            if let Some(coverage) = report.skill_coverage() {
                output.push_str(&format!("Skill coverage: {:.1}%\n", coverage * 100.0));
            }
            if report.details.resume_titles.is_empty() {
                output.push_str("Resume titles: none detected\n");
            } else {
                output.push_str(&format!("Resume titles: {}\n", report.details.resume_titles.join(", ")));
            }
            output.push_str(&format!("Resume: {} | Job: {}\n",
                report.metadata.resume_source,
                report.metadata.job_source
            ));
        }

        output.push_str(&format!("\n{} Generated by Resume Matcher v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.matcher_version
        ));

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(band: ScoreBand) -> String {
        let dot = match band {
            ScoreBand::Excellent => "🟢",
            ScoreBand::VeryGood => "🟡",
            ScoreBand::Good => "🟠",
            _ => "🔴",
        };
        format!("{} {}", dot, band.label())
    }

    fn skill_line(skills: &[String], empty: &str) -> String {
        if skills.is_empty() {
            format!("_{}_\n\n", empty)
        } else {
            format!("`{}`\n\n", skills.join("`, `"))
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!("**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!("**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_source,
                report.metadata.job_source
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Match Score:** {}% {}\n\n",
            report.match_score,
            Self::markdown_score_badge(report.score_band())
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.score_band().verdict()));
        output.push_str(&format!("**Experience Level:** {}\n\n", report.experience_level));
        if !report.job_titles.is_empty() {
            output.push_str(&format!("**Job Titles:** {}\n\n", report.job_titles.join(", ")));
        }

        output.push_str(&format!("### ✅ Matched Skills ({})\n\n", report.matched_skills.len()));
        output.push_str(&Self::skill_line(&report.matched_skills, "No skills matched"));
        output.push_str(&format!("### ⚠️ Missing Skills ({})\n\n", report.missing_skills.len()));
        output.push_str(&Self::skill_line(&report.missing_skills, "No missing skills"));
        output.push_str(&format!("### ➕ Extra Skills ({})\n\n", report.extra_skills.len()));
        output.push_str(&Self::skill_line(&report.extra_skills, "No extra skills"));

        output.push_str("## Keyword Heatmap\n\n");
        if report.heatmap_data.is_empty() {
            output.push_str("_Not enough data for keyword analysis_\n\n");
        } else {
            output.push_str("| Keyword | JD | Resume | Match |\n");
            output.push_str("|---------|----|--------|-------|\n");
            for entry in &report.heatmap_data {
                output.push_str(&format!("| {} | {} | {} | {:.0}% |\n",
                    entry.keyword,
                    entry.jd_frequency,
                    entry.resume_frequency,
                    entry.match_ratio * 100.0
                ));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by Resume Matcher v{} ({})*\n",
                report.metadata.matcher_version,
                describe_scoring_path(report.details.scoring_path)
            ));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let band = report.score_band();
        let score_class = match band {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::VeryGood | ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::BelowAverage | ScoreBand::Poor => "score-poor",
        };

        let heatmap_rows = report.heatmap_data
            .iter()
            .map(|entry| HtmlHeatmapRow {
                keyword: entry.keyword.clone(),
                jd_frequency: entry.jd_frequency,
                resume_frequency: entry.resume_frequency,
                percent: format!("{:.0}", entry.match_ratio.clamp(0.0, 1.0) * 100.0),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            match_score: report.match_score,
            score_class: score_class.to_string(),
            score_label: band.label().to_string(),
            verdict: band.verdict().to_string(),
            experience_level: report.experience_level.clone(),
            has_job_titles: !report.job_titles.is_empty(),
            job_titles: report.job_titles.clone(),
            matched_skills: report.matched_skills.clone(),
            missing_skills: report.missing_skills.clone(),
            extra_skills: report.extra_skills.clone(),
            heatmap_rows,
            version: report.metadata.matcher_version.clone(),
            resume_source: display_name(&report.metadata.resume_source),
            job_source: display_name(&report.metadata.job_source),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let template_data = self.create_template_data(report);
        template_data.render().map_err(|e| MatcherError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
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

/// Number of filled cells in a heatmap bar
fn heat_bar_cells(ratio: f64) -> usize {
    ((ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
}

fn describe_scoring_path(path: ScoringPath) -> &'static str {
    match path {
        ScoringPath::Degenerate => "empty input, nothing to compare",
        ScoringPath::Skills => "skill overlap with title and experience bonuses",
        ScoringPath::KeywordFallback => "keyword overlap (no known skills in the job description)",
    }
}

/// File name for paths, the source text itself otherwise
fn display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}

/// Where `--save` writes: a directory gets a suggested file name inside it
pub fn resolve_save_path(target: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}
