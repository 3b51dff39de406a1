//! Terminal rendering for collection results and engine listings.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use newshound_core::{Article, EngineInfo, SearchResult, SourceStatus, ValidationReport};
use owo_colors::OwoColorize;

/// Fallback width when `COLUMNS` is not set.
const DEFAULT_WIDTH: usize = 100;

/// Indent for card content (after number)
const CARD_INDENT: usize = 6;

pub fn format_collection(result: &SearchResult) -> String {
    let width = terminal_width();
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        "Query:".bold().cyan(),
        result.query.yellow()
    ));
    output.push_str(&format!(
        "{}\n\n",
        format!(
            "{} collected, {} unique, {} duplicates removed",
            result.total_articles, result.unique_articles, result.duplicates_removed
        )
        .dimmed()
    ));

    output.push_str(&format_section_header("Articles", Some(result.articles.len()), width));
    output.push_str("\n\n");
    if result.articles.is_empty() {
        output.push_str(&format!("   {}\n", "No articles".dimmed()));
    }
    for (i, article) in result.articles.iter().enumerate() {
        output.push_str(&format_card(article, i + 1, width));
        output.push('\n');
    }

    output.push_str(&format_section_header("Sources", None, width));
    output.push_str("\n\n");
    output.push_str(&progress_table(result));
    if let Some(ms) = result.duration_ms {
        output.push_str(&format!("{}\n", format!("Finished in {ms} ms").dimmed()));
    }
    output
}

fn format_card(article: &Article, index: usize, width: usize) -> String {
    let mut output = String::new();
    let title = if article.is_synthetic() {
        article.title().yellow().to_string()
    } else {
        article.title().bold().to_string()
    };
    output.push_str(&format!(
        " {:>3}. {}\n",
        index.to_string().cyan().bold(),
        title
    ));
    if !article.url().is_empty() {
        output.push_str(&format!(
            "      {}\n",
            format_hyperlink(article.url(), article.url()).blue()
        ));
    }

    if !article.summary().is_empty() {
        let indent = " ".repeat(CARD_INDENT);
        let options = textwrap::Options::new(width.saturating_sub(2).max(40))
            .initial_indent(&indent)
            .subsequent_indent(&indent);
        for line in textwrap::wrap(article.summary(), options) {
            output.push_str(&format!("{}\n", line.dimmed()));
        }
    }

    let date = article
        .published()
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();
    output.push_str(&format!(
        "      {}\n",
        format!("{} · {} · {}", article.source_name(), article.author(), date).dimmed()
    ));
    output
}

fn progress_table(result: &SearchResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ["source", "status", "articles", "ms", "error"]
            .iter()
            .map(|h| Cell::new(h.cyan().bold().to_string())),
    );

    for (name, progress) in &result.source_progress {
        let status = match progress.status {
            SourceStatus::Completed => "completed".green().to_string(),
            SourceStatus::Failed => "failed".red().to_string(),
            SourceStatus::Pending => "pending".yellow().to_string(),
        };
        let ms = progress
            .duration_ms
            .map(|ms| ms.to_string())
            .unwrap_or_else(|| "-".into());
        let error = match (&progress.error_code, &progress.error) {
            (Some(code), Some(message)) => format!("{code}: {}", truncate_str(message, 60)),
            (None, Some(message)) => truncate_str(message, 60),
            _ => String::new(),
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(status),
            Cell::new(progress.articles_found),
            Cell::new(ms),
            Cell::new(error),
        ]);
    }

    let mut output = table.to_string();
    output.push('\n');
    output
}

pub fn format_sources(engines: &[EngineInfo]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        ["engine", "enabled", "ready", "window", "max", "key"]
            .iter()
            .map(|h| Cell::new(h.cyan().bold().to_string())),
    );

    for info in engines {
        let enabled = if info.enabled {
            "yes".green().to_string()
        } else {
            "no".dimmed().to_string()
        };
        let ready = if info.initialized {
            "yes".green().to_string()
        } else if info.enabled {
            "no".red().to_string()
        } else {
            "-".dimmed().to_string()
        };
        let key = match (info.requires_api_key, info.has_api_key) {
            (false, _) => "not needed".dimmed().to_string(),
            (true, true) => "set".green().to_string(),
            (true, false) => "missing".yellow().to_string(),
        };
        table.add_row(vec![
            Cell::new(&info.name),
            Cell::new(enabled),
            Cell::new(ready),
            Cell::new(format!("{} ({}d)", info.time_range, info.effective_days_back)),
            Cell::new(info.max_articles),
            Cell::new(key),
        ]);
    }

    let mut output = table.to_string();
    output.push('\n');
    output
}

pub fn format_validation(report: &ValidationReport) -> String {
    let mut output = String::new();
    if report.valid {
        output.push_str(&format!("{} configuration is valid\n", "OK".green().bold()));
    } else {
        output.push_str(&format!("{} configuration is invalid\n", "FAIL".red().bold()));
    }
    output.push_str(&format!(
        "{}\n",
        format!(
            "{} of {} engines enabled: {}",
            report.enabled_engines.len(),
            report.engine_count,
            report.enabled_engines.join(", ")
        )
        .dimmed()
    ));
    for error in &report.errors {
        output.push_str(&format!("  {} {}\n", "error".red().bold(), error));
    }
    for warning in &report.warnings {
        output.push_str(&format!("  {} {}\n", "warning".yellow(), warning));
    }
    output
}

fn format_section_header(label: &str, count: Option<usize>, width: usize) -> String {
    let count_str = match count {
        Some(n) => format!(" ({})", n),
        None => String::new(),
    };

    let header_text = format!("{}{}", label, count_str);
    let line_len = (width.saturating_sub(header_text.len() + 4)).min(60);
    let line = "─".repeat(line_len);

    format!(
        "{} {} {}",
        "──".cyan(),
        header_text.green().bold(),
        line.cyan()
    )
}

fn truncate_str(s: &str, max_len: usize) -> String {
    // Take first line only
    let first_line = s.lines().next().unwrap_or(s);

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse().ok())
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Format a URL as a clickable OSC 8 hyperlink.
fn format_hyperlink(url: &str, display_text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, display_text)
}
