use crate::cli::{Cli, CollectArgs};
use crate::commands::{copy_to_clipboard, load_config, CommandError, Result};
use crate::output::{format_output, OutputData};
use indicatif::{ProgressBar, ProgressStyle};
use newshound_core::{CollectOptions, Collector, EngineUpdate, SearchConfig, SearchResult};
use owo_colors::OwoColorize;

pub async fn run(cli: &Cli, args: &CollectArgs) -> Result<()> {
    if args.query.trim().is_empty() {
        return Err(CommandError::InvalidInput("query must not be empty".into()));
    }

    let mut config = load_config(cli)?;
    apply_overrides(&mut config, args)?;

    let collector = Collector::new(config);
    let available = collector.available_sources();
    if available.is_empty() {
        return Err(CommandError::InvalidConfig(
            "no engines are ready; run `newshound validate` for details".into(),
        ));
    }
    for name in &args.sources {
        if !available.contains(name) {
            eprintln!(
                "{} {} could not be initialised and was skipped",
                "warning:".yellow().bold(),
                name.cyan()
            );
        }
    }

    let mut options = CollectOptions::new();
    if let Some(threshold) = args.threshold {
        options = options.similarity_threshold(threshold);
    }

    let spinner = if args.quiet || cli.output != crate::cli::OutputFormat::Pretty {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!(
            "Searching {} engines for '{}'...",
            available.len(),
            args.query
        ));
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(spinner)
    };
    if let Some(spinner) = spinner.clone() {
        options = options.progress(move |message: &str| spinner.set_message(message.to_string()));
    }

    let result = collector.collect_with(&args.query, options).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let result = hide_placeholders(result, args.hide_placeholders);

    let text = format_output(&OutputData::Collection(result), cli.output)?;
    if cli.copy {
        copy_to_clipboard(&text)?;
    }
    Ok(())
}

fn hide_placeholders(result: SearchResult, hide: bool) -> SearchResult {
    if hide {
        result.without_synthetic()
    } else {
        result
    }
}

/// Layer command-line flags over the loaded config.
fn apply_overrides(config: &mut SearchConfig, args: &CollectArgs) -> Result<()> {
    if !args.sources.is_empty() {
        let known = config.available_engines();
        if let Some(unknown) = args.sources.iter().find(|s| !known.contains(s)) {
            return Err(CommandError::UnknownEngine(unknown.clone()));
        }
        for name in known {
            let wanted = args.sources.contains(&name);
            config.set_engine_config(&name, EngineUpdate::new(wanted));
        }
    }

    if let Some(range) = args.time_range {
        config.set_time_range_preset(range);
    }
    if let Some(days) = args.days {
        if days < 0 {
            return Err(CommandError::InvalidInput("--days must not be negative".into()));
        }
        config.set_custom_days(days);
    }
    if let Some(max) = args.max {
        for name in config.available_engines() {
            let enabled = config.engine(&name).map(|e| e.enabled).unwrap_or(false);
            config.set_engine_config(&name, EngineUpdate::new(enabled).max_articles(max));
        }
        config.global_max_articles = max;
    }
    if let Some(threshold) = args.threshold {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(CommandError::InvalidInput(
                "--threshold must be in (0, 1]".into(),
            ));
        }
        config.global_similarity_threshold = threshold;
    }
    if let Some(ms) = args.timeout_ms {
        config.source_timeout_ms = Some(ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newshound_core::{Article, TimeRange};
    use std::collections::BTreeMap;

    fn args(query: &str) -> CollectArgs {
        CollectArgs {
            query: query.into(),
            sources: Vec::new(),
            time_range: None,
            days: None,
            max: None,
            threshold: None,
            timeout_ms: None,
            hide_placeholders: false,
            quiet: true,
        }
    }

    #[test]
    fn sources_flag_enables_exactly_those_engines() {
        let mut config = SearchConfig::default();
        let mut a = args("q");
        a.sources = vec!["arxiv".into(), "tavily".into()];
        apply_overrides(&mut config, &a).unwrap();
        assert_eq!(config.enabled_sources(), vec!["arxiv", "tavily"]);
    }

    #[test]
    fn unknown_source_is_rejected() {
        let mut config = SearchConfig::default();
        let mut a = args("q");
        a.sources = vec!["gopher".into()];
        let err = apply_overrides(&mut config, &a).unwrap_err();
        assert!(matches!(err, CommandError::UnknownEngine(name) if name == "gopher"));
    }

    #[test]
    fn window_and_quota_flags_apply_everywhere() {
        let mut config = SearchConfig::default();
        let mut a = args("q");
        a.time_range = Some(TimeRange::OneMonth);
        a.max = Some(3);
        a.timeout_ms = Some(2_000);
        apply_overrides(&mut config, &a).unwrap();

        let hn = config.engine("hackernews").unwrap();
        assert_eq!(hn.get_effective_days_back(), 30);
        assert_eq!(hn.max_articles, 3);
        assert!(hn.enabled);
        assert!(!config.engine("tavily").unwrap().enabled);
        assert_eq!(config.source_timeout_ms, Some(2_000));
    }

    #[test]
    fn custom_days_override_preset() {
        let mut config = SearchConfig::default();
        let mut a = args("q");
        a.time_range = Some(TimeRange::OneYear);
        a.days = Some(3);
        apply_overrides(&mut config, &a).unwrap();
        assert_eq!(config.engine("arxiv").unwrap().get_effective_days_back(), 3);
    }

    #[test]
    fn bad_threshold_is_rejected() {
        let mut config = SearchConfig::default();
        let mut a = args("q");
        a.threshold = Some(1.5);
        assert!(apply_overrides(&mut config, &a).is_err());
    }

    #[test]
    fn hidden_placeholders_leave_consistent_counts() {
        let articles = vec![
            Article::new("arxiv", "arXiv", "Sparse attention at scale", ""),
            Article::placeholder("newsapi", "NewsAPI", "q", ""),
        ];
        let result = SearchResult::assemble("q", 2, articles, BTreeMap::new());

        let shown = hide_placeholders(result.clone(), false);
        assert_eq!(shown.unique_articles, 2);

        let hidden = hide_placeholders(result, true);
        assert_eq!(hidden.unique_articles, hidden.articles.len());
        assert_eq!(hidden.unique_articles, 1);
        assert_eq!(
            hidden.total_articles,
            hidden.unique_articles + hidden.duplicates_removed
        );
    }
}
