//! Time-window filtering.
//!
//! Providers report publication times in whatever shape they like. This
//! module turns them into UTC instants and keeps only the articles that fall
//! inside the requested look-back window. Anything that cannot be dated is
//! dropped rather than admitted.

use crate::article::Article;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 style timestamp into UTC.
///
/// A trailing `Z` is read as `+00:00`; timestamps without an offset are taken
/// to be UTC; a bare date means midnight UTC.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(head) => format!("{head}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Earliest admissible instant for a `days_back` window ending at `now`.
pub fn cutoff(days_back: i64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if days_back <= 0 {
        return None;
    }
    Duration::try_days(days_back).and_then(|window| now.checked_sub_signed(window))
}

/// Keep the articles published within the last `days_back` days.
///
/// `days_back <= 0` disables filtering.
pub fn filter_by_date(articles: Vec<Article>, days_back: i64) -> Vec<Article> {
    filter_by_date_at(articles, days_back, Utc::now())
}

/// [`filter_by_date`] against an explicit clock.
pub fn filter_by_date_at(
    articles: Vec<Article>,
    days_back: i64,
    now: DateTime<Utc>,
) -> Vec<Article> {
    if days_back <= 0 {
        return articles;
    }
    // A window reaching past the representable range admits anything datable.
    let cutoff = cutoff(days_back, now).unwrap_or(DateTime::<Utc>::MIN_UTC);

    let before = articles.len();
    let kept: Vec<Article> = articles
        .into_iter()
        .filter(|article| {
            parse_published(article.published())
                .map(|published| published >= cutoff)
                .unwrap_or(false)
        })
        .collect();

    if kept.len() != before {
        tracing::debug!(
            days_back,
            dropped = before - kept.len(),
            kept = kept.len(),
            "time window filter applied"
        );
    }
    kept
}
