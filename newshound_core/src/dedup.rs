//! Near-duplicate removal across sources.

use crate::article::Article;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Case-insensitive normalized Levenshtein similarity in `[0, 1]`.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Drop every article whose title is more than `threshold` similar to a title
/// already accepted. First occurrence wins; order is preserved.
pub fn deduplicate(articles: Vec<Article>, threshold: f64) -> Vec<Article> {
    let mut seen: Vec<String> = Vec::with_capacity(articles.len());
    let mut unique = Vec::with_capacity(articles.len());

    for article in articles {
        let title = article.title().to_lowercase();
        let duplicate = seen
            .iter()
            .any(|accepted| strsim::normalized_levenshtein(&title, accepted) > threshold);

        if duplicate {
            tracing::trace!(title = article.title(), source = article.source(), "duplicate dropped");
            continue;
        }
        seen.push(title);
        unique.push(article);
    }
    unique
}
