//! Pure projections over a favorites list

use std::collections::HashMap;

use crate::models::Quote;

/// Quotes carrying `tag` (exact match), or all of them when `tag` is `None`
pub fn filter_by_tag(quotes: &[Quote], tag: Option<&str>) -> Vec<Quote> {
    match tag {
        Some(tag) => quotes
            .iter()
            .filter(|quote| quote.has_tag(tag))
            .cloned()
            .collect(),
        None => quotes.to_vec(),
    }
}

/// Stable partition: pinned quotes first, each side keeps its relative order
pub fn order_for_display(quotes: Vec<Quote>) -> Vec<Quote> {
    let (mut pinned, unpinned): (Vec<_>, Vec<_>) =
        quotes.into_iter().partition(|quote| quote.pinned);
    pinned.extend(unpinned);
    pinned
}

/// Distinct tags with the number of quotes carrying each, most used first
pub fn tag_counts(quotes: &[Quote]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for quote in quotes {
        let mut seen = Vec::with_capacity(quote.tags.len());
        for tag in &quote.tags {
            // A tag repeated on one quote still counts that quote once
            if !seen.contains(&tag.as_str()) {
                seen.push(tag.as_str());
                *counts.entry(tag.as_str()).or_default() += 1;
            }
        }
    }

    let mut counts = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
