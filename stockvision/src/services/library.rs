//! Library view
//!
//! Search and favorite filtering over saved research, plus the text
//! renderings used by the CLI. Everything here is a pure function of its
//! inputs.

use crate::models::{LibraryFilter, ResearchResult};

/// Records whose topic or title contains `search_term` (case-insensitive)
/// and that pass `filter`, in collection order.
pub fn filter_results<'a>(
    items: &'a [ResearchResult],
    search_term: &str,
    filter: LibraryFilter,
) -> Vec<&'a ResearchResult> {
    let term = search_term.to_lowercase();

    items
        .iter()
        .filter(|item| {
            let matches_search = item.topic.to_lowercase().contains(&term)
                || item.title.to_lowercase().contains(&term);
            let matches_filter = match filter {
                LibraryFilter::All => true,
                LibraryFilter::Favorites => item.is_favorite,
            };
            matches_search && matches_filter
        })
        .collect()
}

/// Short date like "Mar 5, 2024"
pub fn format_date(item: &ResearchResult) -> String {
    item.created_at()
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

/// One library entry
pub fn render_row(item: &ResearchResult) -> String {
    let marker = if item.is_favorite { "★" } else { "☆" };
    format!(
        "{} {}  {}\n    \"{}\"\n    [{}] [{}]  {} keywords  id: {}",
        marker,
        format_date(item),
        item.topic,
        item.title,
        item.platform,
        item.style,
        item.keywords.len(),
        item.id
    )
}

/// The library listing: header, visible rows, or the empty-state message
pub fn render_library(total: usize, visible: &[&ResearchResult]) -> String {
    let mut out = format!("Creative Library\nYou have saved {} generations.\n", total);

    if visible.is_empty() {
        out.push_str("\nNo saved research found matching your filters.\n");
        return out;
    }

    for item in visible {
        out.push('\n');
        out.push_str(&render_row(item));
        out.push('\n');
    }
    out
}

/// Full result card
pub fn render_card(result: &ResearchResult) -> String {
    let favorite = if result.is_favorite { "  ★ favorite" } else { "" };

    format!(
        "Standard Metadata  [{platform}] [{market}]{favorite}\n\
         \nTitle\n  {title}\n\
         \nDescription\n  {description}\n\
         \nKeywords ({keyword_count})\n  {keywords}\n\
         \nTags\n  {tags}\n\
         \nStrategic Commercial Angle\n  \"{angle}\"\n\
         \nTheme: {theme}\n\
         Style: {style}\n\
         Target Buyer Intent: {intent}\n\
         \nRefined AI Prompt [{style}]\n  {prompt}\n\
         \nTopic: {topic}  |  id: {id}",
        platform = result.platform,
        market = result.market_type,
        favorite = favorite,
        title = result.title,
        description = result.description,
        keyword_count = result.keywords.len(),
        keywords = result.keywords_csv(),
        tags = result.tags.join(", "),
        angle = result.commercial_angle,
        theme = result.theme,
        style = result.style,
        intent = result.buyer_intent,
        prompt = result.ai_prompt,
        topic = result.topic,
        id = result.id,
    )
}
