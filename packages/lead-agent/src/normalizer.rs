//! Flattening page results into uniform export rows.

use crate::types::{FlattenedRow, Interaction, PageResult};

/// Separator used to render `links` as one cell.
pub const LINK_SEPARATOR: &str = ", ";

/// One row per interaction, URLs in input order and interactions in
/// extraction order. No filtering, sorting or deduplication.
pub fn flatten(results: &[PageResult]) -> Vec<FlattenedRow> {
    results
        .iter()
        .flat_map(|page| {
            page.interactions
                .iter()
                .map(move |interaction| flatten_one(&page.source_url, interaction))
        })
        .collect()
}

fn flatten_one(source_url: &str, interaction: &Interaction) -> FlattenedRow {
    FlattenedRow {
        website_url: source_url.to_string(),
        username: interaction.username.clone().unwrap_or_default(),
        bio: interaction.bio.clone().unwrap_or_default(),
        post_type: interaction.post_type.clone().unwrap_or_default(),
        timestamp: interaction.timestamp.clone().unwrap_or_default(),
        upvotes: interaction.upvotes.unwrap_or(0),
        links: interaction
            .links
            .as_deref()
            .map(|links| links.join(LINK_SEPARATOR))
            .unwrap_or_default(),
    }
}
