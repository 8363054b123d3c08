//! Category resolution for creators.
//!
//! Three tiers, first match wins, no merging across tiers:
//! 1. the authoritative single label from upstream analysis,
//! 2. the stored category list,
//! 3. keyword matching over interests and topics.
//! Creators that match nothing land in `Lifestyle` — classification
//! never returns an empty set.

use creatorpulse_core::{Category, CategoryTable};

use crate::types::CreatorProfile;

/// Resolve a creator's categories against the configured keyword table.
#[must_use]
pub fn classify(profile: &CreatorProfile, table: &CategoryTable) -> Vec<Category> {
    // Tier 1: authoritative single label.
    if let Some(primary) = profile
        .primary_category
        .as_deref()
        .and_then(|s| s.parse::<Category>().ok())
    {
        return vec![primary];
    }

    // Tier 2: stored list, deduplicated, unknown labels dropped.
    let stored: Vec<Category> = {
        let mut seen = Vec::new();
        for label in &profile.stored_categories {
            if let Ok(category) = label.parse::<Category>() {
                if !seen.contains(&category) {
                    seen.push(category);
                }
            }
        }
        seen
    };
    if !stored.is_empty() {
        return stored;
    }

    // Tier 3: keyword match over lowercased interests + topics.
    let haystack = profile
        .interests
        .iter()
        .chain(profile.topics.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    match table.match_keywords(&haystack) {
        Some(category) => vec![category],
        None => vec![Category::Lifestyle],
    }
}
