//! Evidence extraction: recurring structural patterns in one creator's
//! post history, used both to steer generation and to grade its output.

use crate::text::{analyze, opening_clause};
use crate::types::{EvidencePattern, Hook, NormalizedPost};

/// Word cap for a representative hook (the opening clause of a caption).
const HOOK_MAX_WORDS: usize = 12;

/// How many representative hooks to keep, best first.
const HOOK_LIMIT: usize = 3;

/// Mine `posts` (one creator's history) for structural patterns.
///
/// Measurements run over non-empty captions only. When fewer than
/// `min_posts` captions are available the pattern is still computed but
/// flagged insufficient; downstream consumers degrade to estimated
/// grading instead of penalizing.
#[must_use]
pub fn extract_pattern(
    creator_id: &str,
    posts: &[NormalizedPost],
    min_posts: usize,
) -> EvidencePattern {
    let captioned: Vec<&NormalizedPost> =
        posts.iter().filter(|p| !p.caption.is_empty()).collect();

    let metrics: Vec<_> = captioned.iter().map(|p| analyze(&p.caption)).collect();
    let sample_count = metrics.len();

    let mut word_counts: Vec<usize> = metrics.iter().map(|m| m.word_count).collect();
    word_counts.sort_unstable();

    #[allow(clippy::cast_precision_loss)]
    let mean = |total: usize| {
        if sample_count == 0 {
            0.0
        } else {
            total as f64 / sample_count as f64
        }
    };

    EvidencePattern {
        creator_id: creator_id.to_string(),
        sample_count,
        sufficient: sample_count >= min_posts,
        avg_word_count: mean(word_counts.iter().sum()),
        median_word_count: median(&word_counts),
        word_count_range: (
            word_counts.first().copied().unwrap_or(0),
            word_counts.last().copied().unwrap_or(0),
        ),
        avg_emoji_count: mean(metrics.iter().map(|m| m.emoji_count).sum()),
        avg_hashtag_count: mean(metrics.iter().map(|m| m.hashtag_count).sum()),
        hooks: select_hooks(&captioned),
    }
}

/// Median of a pre-sorted slice; even-length inputs take the mean of
/// the middle pair.
fn median(sorted: &[usize]) -> usize {
    match sorted.len() {
        0 => 0,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2,
    }
}

/// Representative hooks: opening clauses of the top captions, ranked by
/// engagement when counts exist, else by recency.
fn select_hooks(captioned: &[&NormalizedPost]) -> Vec<Hook> {
    let mut ranked: Vec<&NormalizedPost> = captioned.to_vec();
    // Measured engagement first (descending), then recency as the
    // tie-break and the fallback for unmeasured posts.
    ranked.sort_by(|a, b| {
        b.engagement()
            .cmp(&a.engagement())
            .then(b.taken_at.cmp(&a.taken_at))
    });

    ranked
        .into_iter()
        .take(HOOK_LIMIT)
        .filter_map(|post| {
            let text = opening_clause(&post.caption, HOOK_MAX_WORDS);
            if text.is_empty() {
                return None;
            }
            let rationale = match post.engagement() {
                Some(e) => format!("high-engagement opener ({e} likes+comments)"),
                None => "recent post opener (engagement unmeasured)".to_string(),
            };
            Some(Hook { text, rationale })
        })
        .collect()
}
