use serde::Serialize;

use creatorpulse_core::Category;

/// Assumed likes-per-comment split when a category has no observed
/// comments to measure a real ratio from.
pub const DEFAULT_LIKE_COMMENT_RATIO: f64 = 20.0;

/// A creator's profile as seen by this core: derived from the snapshot's
/// analysis block and read-only from here on.
#[derive(Debug, Clone, Serialize)]
pub struct CreatorProfile {
    pub creator_id: String,
    pub display_name: String,
    /// `None` means unknown — a meaningfully different state from zero.
    pub follower_count: Option<u64>,
    pub persona: Option<String>,
    pub tone: Option<String>,
    pub interests: Vec<String>,
    pub topics: Vec<String>,
    /// Authoritative single label from upstream analysis, if assigned.
    pub primary_category: Option<String>,
    /// Stored category list from upstream analysis (may contain labels
    /// outside the fixed taxonomy; classification filters them).
    pub stored_categories: Vec<String>,
}

/// Canonical per-post record produced by metric extraction.
///
/// Like/comment counts are `None` when the raw payload had no
/// structurally valid value — never coerced to zero.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPost {
    pub post_id: String,
    pub creator_id: String,
    /// Caption text; absent captions become empty strings.
    pub caption: String,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    /// Ordering key (epoch seconds); not required to be exact.
    pub taken_at: Option<i64>,
    /// Inherited from the owning creator's classification.
    pub categories: Vec<Category>,
}

impl NormalizedPost {
    /// Total measured engagement, or `None` when the post carried
    /// neither a like nor a comment count and must be excluded from
    /// rate computation.
    #[must_use]
    pub fn engagement(&self) -> Option<u64> {
        match (self.like_count, self.comment_count) {
            (None, None) => None,
            (l, c) => Some(l.unwrap_or(0) + c.unwrap_or(0)),
        }
    }
}

/// Derived category-level engagement statistics, computed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementInsight {
    pub category: Category,
    /// Distinct creators whose posts qualified for rate computation.
    pub creators_analyzed: usize,
    /// Posts that qualified (known counts, owning creator with a known
    /// positive follower count).
    pub posts_analyzed: usize,
    /// Mean per-post engagement rate, as a percentage of followers.
    pub engagement_rate: f64,
    /// Observed likes-per-comment ratio; `None` when no comments were
    /// observed (never infinity).
    pub like_comment_ratio: Option<f64>,
    /// Audience size the projection below is scaled to.
    pub target_followers: u64,
    pub projected_likes: u64,
    pub projected_comments: u64,
    /// Raw per-post averages from the measured creators, before
    /// projection.
    pub raw_avg_likes: u64,
    pub raw_avg_comments: u64,
    pub raw_avg_engagement: u64,
}

impl EngagementInsight {
    /// The clearly-flagged "no data" insight for callers to render.
    #[must_use]
    pub fn empty(category: Category, target_followers: u64) -> Self {
        Self {
            category,
            creators_analyzed: 0,
            posts_analyzed: 0,
            engagement_rate: 0.0,
            like_comment_ratio: None,
            target_followers,
            projected_likes: 0,
            projected_comments: 0,
            raw_avg_likes: 0,
            raw_avg_comments: 0,
            raw_avg_engagement: 0,
        }
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.posts_analyzed > 0
    }
}

/// A representative caption opener with a human-readable rationale.
#[derive(Debug, Clone, Serialize)]
pub struct Hook {
    pub text: String,
    pub rationale: String,
}

/// Per-creator structural posting pattern mined from real post history.
#[derive(Debug, Clone, Serialize)]
pub struct EvidencePattern {
    pub creator_id: String,
    /// Non-empty captions the pattern was measured from.
    pub sample_count: usize,
    /// `false` when `sample_count` fell below the configured minimum;
    /// consumers must degrade to estimated grading, not penalize.
    pub sufficient: bool,
    pub avg_word_count: f64,
    pub median_word_count: usize,
    pub word_count_range: (usize, usize),
    pub avg_emoji_count: f64,
    pub avg_hashtag_count: f64,
    /// Ranked representative openers, best first.
    pub hooks: Vec<Hook>,
}
