//! Category-level engagement aggregation and projection.

use std::collections::{HashMap, HashSet};

use creatorpulse_core::Category;

use crate::types::{EngagementInsight, NormalizedPost, DEFAULT_LIKE_COMMENT_RATIO};

/// Compute the category insight for a post set.
///
/// A post qualifies when it carries at least one engagement count and
/// its owning creator has a known, positive follower count. Creators
/// with an unknown (or zero) follower count are excluded from the
/// average entirely — not treated as zero-engagement.
///
/// The category rate is the arithmetic mean of per-post rates across
/// all qualifying posts, not a mean of per-creator means: a creator
/// with more posts contributes proportionally more samples. That choice
/// is deliberate and must stay stable for reproducibility.
///
/// Zero qualifying posts yield the flagged empty insight rather than an
/// error, so callers can render a "no data" state.
#[must_use]
pub fn compute_insight(
    category: Category,
    posts: &[NormalizedPost],
    follower_counts: &HashMap<String, Option<u64>>,
    target_followers: u64,
) -> EngagementInsight {
    struct Sample {
        rate: f64,
        likes: u64,
        comments: u64,
    }

    let mut samples: Vec<Sample> = Vec::new();
    let mut creators: HashSet<&str> = HashSet::new();

    for post in posts {
        let Some(engagement) = post.engagement() else {
            continue;
        };
        let Some(followers) = follower_counts
            .get(post.creator_id.as_str())
            .copied()
            .flatten()
            .filter(|&f| f > 0)
        else {
            continue;
        };

        #[allow(clippy::cast_precision_loss)]
        let rate = engagement as f64 / followers as f64 * 100.0;
        samples.push(Sample {
            rate,
            likes: post.like_count.unwrap_or(0),
            comments: post.comment_count.unwrap_or(0),
        });
        creators.insert(post.creator_id.as_str());
    }

    if samples.is_empty() {
        return EngagementInsight::empty(category, target_followers);
    }

    #[allow(clippy::cast_precision_loss)]
    let n = samples.len() as f64;
    let engagement_rate = samples.iter().map(|s| s.rate).sum::<f64>() / n;

    let total_likes: u64 = samples.iter().map(|s| s.likes).sum();
    let total_comments: u64 = samples.iter().map(|s| s.comments).sum();

    #[allow(clippy::cast_precision_loss)]
    let like_comment_ratio = if total_comments > 0 {
        Some(total_likes as f64 / total_comments as f64)
    } else {
        None
    };

    let (projected_likes, projected_comments) = project(
        engagement_rate,
        target_followers,
        like_comment_ratio.unwrap_or(DEFAULT_LIKE_COMMENT_RATIO),
    );

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mean_u64 = |total: u64| (total as f64 / n).round() as u64;

    EngagementInsight {
        category,
        creators_analyzed: creators.len(),
        posts_analyzed: samples.len(),
        engagement_rate,
        like_comment_ratio,
        target_followers,
        projected_likes,
        projected_comments,
        raw_avg_likes: mean_u64(total_likes),
        raw_avg_comments: mean_u64(total_comments),
        raw_avg_engagement: mean_u64(total_likes + total_comments),
    }
}

/// Scale a measured rate to a target audience and split the projected
/// total by the likes-per-comment ratio.
fn project(rate_percent: f64, target_followers: u64, like_comment_ratio: f64) -> (u64, u64) {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = (rate_percent / 100.0 * target_followers as f64).round() as u64;

    let comment_fraction = 1.0 / (like_comment_ratio + 1.0);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let comments = (total as f64 * comment_fraction).round() as u64;
    (total.saturating_sub(comments), comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(creator: &str, id: &str, likes: Option<u64>, comments: Option<u64>) -> NormalizedPost {
        NormalizedPost {
            post_id: id.to_string(),
            creator_id: creator.to_string(),
            caption: String::new(),
            like_count: likes,
            comment_count: comments,
            taken_at: None,
            categories: vec![Category::Finance],
        }
    }

    fn followers(entries: &[(&str, Option<u64>)]) -> HashMap<String, Option<u64>> {
        entries
            .iter()
            .map(|(id, f)| ((*id).to_string(), *f))
            .collect()
    }

    #[test]
    fn rate_is_mean_of_post_rates_not_mean_of_creators() {
        // Creator a: 1 post at 1%. Creator b: 9 posts at 3% each.
        // Mean-of-posts: (1 + 9*3)/10 = 2.8. Mean-of-creators would be 2.0.
        let mut posts = vec![post("a", "a1", Some(100), Some(0))];
        for i in 0..9 {
            posts.push(post("b", &format!("b{i}"), Some(300), Some(0)));
        }
        let f = followers(&[("a", Some(10_000)), ("b", Some(10_000))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert!(
            (insight.engagement_rate - 2.8).abs() < 1e-9,
            "expected 2.8, got {}",
            insight.engagement_rate
        );
        assert_eq!(insight.posts_analyzed, 10);
        assert_eq!(insight.creators_analyzed, 2);
    }

    #[test]
    fn null_follower_creators_are_excluded_not_zeroed() {
        let known = vec![post("a", "a1", Some(250), Some(0))];
        let f_known = followers(&[("a", Some(10_000))]);
        let baseline = compute_insight(Category::Finance, &known, &f_known, 10_000);

        // Add a creator with unknown followers and enormous likes: the
        // insight must be identical to the case where it is absent.
        let mut with_unknown = known;
        with_unknown.push(post("ghost", "g1", Some(9_999_999), Some(5)));
        let f_both = followers(&[("a", Some(10_000)), ("ghost", None)]);
        let insight = compute_insight(Category::Finance, &with_unknown, &f_both, 10_000);

        assert_eq!(insight.engagement_rate, baseline.engagement_rate);
        assert_eq!(insight.posts_analyzed, baseline.posts_analyzed);
        assert_eq!(insight.creators_analyzed, baseline.creators_analyzed);
        assert_eq!(insight.raw_avg_likes, baseline.raw_avg_likes);
    }

    #[test]
    fn zero_follower_creator_is_excluded() {
        let posts = vec![post("z", "z1", Some(10), Some(1))];
        let f = followers(&[("z", Some(0))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert!(!insight.has_data());
    }

    #[test]
    fn post_without_counts_is_excluded() {
        let posts = vec![
            post("a", "a1", Some(200), Some(0)),
            post("a", "a2", None, None),
        ];
        let f = followers(&[("a", Some(10_000))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert_eq!(insight.posts_analyzed, 1);
    }

    #[test]
    fn projection_round_trip() {
        // rate 29.33%, target 10_000 -> 2933 total engagements.
        let posts = vec![post("a", "a1", Some(2_933), Some(0))];
        let f = followers(&[("a", Some(10_000))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert!((insight.engagement_rate - 29.33).abs() < 1e-9);
        assert_eq!(insight.projected_likes + insight.projected_comments, 2_933);
    }

    #[test]
    fn zero_comments_yields_none_ratio_and_default_split() {
        let posts = vec![post("a", "a1", Some(210), Some(0))];
        let f = followers(&[("a", Some(10_000))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert!(insight.like_comment_ratio.is_none());
        // 2.1% of 10k = 210 total, split 20:1 -> 10 comments, 200 likes.
        assert_eq!(insight.projected_comments, 10);
        assert_eq!(insight.projected_likes, 200);
    }

    #[test]
    fn observed_ratio_drives_the_projected_split() {
        // 190 likes + 10 comments at 10k followers: rate 2%, ratio 19:1.
        let posts = vec![post("a", "a1", Some(190), Some(10))];
        let f = followers(&[("a", Some(10_000))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert_eq!(insight.like_comment_ratio, Some(19.0));
        assert_eq!(insight.projected_comments, 10);
        assert_eq!(insight.projected_likes, 190);
    }

    #[test]
    fn empty_post_set_returns_flagged_empty_insight() {
        let insight = compute_insight(Category::Food, &[], &HashMap::new(), 5_000);
        assert!(!insight.has_data());
        assert_eq!(insight.target_followers, 5_000);
    }

    #[test]
    fn raw_averages_come_from_measured_posts() {
        let posts = vec![
            post("a", "a1", Some(100), Some(10)),
            post("a", "a2", Some(300), Some(30)),
        ];
        let f = followers(&[("a", Some(10_000))]);
        let insight = compute_insight(Category::Finance, &posts, &f, 10_000);
        assert_eq!(insight.raw_avg_likes, 200);
        assert_eq!(insight.raw_avg_comments, 20);
        assert_eq!(insight.raw_avg_engagement, 220);
    }
}
