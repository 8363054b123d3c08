//! Metric extraction over raw snapshot payloads.
//!
//! Raw records vary in nesting and field naming across platforms and
//! collector versions. Each logical field is pulled through an ordered
//! list of extraction strategies, first structurally valid value wins,
//! with an explicit "unknown" (`None`) sentinel — never a silent
//! cast-to-zero. All shape tolerance for the whole pipeline lives here.

use creatorpulse_core::Category;
use creatorpulse_store::RawCreatorRecord;
use serde_json::Value;

use crate::types::{CreatorProfile, NormalizedPost};

/// Ordered follower-count paths tried against the raw profile payload.
///
/// Covers the social-graph edge shape (full API envelope and its
/// partially flattened variants) and the flat collector fields.
const FOLLOWER_PATHS: &[&[&str]] = &[
    &["data", "data", "user", "edge_followed_by", "count"],
    &["user", "edge_followed_by", "count"],
    &["edge_followed_by", "count"],
    &["followers"],
    &["follower_count"],
];

const LIKE_PATHS: &[&[&str]] = &[&["like_count"], &["liked_count"]];
const COMMENT_PATHS: &[&[&str]] = &[&["comment_count"]];
const TIMESTAMP_PATHS: &[&[&str]] = &[&["taken_at"], &["taken_at_timestamp"], &["created_time"]];

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key))
}

/// A structurally valid non-negative integer, or nothing. Floats,
/// strings, and negative numbers are not counts.
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64()
}

fn first_count(value: &Value, paths: &[&[&str]]) -> Option<u64> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).and_then(as_count))
}

/// Extract the creator's follower count, or `None` when no known shape
/// yields a valid count. Zero is a valid (known) count; unknown is not
/// zero.
#[must_use]
pub fn extract_follower_count(record: &RawCreatorRecord) -> Option<u64> {
    first_count(&record.user_info, FOLLOWER_PATHS).or_else(|| {
        record
            .profile_data
            .follower_count
            .as_ref()
            .and_then(as_count)
    })
}

/// Derive the read-only [`CreatorProfile`] from a raw snapshot.
#[must_use]
pub fn extract_profile(record: &RawCreatorRecord) -> CreatorProfile {
    let pd = &record.profile_data;
    CreatorProfile {
        creator_id: record.user_id.clone(),
        display_name: record.display_name().to_string(),
        follower_count: extract_follower_count(record),
        persona: pd.persona.clone(),
        tone: pd.tone.clone(),
        interests: pd.interests.clone(),
        topics: pd.content_topics.clone(),
        primary_category: pd.primary_category.clone(),
        stored_categories: pd.categories.clone().unwrap_or_default(),
    }
}

/// Normalize a record's raw posts, tagging each with the creator's
/// resolved `categories`.
///
/// Malformed posts (no usable id) are skipped with a logged reason; one
/// bad post never aborts the rest of the record. Posts missing both
/// engagement counts are retained for caption analysis and excluded
/// from rate computation downstream via their `None` counts.
#[must_use]
pub fn extract_posts(record: &RawCreatorRecord, categories: &[Category]) -> Vec<NormalizedPost> {
    let mut posts = Vec::with_capacity(record.posts.len());
    for (index, raw) in record.posts.iter().enumerate() {
        match extract_post(record, raw, categories) {
            Some(post) => posts.push(post),
            None => {
                tracing::warn!(
                    creator = record.user_id,
                    index,
                    "post has no usable id field, skipping"
                );
            }
        }
    }
    posts
}

fn extract_post(
    record: &RawCreatorRecord,
    raw: &Value,
    categories: &[Category],
) -> Option<NormalizedPost> {
    let post_id = extract_post_id(raw)?;

    Some(NormalizedPost {
        post_id,
        creator_id: record.user_id.clone(),
        caption: extract_caption(raw),
        like_count: first_count(raw, LIKE_PATHS),
        comment_count: first_count(raw, COMMENT_PATHS),
        taken_at: TIMESTAMP_PATHS
            .iter()
            .find_map(|path| lookup(raw, path).and_then(Value::as_i64)),
        categories: categories.to_vec(),
    })
}

fn extract_post_id(raw: &Value) -> Option<String> {
    ["id", "pk", "code"].iter().find_map(|key| {
        raw.get(key).and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    })
}

/// Caption paths: object shape (`caption.text`), string shape
/// (`caption`), legacy `desc`. Absent caption becomes an empty string,
/// not `None`, to keep downstream text analysis simple.
fn extract_caption(raw: &Value) -> String {
    if let Some(text) = lookup(raw, &["caption", "text"]).and_then(Value::as_str) {
        return text.to_string();
    }
    if let Some(text) = raw.get("caption").and_then(Value::as_str) {
        return text.to_string();
    }
    if let Some(text) = raw.get("desc").and_then(Value::as_str) {
        return text.to_string();
    }
    String::new()
}
