use serde::Deserialize;

/// One creator's unprocessed snapshot, exactly as the collector wrote it.
///
/// `user_info` and `posts` are kept as raw JSON: their shape varies by
/// platform and collector version, and all shape tolerance lives in the
/// analytics metric extractor rather than in serde derives here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCreatorRecord {
    pub user_id: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Raw profile payload (nesting varies: some snapshots carry the
    /// full API envelope, others a flattened user object).
    #[serde(default)]
    pub user_info: serde_json::Value,
    /// Ordered raw post payloads, newest first as collected.
    #[serde(default)]
    pub posts: Vec<serde_json::Value>,
    /// Output of the upstream analysis step, when present.
    #[serde(default)]
    pub profile_data: ProfileData,
}

fn default_platform() -> String {
    "instagram".to_string()
}

impl RawCreatorRecord {
    /// Display name for UI payloads: nickname when set, else the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.nickname.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.user_id,
        }
    }
}

/// The upstream analysis schema this core depends on (but never produces):
/// `{persona, tone, interests[], content_topics[], primary_category?, categories[]?}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub content_topics: Vec<String>,
    #[serde(default)]
    pub primary_category: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Follower count as written by the collector's backfill pass.
    /// Left raw: malformed values must degrade to "unknown", not fail
    /// the whole snapshot.
    #[serde(default)]
    pub follower_count: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_snapshot_deserializes() {
        let record: RawCreatorRecord =
            serde_json::from_str(r#"{"user_id": "chef_anna"}"#).expect("minimal snapshot");
        assert_eq!(record.user_id, "chef_anna");
        assert_eq!(record.platform, "instagram");
        assert!(record.posts.is_empty());
        assert!(record.profile_data.persona.is_none());
    }

    #[test]
    fn display_name_prefers_nickname() {
        let record: RawCreatorRecord =
            serde_json::from_str(r#"{"user_id": "u1", "nickname": "Anna"}"#).unwrap();
        assert_eq!(record.display_name(), "Anna");
    }

    #[test]
    fn display_name_falls_back_to_user_id() {
        let record: RawCreatorRecord =
            serde_json::from_str(r#"{"user_id": "u1", "nickname": ""}"#).unwrap();
        assert_eq!(record.display_name(), "u1");
    }

    #[test]
    fn profile_data_tolerates_malformed_follower_count() {
        let record: RawCreatorRecord = serde_json::from_str(
            r#"{"user_id": "u1", "profile_data": {"follower_count": "12k-ish"}}"#,
        )
        .expect("string follower_count must not break the snapshot");
        assert!(record.profile_data.follower_count.is_some());
    }
}
