use std::collections::HashMap;
use std::sync::Arc;

use creatorpulse_analytics::{
    classify, engagement, evidence, metrics, EngagementInsight, NormalizedPost,
};
use creatorpulse_core::{AppConfig, Category, CategoryTable};
use creatorpulse_store::SnapshotStore;
use tracing::info;

use crate::client::GeneratorClient;
use crate::error::GenerateError;
use crate::prompt;
use crate::scorer::score_consistency;
use crate::types::{CreatorSummary, GenerationResult, StyleRequest, TrendRequest};

/// Thresholds and limits the orchestrator works with, lifted from app
/// config so the crate stays testable without environment access.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    pub target_followers: u64,
    pub min_evidence_posts: usize,
    pub sample_posts_limit: usize,
}

impl From<&AppConfig> for OrchestratorSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            target_followers: config.target_followers,
            min_evidence_posts: config.min_evidence_posts,
            sample_posts_limit: config.sample_posts_limit,
        }
    }
}

/// Coordinates the full generation workflows over loaded snapshots.
///
/// Holds no mutable state; every call re-derives profiles, posts and
/// patterns from the snapshot store so results always reflect the data
/// that was loaded.
pub struct Orchestrator {
    store: Arc<SnapshotStore>,
    categories: Arc<CategoryTable>,
    client: Option<GeneratorClient>,
    settings: OrchestratorSettings,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        store: Arc<SnapshotStore>,
        categories: Arc<CategoryTable>,
        client: Option<GeneratorClient>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            store,
            categories,
            client,
            settings,
        }
    }

    /// Builds an orchestrator from app config. A missing API key is not
    /// an error here; generation calls fail with `NotConfigured` later.
    pub fn from_config(
        store: Arc<SnapshotStore>,
        categories: Arc<CategoryTable>,
        config: &AppConfig,
    ) -> Result<Self, GenerateError> {
        let client = match &config.generator_api_key {
            Some(key) => Some(GeneratorClient::with_base_url(
                key.clone(),
                config.generator_model.clone(),
                config.generator_timeout_secs,
                config.generator_base_url.clone(),
            )?),
            None => None,
        };
        Ok(Self::new(
            store,
            categories,
            client,
            OrchestratorSettings::from(config),
        ))
    }

    /// Whether a generator client is available for generation calls.
    #[must_use]
    pub fn is_generator_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Number of creator snapshots loaded.
    #[must_use]
    pub fn creator_count(&self) -> usize {
        self.store.len()
    }

    /// Lists every stored creator with derived classification.
    #[must_use]
    pub fn creators(&self) -> Vec<CreatorSummary> {
        self.store
            .all()
            .map(|record| {
                let profile = metrics::extract_profile(record);
                let categories = classify::classify(&profile, &self.categories);
                let posts = metrics::extract_posts(record, &categories);
                CreatorSummary {
                    creator_id: profile.creator_id,
                    name: profile.display_name,
                    follower_count: profile.follower_count,
                    categories,
                    topics: profile.topics,
                    tone: profile.tone,
                    post_count: posts.len(),
                }
            })
            .collect()
    }

    /// Derived categories for one stored creator.
    pub fn classify_creator(&self, creator_id: &str) -> Result<Vec<Category>, GenerateError> {
        let record = self
            .store
            .get(creator_id)
            .ok_or_else(|| GenerateError::NotFound(format!("creator {creator_id} not found")))?;
        let profile = metrics::extract_profile(record);
        Ok(classify::classify(&profile, &self.categories))
    }

    /// Computes the category engagement insight on demand.
    ///
    /// A category with no qualifying posts returns the flagged empty
    /// insight; it is the generation paths that treat that state as an
    /// error, not this one.
    #[must_use]
    pub fn category_insight(
        &self,
        category: Category,
        target_followers: Option<u64>,
    ) -> EngagementInsight {
        let target = target_followers.unwrap_or(self.settings.target_followers);
        let (posts, follower_counts, _) = self.collect_category(category);
        engagement::compute_insight(category, &posts, &follower_counts, target)
    }

    /// Style-mirrored generation for one creator.
    pub async fn generate_style(
        &self,
        request: &StyleRequest,
    ) -> Result<GenerationResult, GenerateError> {
        let record = self.store.get(&request.creator_id).ok_or_else(|| {
            GenerateError::NotFound(format!("creator {} not found", request.creator_id))
        })?;

        let profile = metrics::extract_profile(record);
        let categories = classify::classify(&profile, &self.categories);
        let posts = metrics::extract_posts(record, &categories);
        if posts.is_empty() {
            return Err(GenerateError::InsufficientData(format!(
                "creator {} has no usable posts",
                request.creator_id
            )));
        }

        let pattern =
            evidence::extract_pattern(&profile.creator_id, &posts, self.settings.min_evidence_posts);
        let samples: Vec<&NormalizedPost> = posts
            .iter()
            .filter(|post| !post.caption.is_empty())
            .take(self.settings.sample_posts_limit)
            .collect();

        let composed = prompt::compose_style_prompt(
            &profile,
            &pattern,
            &samples,
            &request.topic,
            request.tone,
            request.length,
            request.format,
        );

        let content = self.client()?.generate(&composed).await?;
        let consistency = score_consistency(&content, &pattern);

        info!(
            creator_id = %profile.creator_id,
            posts = posts.len(),
            score = consistency.overall_score,
            "style generation complete"
        );

        Ok(GenerationResult {
            content,
            consistency: Some(consistency),
            insight: None,
            creator_name: Some(profile.display_name),
            category: None,
            creators_analyzed: 1,
            posts_analyzed: posts.len(),
        })
    }

    /// Data-grounded trend generation for a category.
    pub async fn generate_trend(
        &self,
        request: &TrendRequest,
    ) -> Result<GenerationResult, GenerateError> {
        let (posts, follower_counts, creator_count) = self.collect_category(request.category);
        if creator_count == 0 {
            return Err(GenerateError::NotFound(format!(
                "no creators classified under {}",
                request.category
            )));
        }

        let target = request
            .target_followers
            .unwrap_or(self.settings.target_followers);
        let insight =
            engagement::compute_insight(request.category, &posts, &follower_counts, target);
        if !insight.has_data() {
            return Err(GenerateError::InsufficientData(format!(
                "no qualifying engagement data for {}",
                request.category
            )));
        }

        let exemplars = top_captions(&posts, self.settings.sample_posts_limit);
        let composed = prompt::compose_trend_prompt(
            request.category,
            &insight,
            &exemplars,
            request.topic.as_deref(),
            request.tone,
            request.length,
            request.format,
        );

        let content = self.client()?.generate(&composed).await?;

        info!(
            category = %request.category,
            creators = creator_count,
            posts = posts.len(),
            "trend generation complete"
        );

        Ok(GenerationResult {
            content,
            consistency: None,
            insight: Some(insight),
            creator_name: None,
            category: Some(request.category),
            creators_analyzed: creator_count,
            posts_analyzed: posts.len(),
        })
    }

    fn client(&self) -> Result<&GeneratorClient, GenerateError> {
        self.client.as_ref().ok_or_else(|| {
            GenerateError::NotConfigured(
                "no generator API key configured; set OPENAI_API_KEY".into(),
            )
        })
    }

    /// Gathers every post and follower count for creators classified
    /// into `category`. The count is of classified creators, qualifying
    /// or not.
    fn collect_category(
        &self,
        category: Category,
    ) -> (Vec<NormalizedPost>, HashMap<String, Option<u64>>, usize) {
        let mut posts = Vec::new();
        let mut follower_counts = HashMap::new();
        let mut creator_count = 0;

        for record in self.store.all() {
            let profile = metrics::extract_profile(record);
            let categories = classify::classify(&profile, &self.categories);
            if !categories.contains(&category) {
                continue;
            }
            creator_count += 1;
            follower_counts.insert(profile.creator_id.clone(), profile.follower_count);
            posts.extend(metrics::extract_posts(record, &categories));
        }

        (posts, follower_counts, creator_count)
    }
}

/// Highest-engagement non-empty captions, best first.
fn top_captions(posts: &[NormalizedPost], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&NormalizedPost> =
        posts.iter().filter(|p| !p.caption.is_empty()).collect();
    ranked.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
    ranked
        .into_iter()
        .take(limit)
        .map(|p| p.caption.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, caption: &str, likes: u64) -> NormalizedPost {
        NormalizedPost {
            post_id: id.to_string(),
            creator_id: "c1".to_string(),
            caption: caption.to_string(),
            like_count: Some(likes),
            comment_count: Some(0),
            taken_at: None,
            categories: vec![],
        }
    }

    #[test]
    fn top_captions_ranks_by_engagement_and_skips_empty() {
        let posts = vec![
            post("p1", "low performer", 10),
            post("p2", "", 9_999),
            post("p3", "top performer", 500),
            post("p4", "middle", 100),
        ];
        let captions = top_captions(&posts, 2);
        assert_eq!(captions, vec!["top performer", "middle"]);
    }
}
