use std::str::FromStr;

use creatorpulse_analytics::EngagementInsight;
use creatorpulse_core::{Category, Length, OutputFormat, Tone};
use serde::Serialize;

use crate::error::GenerateError;

/// Validated input for style-mirrored generation.
#[derive(Debug, Clone)]
pub struct StyleRequest {
    pub creator_id: String,
    pub topic: String,
    pub tone: Tone,
    pub length: Length,
    pub format: OutputFormat,
}

impl StyleRequest {
    /// Builds a request from raw caller input, rejecting unknown option
    /// values before any other work happens.
    pub fn new(
        creator_id: &str,
        topic: &str,
        tone: Option<&str>,
        length: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, GenerateError> {
        let creator_id = creator_id.trim();
        if creator_id.is_empty() {
            return Err(GenerateError::Validation("creator_id must not be empty".into()));
        }
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerateError::Validation("topic must not be empty".into()));
        }
        Ok(Self {
            creator_id: creator_id.to_string(),
            topic: topic.to_string(),
            tone: parse_or_default(tone)?,
            length: parse_or_default(length)?,
            format: parse_or_default(format)?,
        })
    }
}

/// Validated input for category trend generation.
#[derive(Debug, Clone)]
pub struct TrendRequest {
    pub category: Category,
    pub topic: Option<String>,
    pub target_followers: Option<u64>,
    pub tone: Tone,
    pub length: Length,
    pub format: OutputFormat,
}

impl TrendRequest {
    pub fn new(
        category: &str,
        topic: Option<&str>,
        target_followers: Option<u64>,
        tone: Option<&str>,
        length: Option<&str>,
        format: Option<&str>,
    ) -> Result<Self, GenerateError> {
        let category = Category::from_str(category.trim())
            .map_err(|err| GenerateError::Validation(err.to_string()))?;
        if target_followers == Some(0) {
            return Err(GenerateError::Validation("target_followers must be positive".into()));
        }
        let topic = topic.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        Ok(Self {
            category,
            topic,
            target_followers,
            tone: parse_or_default(tone)?,
            length: parse_or_default(length)?,
            format: parse_or_default(format)?,
        })
    }
}

fn parse_or_default<T>(raw: Option<&str>) -> Result<T, GenerateError>
where
    T: Default + FromStr<Err = creatorpulse_core::UnknownOption>,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => Ok(value.parse()?),
        None => Ok(T::default()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Perfect,
    Close,
    Matched,
    Estimated,
    Mismatch,
}

/// One scored dimension of the style-consistency check.
#[derive(Debug, Clone, Serialize)]
pub struct MetricEvidence {
    pub metric: String,
    pub status: MetricStatus,
    pub detail: String,
}

/// Deterministic score of a generated draft against the creator's
/// measured posting pattern.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyScore {
    pub overall_score: u8,
    pub level: ConsistencyLevel,
    pub evidence: Vec<MetricEvidence>,
    pub explanation: String,
}

/// Generated content plus the provenance of what was analyzed to
/// produce it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency: Option<ConsistencyScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<EngagementInsight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub creators_analyzed: usize,
    pub posts_analyzed: usize,
}

/// Listing row for stored creators.
#[derive(Debug, Clone, Serialize)]
pub struct CreatorSummary {
    pub creator_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    pub categories: Vec<Category>,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    pub post_count: usize,
}
