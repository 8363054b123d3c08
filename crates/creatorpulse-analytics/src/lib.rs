//! Engagement analytics over normalized creator data.
//!
//! Pipeline: raw snapshots ([`creatorpulse_store`]) → metric extraction
//! ([`metrics`]) → normalized posts → engagement aggregation
//! ([`engagement`]) and evidence mining ([`evidence`]), with category
//! resolution in [`classify`]. Everything here is pure computation over
//! request-local data; nothing performs I/O beyond logging.

pub mod classify;
pub mod engagement;
pub mod evidence;
pub mod metrics;
pub mod text;
mod types;

pub use types::{
    CreatorProfile, EngagementInsight, EvidencePattern, Hook, NormalizedPost,
    DEFAULT_LIKE_COMMENT_RATIO,
};
