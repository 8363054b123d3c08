//! Deterministic style-consistency grading.
//!
//! Scores a generated draft against the creator's measured pattern by
//! re-measuring the draft with the same text metrics. No model calls,
//! same input always gives the same score.

use creatorpulse_analytics::text;
use creatorpulse_analytics::EvidencePattern;

use crate::types::{ConsistencyLevel, ConsistencyScore, MetricEvidence, MetricStatus};

const LENGTH_MAX: u8 = 30;
const EMOJI_MAX: u8 = 25;
const HASHTAG_MAX: u8 = 25;
const VOICE_MAX: u8 = 20;

const HIGH_THRESHOLD: u8 = 80;
const MEDIUM_THRESHOLD: u8 = 60;

/// Grades generated text against a creator's evidence pattern.
///
/// An insufficient pattern degrades every metric to `estimated` at
/// roughly half weight rather than punishing the draft for missing
/// evidence. Empty text scores zero outright.
#[must_use]
pub fn score_consistency(generated: &str, pattern: &EvidencePattern) -> ConsistencyScore {
    let trimmed = generated.trim();
    if trimmed.is_empty() {
        return empty_text_score();
    }
    if !pattern.sufficient {
        return estimated_score(pattern.sample_count);
    }

    let measured = text::analyze(trimmed);
    let mut evidence = Vec::with_capacity(4);

    let (length_points, length_ev) = grade_length(measured.word_count, pattern);
    evidence.push(length_ev);

    let (emoji_points, emoji_ev) = grade_count_metric(
        "emoji_usage",
        "emojis",
        measured.emoji_count,
        pattern.avg_emoji_count,
        EMOJI_MAX,
        2.0,
        4.0,
    );
    evidence.push(emoji_ev);

    let (hashtag_points, hashtag_ev) = grade_count_metric(
        "hashtag_usage",
        "hashtags",
        measured.hashtag_count,
        pattern.avg_hashtag_count,
        HASHTAG_MAX,
        1.0,
        3.0,
    );
    evidence.push(hashtag_ev);

    let structural = length_points + emoji_points + hashtag_points;
    let (voice_points, voice_ev) = grade_voice(structural, pattern);
    evidence.push(voice_ev);

    let overall = structural + voice_points;
    let level = level_for(overall);
    ConsistencyScore {
        overall_score: overall,
        level,
        explanation: explanation_for(level).to_string(),
        evidence,
    }
}

fn grade_length(gen_words: usize, pattern: &EvidencePattern) -> (u8, MetricEvidence) {
    let (min_words, max_words) = pattern.word_count_range;
    let detail = format!(
        "{gen_words} words (creator average {:.0}, range {min_words}-{max_words})",
        pattern.avg_word_count
    );
    #[allow(clippy::cast_precision_loss)]
    let gen = gen_words as f64;
    let (points, status) = if (min_words..=max_words).contains(&gen_words) {
        (LENGTH_MAX, MetricStatus::Perfect)
    } else if pattern.avg_word_count > 0.0
        && ((gen - pattern.avg_word_count) / pattern.avg_word_count).abs() <= 0.3
    {
        (20, MetricStatus::Close)
    } else {
        (5, MetricStatus::Mismatch)
    };
    (
        points,
        MetricEvidence {
            metric: "length".to_string(),
            status,
            detail,
        },
    )
}

/// Shared grading for count-style metrics. Creators who never use the
/// marker get a stricter zero-baseline scale so one stray emoji does
/// not read as an exact match.
fn grade_count_metric(
    metric: &str,
    noun: &str,
    gen_count: usize,
    baseline: f64,
    max_points: u8,
    perfect_delta: f64,
    close_delta: f64,
) -> (u8, MetricEvidence) {
    let detail = format!("{gen_count} {noun} (creator average {baseline:.1})");
    #[allow(clippy::cast_precision_loss)]
    let gen = gen_count as f64;
    let (points, status) = if baseline == 0.0 {
        if gen_count == 0 {
            (max_points, MetricStatus::Perfect)
        } else if gen <= perfect_delta {
            (10, MetricStatus::Close)
        } else {
            (0, MetricStatus::Mismatch)
        }
    } else {
        let delta = (gen - baseline).abs();
        if delta <= perfect_delta {
            (max_points, MetricStatus::Perfect)
        } else if delta <= close_delta {
            (15, MetricStatus::Close)
        } else {
            (5, MetricStatus::Mismatch)
        }
    };
    (
        points,
        MetricEvidence {
            metric: metric.to_string(),
            status,
            detail,
        },
    )
}

fn grade_voice(structural_points: u8, pattern: &EvidencePattern) -> (u8, MetricEvidence) {
    if pattern.hooks.is_empty() {
        return (
            15,
            MetricEvidence {
                metric: "voice".to_string(),
                status: MetricStatus::Estimated,
                detail: "no representative openers available to compare against".to_string(),
            },
        );
    }
    if structural_points >= 60 {
        (
            VOICE_MAX,
            MetricEvidence {
                metric: "voice".to_string(),
                status: MetricStatus::Matched,
                detail: "structural profile tracks the creator's measured pattern".to_string(),
            },
        )
    } else {
        (
            15,
            MetricEvidence {
                metric: "voice".to_string(),
                status: MetricStatus::Estimated,
                detail: "structural drift limits confidence in voice similarity".to_string(),
            },
        )
    }
}

fn empty_text_score() -> ConsistencyScore {
    let mismatch = |metric: &str| MetricEvidence {
        metric: metric.to_string(),
        status: MetricStatus::Mismatch,
        detail: "no text to measure".to_string(),
    };
    ConsistencyScore {
        overall_score: 0,
        level: ConsistencyLevel::Low,
        evidence: vec![
            mismatch("length"),
            mismatch("emoji_usage"),
            mismatch("hashtag_usage"),
            mismatch("voice"),
        ],
        explanation: explanation_for(ConsistencyLevel::Low).to_string(),
    }
}

fn estimated_score(sample_count: usize) -> ConsistencyScore {
    let detail = format!("only {sample_count} captioned posts available; graded at reduced confidence");
    let estimated = |metric: &str| MetricEvidence {
        metric: metric.to_string(),
        status: MetricStatus::Estimated,
        detail: detail.clone(),
    };
    let evidence = vec![
        estimated("length"),
        estimated("emoji_usage"),
        estimated("hashtag_usage"),
        estimated("voice"),
    ];
    // Half weight per metric: 15 + 12 + 12 + 10.
    let overall = 49;
    ConsistencyScore {
        overall_score: overall,
        level: level_for(overall),
        evidence,
        explanation: "Too few posts to grade against; score reflects estimates only.".to_string(),
    }
}

fn level_for(overall: u8) -> ConsistencyLevel {
    if overall >= HIGH_THRESHOLD {
        ConsistencyLevel::High
    } else if overall >= MEDIUM_THRESHOLD {
        ConsistencyLevel::Medium
    } else {
        ConsistencyLevel::Low
    }
}

fn explanation_for(level: ConsistencyLevel) -> &'static str {
    match level {
        ConsistencyLevel::High => "The draft closely mirrors the creator's measured posting style.",
        ConsistencyLevel::Medium => {
            "The draft mostly follows the creator's style with some structural drift."
        }
        ConsistencyLevel::Low => "The draft diverges from the creator's measured posting style.",
    }
}
