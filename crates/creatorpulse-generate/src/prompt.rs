//! Pure prompt composition. Everything here is deterministic string
//! assembly over already-measured evidence; no I/O happens in this
//! module.

use std::fmt::Write as _;

use creatorpulse_analytics::{CreatorProfile, EngagementInsight, EvidencePattern, NormalizedPost};
use creatorpulse_core::{Category, Length, OutputFormat, Tone};

const STYLE_TEMPERATURE: f32 = 0.7;
const STYLE_MAX_TOKENS: u32 = 2000;
const TREND_TEMPERATURE: f32 = 0.8;
const TREND_MAX_TOKENS: u32 = 800;

const SAMPLE_CAPTION_MAX_CHARS: usize = 800;
const EXEMPLAR_CAPTION_MAX_CHARS: usize = 150;

const BANNED_OPENERS: &[&str] = &[
    "Did you know",
    "Have you ever",
    "Let's talk about",
    "In today's world",
    "Attention all",
];

/// Fully composed request ready for the chat-completions client.
#[derive(Debug, Clone)]
pub struct ComposedPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Builds the style-mirroring prompt for one creator.
///
/// Measured targets from the evidence pattern are only included when the
/// sample was large enough to trust; otherwise the prompt leans on the
/// stored profile description alone.
#[must_use]
pub fn compose_style_prompt(
    profile: &CreatorProfile,
    pattern: &EvidencePattern,
    samples: &[&NormalizedPost],
    topic: &str,
    tone: Tone,
    length: Length,
    format: OutputFormat,
) -> ComposedPrompt {
    let system = format!(
        "You are a social media ghostwriter who studies a specific creator's \
         published posts and writes new content indistinguishable from their own. \
         You never produce generic influencer copy. Creator: {}.",
        profile.display_name
    );

    let mut user = String::new();
    let _ = writeln!(user, "Write a new post about: {topic}");
    user.push('\n');

    let _ = writeln!(user, "Creator profile:");
    if let Some(persona) = &profile.persona {
        let _ = writeln!(user, "- Persona: {persona}");
    }
    if let Some(creator_tone) = &profile.tone {
        let _ = writeln!(user, "- Usual voice: {creator_tone}");
    }
    if !profile.interests.is_empty() {
        let _ = writeln!(user, "- Interests: {}", profile.interests.join(", "));
    }
    if !profile.topics.is_empty() {
        let _ = writeln!(user, "- Recurring topics: {}", profile.topics.join(", "));
    }
    user.push('\n');

    if pattern.sufficient {
        let (min_words, max_words) = pattern.word_count_range;
        let _ = writeln!(
            user,
            "Measured style targets (from {} recent posts):",
            pattern.sample_count
        );
        let _ = writeln!(
            user,
            "- Caption length: {min_words}-{max_words} words (average {:.0})",
            pattern.avg_word_count
        );
        let _ = writeln!(user, "- Emojis per post: about {:.1}", pattern.avg_emoji_count);
        let _ = writeln!(user, "- Hashtags per post: about {:.1}", pattern.avg_hashtag_count);
        user.push('\n');
    } else if pattern.sample_count > 0 {
        let _ = writeln!(
            user,
            "Only {} captioned posts were available, so match the profile \
             description rather than exact numeric targets.",
            pattern.sample_count
        );
        user.push('\n');
    }

    if !pattern.hooks.is_empty() {
        let _ = writeln!(user, "Openers this creator actually uses:");
        for hook in &pattern.hooks {
            let _ = writeln!(user, "- \"{}\" ({})", hook.text, hook.rationale);
        }
        let _ = writeln!(user, "Open the new post in the same spirit as these.");
        user.push('\n');
    }

    if !samples.is_empty() {
        let _ = writeln!(user, "Recent posts for reference:");
        for post in samples {
            let caption = truncate_chars(&post.caption, SAMPLE_CAPTION_MAX_CHARS);
            match post.like_count {
                Some(likes) => {
                    let _ = writeln!(user, "- ({likes} likes) {caption}");
                }
                None => {
                    let _ = writeln!(user, "- {caption}");
                }
            }
        }
        user.push('\n');
    }

    push_shared_instructions(&mut user, tone, length, format);

    ComposedPrompt {
        system,
        user,
        temperature: STYLE_TEMPERATURE,
        max_tokens: STYLE_MAX_TOKENS,
    }
}

/// Builds the category trend prompt, quoting the engagement arithmetic
/// literally so the model can reference concrete numbers.
#[must_use]
pub fn compose_trend_prompt(
    category: Category,
    insight: &EngagementInsight,
    exemplar_captions: &[String],
    topic: Option<&str>,
    tone: Tone,
    length: Length,
    format: OutputFormat,
) -> ComposedPrompt {
    let system = format!(
        "You are a social media strategist who writes data-grounded content \
         for the {} niche. Every claim you make is backed by the engagement \
         numbers provided.",
        category.display_name()
    );

    let mut user = String::new();
    match topic {
        Some(topic) => {
            let _ = writeln!(
                user,
                "Write a post about \"{topic}\" for the {} niche.",
                category.display_name()
            );
        }
        None => {
            let _ = writeln!(
                user,
                "Write a post on a currently effective angle for the {} niche.",
                category.display_name()
            );
        }
    }
    user.push('\n');

    let _ = writeln!(
        user,
        "Engagement data ({} creators, {} posts analyzed):",
        insight.creators_analyzed, insight.posts_analyzed
    );
    let _ = writeln!(
        user,
        "- Average engagement rate: {:.2}% of followers",
        insight.engagement_rate
    );
    let _ = writeln!(
        user,
        "- Projection for a {} follower account: {:.2}% x {} = {} engagements \
         ({} likes, {} comments)",
        insight.target_followers,
        insight.engagement_rate,
        insight.target_followers,
        insight.projected_likes + insight.projected_comments,
        insight.projected_likes,
        insight.projected_comments
    );
    match insight.like_comment_ratio {
        Some(ratio) => {
            let _ = writeln!(user, "- Observed like:comment ratio: {ratio:.1}:1");
        }
        None => {
            let _ = writeln!(
                user,
                "- No comments observed; the split assumes a typical 20:1 \
                 like:comment ratio"
            );
        }
    }
    let _ = writeln!(
        user,
        "- Raw averages per post: {} likes, {} comments",
        insight.raw_avg_likes, insight.raw_avg_comments
    );
    user.push('\n');

    if !exemplar_captions.is_empty() {
        let _ = writeln!(user, "Top performing captions in this niche:");
        for caption in exemplar_captions {
            let _ = writeln!(user, "- {}", truncate_chars(caption, EXEMPLAR_CAPTION_MAX_CHARS));
        }
        user.push('\n');
    }

    let _ = writeln!(
        user,
        "After the post, add a \"Key Strategy:\" line explaining in one sentence \
         why this angle should perform, citing the numbers above."
    );
    user.push('\n');

    push_shared_instructions(&mut user, tone, length, format);

    ComposedPrompt {
        system,
        user,
        temperature: TREND_TEMPERATURE,
        max_tokens: TREND_MAX_TOKENS,
    }
}

fn push_shared_instructions(user: &mut String, tone: Tone, length: Length, format: OutputFormat) {
    let _ = writeln!(user, "Style requirements:");
    let _ = writeln!(user, "- Tone: {}", tone_instruction(tone));
    let _ = writeln!(user, "- Length: {}", length_instruction(length));
    let _ = writeln!(user, "- Format: {}", format_instruction(format));
    let _ = writeln!(
        user,
        "- Never open with hollow phrases such as {}.",
        BANNED_OPENERS
            .iter()
            .map(|opener| format!("\"{opener}\""))
            .collect::<Vec<_>>()
            .join(", ")
    );
    user.push('\n');
    let _ = writeln!(user, "Respond in exactly this structure:");
    let _ = writeln!(user, "Caption: <the caption text>");
    let _ = writeln!(user, "Hashtags: <space-separated hashtags>");
}

fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Engaging => "warm and direct, written to pull the reader into a conversation",
        Tone::Professional => "polished and authoritative without sounding corporate",
        Tone::Casual => "relaxed and unfiltered, like a message to a friend",
    }
}

fn length_instruction(length: Length) -> &'static str {
    match length {
        Length::Short => "tight, roughly 50 words",
        Length::Medium => "roughly 100-150 words",
        Length::Long => "200+ words with a fuller narrative arc",
    }
}

fn format_instruction(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Post => "a single caption ready to publish",
        OutputFormat::Bullets => "a short intro followed by bullet points",
        OutputFormat::Script => "a short-form video script with spoken lines and brief scene notes",
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let cut: String = flattened.chars().take(max_chars).collect();
    format!("{cut}...")
}
