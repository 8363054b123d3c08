//! Recognized generation options: tone, length, and output format.
//!
//! Each option maps to a distinct instruction fragment in the prompt
//! composer. Unrecognized values fail parsing — they are never silently
//! replaced with a default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A caller supplied an option value outside the recognized set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized {field} '{value}' (expected one of: {expected})")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Engaging,
    Professional,
    Casual,
}

impl FromStr for Tone {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engaging" => Ok(Tone::Engaging),
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            other => Err(UnknownOption {
                field: "tone",
                value: other.to_string(),
                expected: "engaging, professional, casual",
            }),
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Engaging => write!(f, "engaging"),
            Tone::Professional => write!(f, "professional"),
            Tone::Casual => write!(f, "casual"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

impl FromStr for Length {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Length::Short),
            "medium" => Ok(Length::Medium),
            "long" => Ok(Length::Long),
            other => Err(UnknownOption {
                field: "length",
                value: other.to_string(),
                expected: "short, medium, long",
            }),
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Short => write!(f, "short"),
            Length::Medium => write!(f, "medium"),
            Length::Long => write!(f, "long"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Post,
    Bullets,
    Script,
}

impl FromStr for OutputFormat {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(OutputFormat::Post),
            "bullets" => Ok(OutputFormat::Bullets),
            "script" => Ok(OutputFormat::Script),
            other => Err(UnknownOption {
                field: "format",
                value: other.to_string(),
                expected: "post, bullets, script",
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Post => write!(f, "post"),
            OutputFormat::Bullets => write!(f, "bullets"),
            OutputFormat::Script => write!(f, "script"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_parses_recognized_values() {
        assert_eq!("engaging".parse::<Tone>().unwrap(), Tone::Engaging);
        assert_eq!("professional".parse::<Tone>().unwrap(), Tone::Professional);
        assert_eq!("casual".parse::<Tone>().unwrap(), Tone::Casual);
    }

    #[test]
    fn tone_rejects_unrecognized_value() {
        let err = "sarcastic".parse::<Tone>().unwrap_err();
        assert_eq!(err.field, "tone");
        assert_eq!(err.value, "sarcastic");
        assert!(err.to_string().contains("unrecognized tone 'sarcastic'"));
    }

    #[test]
    fn tone_is_case_sensitive() {
        // "Engaging" is not a recognized wire value; the API contract is lowercase.
        assert!("Engaging".parse::<Tone>().is_err());
    }

    #[test]
    fn length_rejects_unrecognized_value() {
        assert!("verbose".parse::<Length>().is_err());
    }

    #[test]
    fn format_rejects_unrecognized_value() {
        assert!("haiku".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn defaults_match_api_contract() {
        assert_eq!(Tone::default(), Tone::Engaging);
        assert_eq!(Length::default(), Length::Medium);
        assert_eq!(OutputFormat::default(), OutputFormat::Post);
    }

    #[test]
    fn serde_roundtrip_is_lowercase() {
        let json = serde_json::to_string(&Tone::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
        let back: Tone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tone::Professional);
    }
}
