use serde::{Deserialize, Serialize};
use std::fmt;

use crate::imsc::effects::{self, EffectMap};

// @module: Subtitle data model consumed by the converters

// @struct: Single timed text entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Display text, lines separated by newlines, may carry inline markup
    pub text: String,

    // @field: Style reference
    #[serde(default)]
    pub style: Option<String>,

    // @field: Language tag
    #[serde(default)]
    pub language: Option<String>,

    // @field: Forced display flag
    #[serde(default)]
    pub forced: bool,

    // @field: Serialized effect attributes ("key=value|key=value")
    #[serde(default)]
    pub effect: Option<String>,
}

impl Paragraph {
    /// Creates a plain paragraph with no style, language or effects
    pub fn new(start_time_ms: u64, end_time_ms: u64, text: impl Into<String>) -> Self {
        Paragraph {
            start_time_ms,
            end_time_ms,
            text: text.into(),
            ..Default::default()
        }
    }

    /// All effect entries, freshly decoded on every call
    pub fn effects(&self) -> EffectMap {
        effects::decode(self.effect.as_deref().unwrap_or_default())
    }

    /// Value of one effect entry
    pub fn get_effect(&self, key: &str) -> Option<String> {
        self.effects().get(key).map(str::to_string)
    }

    /// Stores an effect entry; an empty value removes the entry
    pub fn set_effect(&mut self, key: &str, value: &str) {
        let mut map = self.effects();
        if value.is_empty() {
            map.remove(key);
        } else {
            map.insert(key, value);
        }

        let encoded = effects::encode(&map);
        self.effect = if encoded.is_empty() { None } else { Some(encoded) };
    }

    /// Format a timestamp in milliseconds as HH:MM:SS,mmm
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_time_ms),
            Self::format_timestamp(self.end_time_ms)
        )?;
        writeln!(f, "{}", self.text)
    }
}

/// Splits text on any newline convention, keeping empty lines
pub fn split_to_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(['\r', '\n']) {
        lines.push(&rest[..pos]);
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
    }
    lines.push(rest);

    lines
}

/// Ordered list of paragraphs plus the document they were loaded from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    /// Paragraphs in display order
    pub paragraphs: Vec<Paragraph>,

    /// Source document, reused as the header when writing back
    #[serde(default)]
    pub header: Option<String>,
}

impl Subtitle {
    /// Create a subtitle without a header
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Subtitle {
            paragraphs,
            header: None,
        }
    }
}
