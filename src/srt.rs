use anyhow::{anyhow, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

use crate::subtitle::{Paragraph, Subtitle};

// @module: SRT input and output for the command line front end

// @const: SRT timestamp line
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2})[,.](\d{3})")
        .expect("Invalid SRT timestamp regex")
});

/// Parse SRT content into a subtitle sorted by start time
pub fn parse_srt_string(content: &str) -> Result<Subtitle> {
    let mut paragraphs = Vec::new();

    let mut current_seq_num: Option<usize> = None;
    let mut current_times: Option<(u64, u64)> = None;
    let mut current_text = String::new();

    let mut finish_entry = |seq_num: usize, times: (u64, u64), text: &str| {
        if text.trim().is_empty() {
            warn!("Skipping empty subtitle entry {}", seq_num);
        } else if times.1 < times.0 {
            warn!("Skipping subtitle entry {} ending before it starts", seq_num);
        } else {
            paragraphs.push(Paragraph::new(times.0, times.1, text.trim()));
        }
    };

    for (line_index, line) in content.lines().enumerate() {
        let trimmed = line.trim().trim_start_matches('\u{feff}');

        if trimmed.is_empty() {
            if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
                if !current_text.is_empty() {
                    finish_entry(seq_num, times, &current_text);
                    current_seq_num = None;
                    current_times = None;
                    current_text.clear();
                }
            }
            continue;
        }

        if current_seq_num.is_none() && current_text.is_empty() {
            if let Ok(num) = trimmed.parse::<usize>() {
                current_seq_num = Some(num);
                continue;
            }
        }

        if current_seq_num.is_some() && current_times.is_none() {
            if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                current_times = Some((timestamp_to_ms(&caps, 1), timestamp_to_ms(&caps, 5)));
                continue;
            }
        }

        if current_times.is_some() {
            if !current_text.is_empty() {
                current_text.push('\n');
            }
            current_text.push_str(trimmed);
        } else {
            warn!(
                "Unexpected text at line {} before sequence number or timestamp: {}",
                line_index + 1,
                trimmed
            );
        }
    }

    if let (Some(seq_num), Some(times)) = (current_seq_num, current_times) {
        if !current_text.is_empty() {
            finish_entry(seq_num, times, &current_text);
        }
    }

    if paragraphs.is_empty() {
        return Err(anyhow!("No valid subtitle entries were found in the SRT content"));
    }

    paragraphs.sort_by_key(|p| p.start_time_ms);
    Ok(Subtitle::new(paragraphs))
}

/// Render paragraphs as numbered SRT blocks
pub fn to_srt_string(subtitle: &Subtitle) -> String {
    let mut out = String::new();
    for (i, paragraph) in subtitle.paragraphs.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = write!(out, "{}\n{}\n", i + 1, paragraph);
    }
    out
}

fn timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
    let part = |idx: usize| -> u64 {
        caps.get(idx)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };

    (part(start_idx) * 3600 + part(start_idx + 1) * 60 + part(start_idx + 2)) * 1000 + part(start_idx + 3)
}
