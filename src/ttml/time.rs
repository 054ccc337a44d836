/*!
 * TTML time expressions.
 *
 * Writing supports the clock, frame, offset-seconds, offset-milliseconds
 * and tick forms. Reading accepts any clock-time or offset-time
 * expression from TTML 1.0 section 10.3.1 except wall-clock values.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{ImscError, ImscResult};

// @const: Offset time ("12.5s", "300ms", "40f", ...)
static OFFSET_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)(h|m|s|ms|f|t)$").expect("Invalid offset time regex")
});

// @const: Clock time ("01:02:03.456", "01:02:03:12", "01:02:03:12.1")
static CLOCK_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})(?:\.(\d+)|:(\d{2,})(?:\.\d+)?)?$")
        .expect("Invalid clock time regex")
});

/// Output form of `begin`/`end`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeCodeFormat {
    /// `HH:MM:SS.mmm`
    #[default]
    Clock,
    /// `HH:MM:SS:FF`
    ClockFrames,
    /// `12.345s`
    Seconds,
    /// `12345ms`
    Milliseconds,
    /// `123450000t`
    Ticks,
}

/// Frame and tick rates a time expression is interpreted against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBase {
    pub frame_rate: u32,
    pub tick_rate: u64,
}

impl Default for TimeBase {
    fn default() -> Self {
        TimeBase {
            frame_rate: 25,
            tick_rate: 10_000_000,
        }
    }
}

/// Renders milliseconds as a TTML time expression
pub fn format_time(ms: u64, format: TimeCodeFormat, base: TimeBase) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    match format {
        TimeCodeFormat::Clock => {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        }
        TimeCodeFormat::ClockFrames => {
            let frames = millis * u64::from(base.frame_rate) / 1_000;
            format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
        }
        TimeCodeFormat::Seconds => format!("{}.{:03}s", ms / 1_000, millis),
        TimeCodeFormat::Milliseconds => format!("{}ms", ms),
        TimeCodeFormat::Ticks => format!("{}t", u128::from(ms) * u128::from(base.tick_rate) / 1_000),
    }
}

/// Parses a TTML time expression into milliseconds
pub fn parse_time(expr: &str, base: TimeBase) -> ImscResult<u64> {
    let expr = expr.trim();

    if let Some(caps) = CLOCK_TIME_REGEX.captures(expr) {
        let number = |idx: usize| -> ImscResult<u64> {
            caps.get(idx)
                .map_or(Ok(0), |m| m.as_str().parse::<u64>())
                .map_err(|e| ImscError::InvalidTime(format!("{}: {}", expr, e)))
        };

        let hours = number(1)?;
        let minutes = number(2)?;
        let seconds = number(3)?;
        if minutes >= 60 || seconds >= 60 {
            return Err(ImscError::InvalidTime(format!(
                "minutes and seconds must be below 60 in '{}'",
                expr
            )));
        }

        let fraction_ms = match caps.get(4) {
            Some(fraction) => fraction_to_ms(fraction.as_str()),
            None => 0,
        };
        let frame_ms = match caps.get(5) {
            Some(_) => number(5)?
                .checked_mul(1_000)
                .ok_or_else(|| out_of_range(expr))?
                / u64::from(base.frame_rate.max(1)),
            None => 0,
        };

        return hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + fraction_ms))
            .and_then(|ms| ms.checked_add(frame_ms))
            .ok_or_else(|| out_of_range(expr));
    }

    if let Some(caps) = OFFSET_TIME_REGEX.captures(expr) {
        let value: f64 = caps[1]
            .parse()
            .map_err(|e| ImscError::InvalidTime(format!("{}: {}", expr, e)))?;

        let ms = match &caps[2] {
            "h" => value * 3_600_000.0,
            "m" => value * 60_000.0,
            "s" => value * 1_000.0,
            "ms" => value,
            "f" => value * 1_000.0 / f64::from(base.frame_rate.max(1)),
            _ => value * 1_000.0 / base.tick_rate.max(1) as f64,
        };

        let ms = ms.round();
        if !ms.is_finite() || ms >= u64::MAX as f64 {
            return Err(out_of_range(expr));
        }
        return Ok(ms as u64);
    }

    Err(ImscError::InvalidTime(format!("unrecognized time expression '{}'", expr)))
}

fn out_of_range(expr: &str) -> ImscError {
    ImscError::InvalidTime(format!("time expression '{}' is out of range", expr))
}

/// Decimal fraction of a second, rounded to milliseconds (".5" -> 500)
fn fraction_to_ms(digits: &str) -> u64 {
    let padded: String = digits.chars().chain("000".chars()).take(4).collect();
    let value: u64 = padded.parse().unwrap_or(0);
    (value + 5) / 10
}
