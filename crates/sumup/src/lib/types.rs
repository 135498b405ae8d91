use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Identifier of a video as it appears at the end of its url
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        VideoId(id.into())
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timed caption unit of a transcript
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TranscriptFragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Target summary length band handed to the summarizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBounds {
    pub min_length: usize,
    pub max_length: usize,
}

/// How long the summary should be relative to the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMode {
    Short,
    Medium,
    Long,
    Fixed(usize),
    /// Any option outside 1..=4; yields a zero length band
    Unbounded(i64),
}

impl LengthMode {
    /// Resolves the `option` / `word_length` request pair.
    ///
    /// `word_length` is only read for [`LengthMode::Fixed`] where it must be a
    /// positive integer, given as a JSON integer, a whole JSON float or a
    /// numeric string.
    pub fn from_option(option: i64, word_length: Option<&Value>) -> Result<Self, Error> {
        let mode = match option {
            1 => LengthMode::Short,
            2 => LengthMode::Medium,
            3 => LengthMode::Long,
            4 => LengthMode::Fixed(parse_word_length(word_length)?),
            other => LengthMode::Unbounded(other),
        };

        Ok(mode)
    }

    /// Computes the summary length band for a script of `word_count` words
    pub fn bounds(&self, word_count: usize) -> LengthBounds {
        let (min_length, max_length) = match *self {
            LengthMode::Short => (word_count / 16, word_count / 16 + 25),
            LengthMode::Medium => (word_count / 12, word_count / 12 + 50),
            LengthMode::Long => (word_count / 8, word_count / 8 + 100),
            LengthMode::Fixed(n) => (n, n.saturating_add(1)),
            LengthMode::Unbounded(_) => (0, 0),
        };

        LengthBounds {
            min_length,
            max_length,
        }
    }
}

fn parse_word_length(word_length: Option<&Value>) -> Result<usize, Error> {
    let parsed = match word_length {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                // whole floats such as `10.0`
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| usize::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<usize>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(Error::invalid_request(
            "'word_length' must be a positive integer when 'option' is 4",
        )),
    }
}
