//! # Yt Parser
//!
//! Extracts caption track metadata from a YouTube watch page and turns the
//! `json3` timed text format into transcript fragments.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::{error::TranscriptError, types::TranscriptFragment};

static YT_PLAYER_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?s)var\s+ytInitialPlayerResponse\s*=\s*(\{.*?\});\s*(?:var\s|</script>)",
    )
    .unwrap()
});

static YT_CONSENT_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| regex::Regex::new(r#"name="v" value="(.*?)""#).unwrap());

const YT_CONSENT_FORM_ACTION: &str = r#"action="https://consent.youtube.com/s""#;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `Some("asr")` for auto generated captions
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Reads the caption tracks from the `ytInitialPlayerResponse` json.
///
/// # Returns
/// * `Err(TranscriptError::Unplayable)` if the video is private, removed or age gated.
/// * `Err(TranscriptError::NoCaptions)` if the video has no caption tracks.
#[tracing::instrument(skip(json))]
pub fn parse_caption_tracks(json: &Value) -> Result<Vec<CaptionTrack>, TranscriptError> {
    let playability = &json["playabilityStatus"];
    if let Some(status) = playability["status"].as_str() {
        if status != "OK" {
            return Err(TranscriptError::Unplayable {
                status: status.to_string(),
                reason: playability["reason"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
            });
        }
    }

    let Some(tracks) =
        json["captions"]["playerCaptionsTracklistRenderer"]["captionTracks"].as_array()
    else {
        return Err(TranscriptError::NoCaptions);
    };

    let tracks = tracks
        .iter()
        .cloned()
        .map(serde_json::from_value::<CaptionTrack>)
        .collect::<Result<Vec<_>, _>>()?;

    if tracks.is_empty() {
        return Err(TranscriptError::NoCaptions);
    }

    Ok(tracks)
}

/// Picks the track to download for `language`.
///
/// Manually created captions win over generated ones, an exact language match
/// wins over a regional variant (`en` matches `en-GB`), and the first track is
/// the fallback.
pub fn select_caption_track<'a>(
    tracks: &'a [CaptionTrack],
    language: &str,
) -> Option<&'a CaptionTrack> {
    let exact = |generated: bool| {
        tracks
            .iter()
            .find(|t| t.language_code == language && t.is_generated() == generated)
    };
    let regional = || {
        tracks.iter().find(|t| {
            t.language_code
                .split('-')
                .next()
                .is_some_and(|base| base == language)
        })
    };

    exact(false)
        .or_else(|| exact(true))
        .or_else(regional)
        .or_else(|| tracks.first())
}

/// Parses a `fmt=json3` timed text document.
///
/// Events without text segments (window setup, line breaks) are skipped.
pub fn parse_timed_text(json: &Value) -> Result<Vec<TranscriptFragment>, TranscriptError> {
    let events = json["events"]
        .as_array()
        .ok_or(TranscriptError::ParseError(
            "Failed to get 'events' from timed text document",
        ))?;

    let fragments = events
        .iter()
        .filter_map(|event| {
            let segs = event["segs"].as_array()?;
            let text = segs
                .iter()
                .filter_map(|seg| seg["utf8"].as_str())
                .collect::<String>()
                .replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            let start = event["tStartMs"].as_f64().unwrap_or_default() / 1000.0;
            let duration = event["dDurationMs"].as_f64().unwrap_or_default() / 1000.0;
            Some(TranscriptFragment::new(text, start, duration))
        })
        .collect();

    Ok(fragments)
}

pub struct YtWatchPage(String);

impl Deref for YtWatchPage {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl YtWatchPage {
    pub fn new(doc: String) -> Self {
        YtWatchPage(doc)
    }

    /// EU visitors without a `CONSENT` cookie get a consent form instead of the player
    pub fn is_consent_form(&self) -> bool {
        self.contains(YT_CONSENT_FORM_ACTION)
    }

    /// The value the consent form would submit, used to build the `CONSENT` cookie
    pub fn consent_value(&self) -> Option<&str> {
        YT_CONSENT_VALUE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
    }

    pub fn to_json<T>(&self) -> Result<T, TranscriptError>
    where
        T: DeserializeOwned,
    {
        YT_PLAYER_RESPONSE_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .and_then(|m| serde_json::from_str(m.as_str()).ok())
            .ok_or(TranscriptError::ParseError(
                "Failed to extract ytInitialPlayerResponse from the page's script tag",
            ))
    }
}

impl From<String> for YtWatchPage {
    fn from(value: String) -> Self {
        YtWatchPage(value)
    }
}
