use std::{ops::Deref, time::Duration};

use reqwest::{header::COOKIE, Url};
use serde_json::Value;

use crate::{
    error::TranscriptError,
    parser::{
        parse_caption_tracks, parse_timed_text, select_caption_track, CaptionTrack, YtWatchPage,
    },
    types::{TranscriptFragment, VideoId},
    yt::TranscriptSource,
};

/// Fetches captions straight from the YouTube watch page and timed text api
#[derive(Debug, Clone)]
pub struct YtTranscriptClient {
    client: reqwest::Client,
    language: String,
    base_url: String,
}

impl Deref for YtTranscriptClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl YtTranscriptClient {
    pub const YOUTUBE_BASE_URL: &'static str = "https://www.youtube.com";

    pub fn new(language: impl Into<String>, timeout: Duration) -> Result<Self, TranscriptError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, language))
    }

    pub fn with_client(client: reqwest::Client, language: impl Into<String>) -> Self {
        Self {
            client,
            language: language.into(),
            base_url: Self::YOUTUBE_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[tracing::instrument(skip(self, consent))]
    async fn fetch_watch_page(
        &self,
        video_id: &VideoId,
        consent: Option<&str>,
    ) -> Result<YtWatchPage, TranscriptError> {
        let mut req = self
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", &**video_id)])
            .header("Accept-Language", "en-US,en;q=0.9");
        if let Some(value) = consent {
            req = req.header(COOKIE, format!("CONSENT=YES+{value}"));
        }

        let resp = req
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TranscriptError::Api { status, message });
        }

        Ok(resp.text().await?.into())
    }

    /// Fetches the watch page, accepting the cookie consent form once if YouTube serves it
    async fn fetch_player_page(
        &self,
        video_id: &VideoId,
    ) -> Result<YtWatchPage, TranscriptError> {
        let page = self.fetch_watch_page(video_id, None).await?;
        if !page.is_consent_form() {
            return Ok(page);
        }

        let Some(consent) = page.consent_value().map(str::to_string) else {
            tracing::error!(%video_id, "Consent form without a consent value");
            return Err(TranscriptError::ConsentRequired);
        };
        tracing::warn!(%video_id, "Got a cookie consent form, retrying with a CONSENT cookie");

        let page = self.fetch_watch_page(video_id, Some(&consent)).await?;
        if page.is_consent_form() {
            tracing::error!(%video_id, "Consent form served again after setting the CONSENT cookie");
            return Err(TranscriptError::ConsentRequired);
        }

        Ok(page)
    }

    /// Resolves the track's `baseUrl` against the site and forces `fmt=json3`,
    /// replacing any format the track already asks for (usually `srv3`).
    fn timed_text_url(&self, track: &CaptionTrack) -> Result<Url, TranscriptError> {
        let mut url = Url::parse(&self.base_url)
            .and_then(|base| base.join(&track.base_url))
            .map_err(|_| TranscriptError::ParseError("Invalid caption track url"))?;

        let pairs = url
            .query_pairs()
            .filter(|(key, _)| key != "fmt")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<Vec<_>>();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .append_pair("fmt", "json3");

        Ok(url)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_timed_text(&self, track: &CaptionTrack) -> Result<Value, TranscriptError> {
        let resp = self
            .get(self.timed_text_url(track)?)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TranscriptError::Api { status, message });
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            tracing::warn!(
                language = %track.language_code,
                "Empty timed text body, the track likely requires a session token"
            );
            return Err(TranscriptError::NoCaptions);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl TranscriptSource for YtTranscriptClient {
    type Error = TranscriptError;

    async fn fetch_transcript(
        &self,
        video_id: &VideoId,
    ) -> Result<Vec<TranscriptFragment>, Self::Error> {
        let page = self.fetch_player_page(video_id).await?;
        let player_response = page.to_json::<Value>()?;
        let tracks = parse_caption_tracks(&player_response)?;

        let track =
            select_caption_track(&tracks, &self.language).ok_or(TranscriptError::NoCaptions)?;
        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        let timed_text = self.fetch_timed_text(track).await?;
        let fragments = parse_timed_text(&timed_text)?;

        if fragments.is_empty() {
            return Err(TranscriptError::NoCaptions);
        }

        Ok(fragments)
    }
}
