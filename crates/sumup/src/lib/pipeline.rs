pub mod builder;

use itertools::Itertools;

use crate::{
    error::{Error, InferenceStage, Result},
    types::{LengthBounds, LengthMode, TranscriptFragment, VideoId},
    yt::{extract_video_id, TranscriptSource},
    GrammarChecker, Summarizer,
};

/// A single `/process_video` job after request validation
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeRequest {
    pub url: String,
    pub mode: LengthMode,
    /// `None` falls back to the pipeline's configured default
    pub check_grammar: Option<bool>,
}

/// Joins fragment texts with single spaces and trims the result
pub fn assemble_script(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .join(" ")
        .trim()
        .to_string()
}

/// Builds the script and the summary length band for `mode`
pub fn plan_script(fragments: &[TranscriptFragment], mode: LengthMode) -> (String, LengthBounds) {
    let script = assemble_script(fragments);
    let word_count = script.split_whitespace().count();
    let bounds = mode.bounds(word_count);

    (script, bounds)
}

// Transcript -> summary -> (optional) grammar correction, one request at a time
#[derive(Debug)]
pub struct VideoSummarizer<T, S, G>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    G: GrammarChecker + Send + Sync + 'static,
{
    transcript_source: T,
    summarizer: S,
    grammar_checker: G,
    default_check_grammar: bool,
}

impl<T, S, G> VideoSummarizer<T, S, G>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    G: GrammarChecker + Send + Sync + 'static,
{
    pub fn default_check_grammar(&self) -> bool {
        self.default_check_grammar
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>> {
        self.transcript_source
            .fetch_transcript(video_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch transcript"))
            .map_err(|e| Error::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })
    }

    #[tracing::instrument(skip(self, script), fields(script_len = script.len()))]
    async fn summarize(&self, script: &str, bounds: LengthBounds) -> Result<String> {
        self.summarizer
            .summarize(script, bounds)
            .await
            .map(|resp| resp.summary)
            .map_err(|e| Error::UpstreamInference {
                stage: InferenceStage::Summarization,
                raw_response: S::raw_response(&e),
            })
    }

    /// Runs `text` through the grammar checker
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub async fn correct_grammar(&self, text: &str) -> Result<String> {
        self.grammar_checker
            .correct(text)
            .await
            .map(|resp| resp.text)
            .map_err(|e| Error::UpstreamInference {
                stage: InferenceStage::GrammarCorrection,
                raw_response: G::raw_response(&e),
            })
    }

    /// Summarizes the video behind `request.url`.
    ///
    /// The url is checked before any network call; a url without a trailing
    /// `=<id>` fails with [`Error::InvalidRequest`].
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, request: &SummarizeRequest) -> Result<String> {
        let video_id = extract_video_id(&request.url).ok_or_else(|| {
            Error::invalid_request(format!("No video id found in url '{}'", request.url))
        })?;

        let fragments = self.fetch_transcript(&video_id).await?;
        let (script, bounds) = plan_script(&fragments, request.mode);
        tracing::info!(
            %video_id,
            fragments = fragments.len(),
            min_length = bounds.min_length,
            max_length = bounds.max_length,
            "Planned summary"
        );

        let summary = self.summarize(&script, bounds).await?;

        if request.check_grammar.unwrap_or(self.default_check_grammar) {
            return self.correct_grammar(&summary).await;
        }

        Ok(summary)
    }
}
