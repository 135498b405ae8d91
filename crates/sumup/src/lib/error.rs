use std::fmt;

/// The inference call that produced an upstream failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceStage {
    Summarization,
    GrammarCorrection,
}

impl fmt::Display for InferenceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceStage::Summarization => write!(f, "summarization"),
            InferenceStage::GrammarCorrection => write!(f, "grammar correction"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transcript unavailable for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Upstream {stage} failed: {raw_response}")]
    UpstreamInference {
        stage: InferenceStage,
        raw_response: String,
    },
}

impl Error {
    /// Machine readable error kind reported to API callers
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidRequest(_) => "invalid_request",
            Error::TranscriptUnavailable { .. } => "transcript_unavailable",
            Error::UpstreamInference {
                stage: InferenceStage::Summarization,
                ..
            } => "summarization_failed",
            Error::UpstreamInference {
                stage: InferenceStage::GrammarCorrection,
                ..
            } => "grammar_service_failed",
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("Video is not playable ({status}): {reason}")]
    Unplayable { status: String, reason: String },
    #[error("No captions available for this video")]
    NoCaptions,
    #[error("YouTube served a cookie consent page that could not be accepted")]
    ConsentRequired,
}
