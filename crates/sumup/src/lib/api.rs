//! HTTP surface of the summarization pipeline.

pub mod payload;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::Error, yt::TranscriptSource, GrammarChecker, Summarizer, VideoSummarizer,
};
use payload::{CheckGrammarIn, CheckGrammarOut, ErrorOut, Health, ProcessVideoIn, ProcessVideoOut};

const SERVICE_NAME: &str = "sumup-api";

type Shared<T, S, G> = State<Arc<VideoSummarizer<T, S, G>>>;

pub fn router<T, S, G>(pipeline: VideoSummarizer<T, S, G>) -> Router
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    G: GrammarChecker + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(healthz))
        .route("/process_video", post(process_video::<T, S, G>))
        .route("/check_grammar", post(check_grammar::<T, S, G>))
        .with_state(Arc::new(pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn healthz() -> Json<Health> {
    Json(Health {
        ok: true,
        service: SERVICE_NAME,
    })
}

async fn process_video<T, S, G>(
    State(pipeline): Shared<T, S, G>,
    payload: Result<Json<ProcessVideoIn>, JsonRejection>,
) -> Result<Json<ProcessVideoOut>, Error>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    G: GrammarChecker + Send + Sync + 'static,
{
    let Json(payload) = payload.map_err(|e| Error::invalid_request(e.body_text()))?;
    let request = payload.validate()?;

    let summary = pipeline.run(&request).await?;

    Ok(Json(ProcessVideoOut { summary }))
}

async fn check_grammar<T, S, G>(
    State(pipeline): Shared<T, S, G>,
    payload: Result<Json<CheckGrammarIn>, JsonRejection>,
) -> Result<Json<CheckGrammarOut>, Error>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    G: GrammarChecker + Send + Sync + 'static,
{
    let Json(payload) = payload.map_err(|e| Error::invalid_request(e.body_text()))?;
    let script = payload
        .script
        .ok_or_else(|| Error::invalid_request("'script' is required"))?;

    let grammar_corrected_text = pipeline.correct_grammar(&script).await?;

    Ok(Json(CheckGrammarOut {
        grammar_corrected_text,
    }))
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::TranscriptUnavailable { .. } => StatusCode::NOT_FOUND,
            Error::UpstreamInference { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        } else {
            tracing::warn!(error = %self, kind = self.kind(), "Request rejected");
        }

        let body = ErrorOut {
            kind: self.kind().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
