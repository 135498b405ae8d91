use std::{fmt, time::Duration};

use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::{json, Value};

use crate::{
    types::LengthBounds, CorrectionResponse, GrammarChecker, Summarizer, SummaryResponse,
};

/// Client for the Hugging Face hosted inference api
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for HuggingFaceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("HTTP error: {0}")]
    Response(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response, expected '{field}': {raw}")]
    UnexpectedShape { field: &'static str, raw: String },
}

impl InferenceError {
    /// The upstream response body when there was one, else the transport error
    pub fn raw(&self) -> String {
        match self {
            InferenceError::Api { message, .. } => message.clone(),
            InferenceError::UnexpectedShape { raw, .. } => raw.clone(),
            InferenceError::Request(e) => e.to_string(),
            InferenceError::Response(e) => e.to_string(),
        }
    }
}

impl HuggingFaceClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api-inference.huggingface.co";

    /// Builds a client whose requests time out after `timeout` and are retried
    /// up to `max_retries` times on transient failures (429, 5xx, timeouts).
    pub fn new(
        api_key: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn summarization_payload(content: &str, bounds: LengthBounds) -> Value {
        json!({
            "inputs": content,
            "parameters": {
                "min_length": bounds.min_length,
                "max_length": bounds.max_length
            }
        })
    }

    pub fn correction_payload(content: &str) -> Value {
        json!({ "inputs": content })
    }

    /// Posts `body` to the model endpoint and returns the parsed json output
    pub async fn send_inference_request(
        &self,
        model_name: &str,
        body: &Value,
    ) -> Result<Value, InferenceError> {
        let resp = self
            .client
            .post(format!("{}/models/{}", self.base_url, model_name))
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let status = resp.status();
        let raw = resp.text().await?;

        if !status.is_success() {
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message: raw,
            });
        }

        serde_json::from_str(&raw).map_err(|_| InferenceError::UnexpectedShape {
            field: "json",
            raw,
        })
    }
}

/// Reads `output[0][field]`, the shape every text generation task returns
pub fn first_generated_text(
    output: &Value,
    field: &'static str,
) -> Result<String, InferenceError> {
    output
        .get(0)
        .and_then(|item| item.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| InferenceError::UnexpectedShape {
            field,
            raw: output.to_string(),
        })
}

impl Summarizer for HuggingFaceClient {
    const SUMMARIZER_MODEL: &'static str = "facebook/bart-large-cnn";

    type Error = InferenceError;

    async fn summarize(
        &self,
        content: &str,
        bounds: LengthBounds,
    ) -> Result<SummaryResponse, Self::Error> {
        let output = self
            .send_inference_request(
                Self::SUMMARIZER_MODEL,
                &Self::summarization_payload(content, bounds),
            )
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

        let summary = first_generated_text(&output, "summary_text")
            .inspect_err(|e| tracing::error!(error = %e, "Unexpected summarization output"))?;

        Ok(SummaryResponse { summary })
    }

    fn raw_response(error: &Self::Error) -> String {
        error.raw()
    }
}

impl GrammarChecker for HuggingFaceClient {
    const GRAMMAR_MODEL: &'static str = "pszemraj/flan-t5-large-grammar-synthesis";

    type Error = InferenceError;

    async fn correct(&self, content: &str) -> Result<CorrectionResponse, Self::Error> {
        let output = self
            .send_inference_request(Self::GRAMMAR_MODEL, &Self::correction_payload(content))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to correct grammar"))?;

        let text = first_generated_text(&output, "generated_text")
            .inspect_err(|e| tracing::error!(error = %e, "Unexpected grammar output"))?;

        Ok(CorrectionResponse { text })
    }

    fn raw_response(error: &Self::Error) -> String {
        error.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarization_payload() {
        let bounds = LengthBounds {
            min_length: 0,
            max_length: 25,
        };
        assert_eq!(
            HuggingFaceClient::summarization_payload("hello world", bounds),
            json!({
                "inputs": "hello world",
                "parameters": {"min_length": 0, "max_length": 25}
            })
        );
    }

    #[test]
    fn test_correction_payload() {
        assert_eq!(
            HuggingFaceClient::correction_payload("i has a apple"),
            json!({"inputs": "i has a apple"})
        );
    }

    #[test]
    fn test_first_generated_text() {
        let output = json!([{"summary_text": "A short summary."}]);
        assert_eq!(
            first_generated_text(&output, "summary_text").unwrap(),
            "A short summary."
        );
    }

    #[test]
    fn test_first_generated_text_keeps_raw_output() {
        for output in [
            json!({"error": "loading", "estimated_time": 20.0}),
            json!([]),
            json!([{"generated_text": "wrong field"}]),
            json!([{"summary_text": 42}]),
        ] {
            match first_generated_text(&output, "summary_text") {
                Err(InferenceError::UnexpectedShape { field, raw }) => {
                    assert_eq!(field, "summary_text");
                    assert_eq!(raw, output.to_string());
                }
                other => panic!("Expected UnexpectedShape for {output}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_raw_is_the_upstream_body() {
        let api = InferenceError::Api {
            status: 503,
            message: r#"{"error":"loading"}"#.into(),
        };
        assert_eq!(api.raw(), r#"{"error":"loading"}"#);
        assert_eq!(
            <HuggingFaceClient as Summarizer>::raw_response(&api),
            r#"{"error":"loading"}"#
        );

        let shape = InferenceError::UnexpectedShape {
            field: "generated_text",
            raw: r#"{"error":"Model too busy"}"#.into(),
        };
        assert_eq!(
            <HuggingFaceClient as GrammarChecker>::raw_response(&shape),
            r#"{"error":"Model too busy"}"#
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = HuggingFaceClient::new("hf_secret", Duration::from_secs(1), 0)
            .unwrap()
            .with_base_url("http://localhost:8080/");
        let debug = format!("{client:?}");
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("http://localhost:8080\""));
    }
}
