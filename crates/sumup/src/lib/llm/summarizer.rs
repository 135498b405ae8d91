use std::{
    fmt::{Debug, Display},
    future::Future,
};

use serde::Deserialize;

use crate::types::LengthBounds;

pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug + Display;

    fn summarize(
        &self,
        content: &str,
        bounds: LengthBounds,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;

    /// What the service actually answered, reported back to api callers
    fn raw_response(error: &Self::Error) -> String {
        error.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
