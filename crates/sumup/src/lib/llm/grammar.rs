use std::{
    fmt::{Debug, Display},
    future::Future,
};

use serde::Deserialize;

pub trait GrammarChecker {
    const GRAMMAR_MODEL: &'static str;

    type Error: Debug + Display;

    fn correct(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<CorrectionResponse, Self::Error>> + Send;

    fn raw_response(error: &Self::Error) -> String {
        error.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorrectionResponse {
    pub text: String,
}
