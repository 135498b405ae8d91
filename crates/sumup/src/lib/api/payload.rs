use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Error, pipeline::SummarizeRequest, types::LengthMode};

#[derive(Debug, Deserialize)]
pub struct ProcessVideoIn {
    pub url: Option<String>,
    pub option: Option<i64>,
    pub word_length: Option<Value>,
    pub check_grammar: Option<bool>,
}

impl ProcessVideoIn {
    pub fn validate(self) -> Result<SummarizeRequest, Error> {
        let url = self
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::invalid_request("'url' is required"))?;
        let option = self
            .option
            .ok_or_else(|| Error::invalid_request("'option' is required"))?;
        let mode = LengthMode::from_option(option, self.word_length.as_ref())?;

        if let LengthMode::Unbounded(option) = mode {
            tracing::warn!(option, "Unknown length option, summary bounds will be zero");
        }

        Ok(SummarizeRequest {
            url,
            mode,
            check_grammar: self.check_grammar,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessVideoOut {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckGrammarIn {
    pub script: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckGrammarOut {
    pub grammar_corrected_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub service: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<SummarizeRequest, Error> {
        serde_json::from_value::<ProcessVideoIn>(body)
            .expect("payload should deserialize")
            .validate()
    }

    #[test]
    fn test_full_request() {
        let request = parse(json!({
            "url": "https://www.youtube.com/watch?v=abc123",
            "option": 4,
            "word_length": "120",
            "check_grammar": true
        }))
        .unwrap();

        assert_eq!(
            request,
            SummarizeRequest {
                url: "https://www.youtube.com/watch?v=abc123".into(),
                mode: LengthMode::Fixed(120),
                check_grammar: Some(true),
            }
        );
    }

    #[test]
    fn test_optional_fields_may_be_absent_or_null() {
        let request = parse(json!({
            "url": "https://www.youtube.com/watch?v=abc123",
            "option": 1,
            "word_length": null
        }))
        .unwrap();

        assert_eq!(request.mode, LengthMode::Short);
        assert_eq!(request.check_grammar, None);
    }

    #[test]
    fn test_missing_required_fields() {
        for body in [
            json!({"option": 1}),
            json!({"url": "   ", "option": 1}),
            json!({"url": "https://www.youtube.com/watch?v=abc123"}),
            json!({"url": "https://www.youtube.com/watch?v=abc123", "option": 4}),
        ] {
            assert!(
                matches!(parse(body.clone()), Err(Error::InvalidRequest(_))),
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn test_wrong_types_fail_to_deserialize() {
        for body in [
            json!({"url": 12, "option": 1}),
            json!({"url": "x=1", "option": "1"}),
            json!({"url": "x=1", "option": 1, "check_grammar": "yes"}),
        ] {
            assert!(serde_json::from_value::<ProcessVideoIn>(body).is_err());
        }
    }
}
