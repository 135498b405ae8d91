use std::sync::{Arc, Mutex};
use sumup::{CorrectionResponse, GrammarChecker};

#[derive(Clone)]
pub struct MockGrammarChecker {
    pub corrected: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockGrammarChecker {
    pub fn new(corrected: &str) -> Self {
        Self {
            corrected: corrected.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            corrected: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl GrammarChecker for MockGrammarChecker {
    const GRAMMAR_MODEL: &'static str = "mock-flan-t5";
    type Error = anyhow::Error;

    async fn correct(&self, content: &str) -> Result<CorrectionResponse, Self::Error> {
        self.calls.lock().unwrap().push(content.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(CorrectionResponse {
            text: self.corrected.clone(),
        })
    }
}
