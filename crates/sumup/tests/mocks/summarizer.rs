use std::sync::{Arc, Mutex};
use sumup::{types::LengthBounds, Summarizer, SummaryResponse};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<(String, LengthBounds)>>>,
    pub fail_with: Option<String>,
    /// How many calls fail before the summarizer recovers; `None` fails forever
    pub remaining_failures: Arc<Mutex<Option<usize>>>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            remaining_failures: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }

    pub fn failing_times(msg: &str, times: usize, summary: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            remaining_failures: Arc::new(Mutex::new(Some(times))),
            ..Self::new(summary)
        }
    }

    fn should_fail(&self) -> bool {
        if self.fail_with.is_none() {
            return false;
        }
        let mut remaining = self.remaining_failures.lock().unwrap();
        match remaining.as_mut() {
            None => true,
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-bart";
    type Error = anyhow::Error;

    async fn summarize(
        &self,
        content: &str,
        bounds: LengthBounds,
    ) -> Result<SummaryResponse, Self::Error> {
        self.calls.lock().unwrap().push((content.to_string(), bounds));
        if self.should_fail() {
            let msg = self.fail_with.as_deref().unwrap_or_default();
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(SummaryResponse {
            summary: self.summary.clone(),
        })
    }
}
