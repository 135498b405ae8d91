pub mod api;
pub mod config;
mod error;
mod llm;
pub mod parser;
mod pipeline;
pub mod tracing;
pub mod types;
pub mod yt;

pub use error::{Error, InferenceStage, Result, TranscriptError};
pub use llm::huggingface;
pub use llm::{
    grammar::{CorrectionResponse, GrammarChecker},
    summarizer::{Summarizer, SummaryResponse},
};
pub use pipeline::{
    assemble_script, builder::VideoSummarizerBuilder, plan_script, SummarizeRequest,
    VideoSummarizer,
};
