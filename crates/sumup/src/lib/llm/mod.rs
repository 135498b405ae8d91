pub mod grammar;
pub mod huggingface;
pub mod summarizer;
