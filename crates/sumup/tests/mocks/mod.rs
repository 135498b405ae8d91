#![allow(dead_code)]

pub mod grammar_checker;
pub mod summarizer;
pub mod transcript_source;
