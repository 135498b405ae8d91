use crate::{yt::TranscriptSource, GrammarChecker, Summarizer, VideoSummarizer};

pub struct VideoSummarizerBuilder<T = (), S = (), G = ()> {
    transcript_source: T,
    summarizer: S,
    grammar_checker: G,
    default_check_grammar: bool,
}

impl VideoSummarizerBuilder {
    pub fn new() -> Self {
        Self {
            transcript_source: (),
            summarizer: (),
            grammar_checker: (),
            default_check_grammar: false,
        }
    }
}

impl Default for VideoSummarizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, G> VideoSummarizerBuilder<T, S, G> {
    pub fn transcript_source<T2: TranscriptSource + Send + Sync + 'static>(
        self,
        transcript_source: T2,
    ) -> VideoSummarizerBuilder<T2, S, G> {
        VideoSummarizerBuilder {
            transcript_source,
            summarizer: self.summarizer,
            grammar_checker: self.grammar_checker,
            default_check_grammar: self.default_check_grammar,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> VideoSummarizerBuilder<T, S2, G> {
        VideoSummarizerBuilder {
            transcript_source: self.transcript_source,
            summarizer,
            grammar_checker: self.grammar_checker,
            default_check_grammar: self.default_check_grammar,
        }
    }

    pub fn grammar_checker<G2: GrammarChecker + Send + Sync + 'static>(
        self,
        grammar_checker: G2,
    ) -> VideoSummarizerBuilder<T, S, G2> {
        VideoSummarizerBuilder {
            transcript_source: self.transcript_source,
            summarizer: self.summarizer,
            grammar_checker,
            default_check_grammar: self.default_check_grammar,
        }
    }

    /// Whether grammar correction runs when a request leaves `check_grammar` out
    pub fn default_check_grammar(mut self, check_grammar: bool) -> Self {
        self.default_check_grammar = check_grammar;
        self
    }
}

impl<T, S, G> VideoSummarizerBuilder<T, S, G>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    G: GrammarChecker + Send + Sync + 'static,
{
    pub fn build(self) -> VideoSummarizer<T, S, G> {
        VideoSummarizer {
            transcript_source: self.transcript_source,
            summarizer: self.summarizer,
            grammar_checker: self.grammar_checker,
            default_check_grammar: self.default_check_grammar,
        }
    }
}
