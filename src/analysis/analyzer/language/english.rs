use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::punctuation::PunctuationCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::length::{DEFAULT_MIN_TOKEN_LENGTH, LengthFilter};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// English analyzer for complaint narratives.
///
/// Punctuation is stripped, the text is split on Unicode word boundaries,
/// lowercased, cleared of stop words and short tokens, and lemmatized. The
/// stop and length filters run again after lemmatization so a lemma never
/// reintroduces a token the first pass would have dropped.
pub struct EnglishAnalyzer {
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    pub fn new(min_token_length: usize) -> Self {
        let stop = Arc::new(StopFilter::new());
        let length = Arc::new(LengthFilter::new(min_token_length));

        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_char_filter(Arc::new(PunctuationCharFilter::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(stop.clone())
            .add_filter(length.clone())
            .add_filter(Arc::new(LemmaFilter::new()))
            .add_filter(stop)
            .add_filter(length)
            .with_name("english");

        Self { inner: analyzer }
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LENGTH)
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
