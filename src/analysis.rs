//! Text analysis for complaint narratives.
//!
//! This module turns raw complaint text into the normalized term sequences
//! the vectorizer consumes: char filtering, tokenization, token filtering
//! and the [`normalizer::TextNormalizer`] that ties them together.

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
