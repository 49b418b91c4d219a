//! Length filter implementation.

use super::Filter;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Default minimum number of characters a token needs to survive.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// A filter that drops tokens shorter than a minimum character length.
///
/// Length is measured in characters, not bytes, so non-Latin words are not
/// penalized for their UTF-8 width.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min_length: usize,
}

impl LengthFilter {
    /// Create a new length filter with the given minimum length.
    pub fn new(min_length: usize) -> Self {
        LengthFilter { min_length }
    }

    /// Get the minimum length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LENGTH)
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens
            .filter(|token| token.is_stopped() || token.char_len() >= self.min_length)
            .collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_filter_default_drops_two_letter_tokens() {
        let filter = LengthFilter::default();
        let tokens = vec![
            Token::new("im", 0),
            Token::new("man", 1),
            Token::new("40", 2),
            Token::new("hr", 3),
            Token::new("ngo", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        let texts: Vec<_> = result.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["man", "ngo"]);
    }

    #[test]
    fn test_length_counts_characters() {
        let filter = LengthFilter::new(3);
        let tokens = vec![Token::new("ép", 0), Token::new("été", 1)];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].text, "été");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LengthFilter::default().name(), "length");
        assert_eq!(LengthFilter::new(5).min_length(), 5);
    }
}
