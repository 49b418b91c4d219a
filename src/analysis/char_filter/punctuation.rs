//! Punctuation stripping char filter.
//!
//! ASCII punctuation and typographic quotes are deleted outright, so that
//! contractions and hyphenated compounds collapse into one word
//! (`"I'm"` becomes `"Im"`, `"mother-in-law"` becomes `"motherinlaw"`).
//! Characters from the Unicode punctuation and symbol blocks (dashes,
//! bullets, arrows, emoji) are replaced by a space so they still separate
//! words. Letters, combining marks and digits of any script pass through.
//!
//! # Examples
//!
//! ```
//! use complaint_router::analysis::char_filter::CharFilter;
//! use complaint_router::analysis::char_filter::punctuation::PunctuationCharFilter;
//!
//! let filter = PunctuationCharFilter::new();
//! assert_eq!(filter.filter("boss's \"jokes\"!"), "bosss jokes");
//! assert_eq!(filter.filter("late\u{2014}night"), "late night");
//! ```

use crate::analysis::char_filter::CharFilter;

/// Quote marks that behave like an ASCII apostrophe or double quote.
const TYPOGRAPHIC_QUOTES: &[char] = &['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{00B4}'];

/// A char filter that removes punctuation.
#[derive(Clone, Debug, Default)]
pub struct PunctuationCharFilter;

impl PunctuationCharFilter {
    /// Create a new punctuation filter.
    pub fn new() -> Self {
        PunctuationCharFilter
    }

    fn is_deleted(c: char) -> bool {
        c.is_ascii_punctuation() || TYPOGRAPHIC_QUOTES.contains(&c)
    }

    fn is_separator_symbol(c: char) -> bool {
        matches!(c,
            '\u{00A1}'..='\u{00A9}' |   // Latin-1 punctuation and signs
            '\u{00AB}'..='\u{00B1}' |
            '\u{00B6}'..='\u{00B8}' |
            '\u{00BB}' | '\u{00BF}' | '\u{00D7}' | '\u{00F7}' |
            '\u{2000}'..='\u{206F}' |   // General Punctuation
            '\u{2190}'..='\u{2BFF}' |   // Arrows through Miscellaneous Symbols
            '\u{2E00}'..='\u{2E7F}' |   // Supplemental Punctuation
            '\u{3000}'..='\u{303F}' |   // CJK Symbols and Punctuation
            '\u{FE30}'..='\u{FE4F}' |   // CJK Compatibility Forms
            '\u{1F000}'..='\u{1FAFF}'   // Emoji and pictographs
        )
    }
}

impl CharFilter for PunctuationCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        for c in input.chars() {
            if Self::is_deleted(c) {
                continue;
            }
            if Self::is_separator_symbol(c) {
                output.push(' ');
            } else {
                output.push(c);
            }
        }
        output
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_punctuation_is_deleted() {
        let filter = PunctuationCharFilter::new();
        assert_eq!(filter.filter("Im a woman."), "Im a woman");
        assert_eq!(filter.filter("I'm"), "Im");
        assert_eq!(
            filter.filter("mother-in-law threatens me!"),
            "motherinlaw threatens me"
        );
        assert_eq!(filter.filter("\"accidentally\""), "accidentally");
    }

    #[test]
    fn test_typographic_quotes_are_deleted() {
        let filter = PunctuationCharFilter::new();
        assert_eq!(filter.filter("don\u{2019}t"), "dont");
        assert_eq!(filter.filter("\u{201C}safety\u{201D}"), "safety");
    }

    #[test]
    fn test_other_symbols_become_spaces() {
        let filter = PunctuationCharFilter::new();
        assert_eq!(filter.filter("bus\u{2014}stop"), "bus stop");
        assert_eq!(filter.filter("help\u{1F622}now"), "help now");
        assert_eq!(filter.filter("\u{00BF}que?"), " que");
    }

    #[test]
    fn test_letters_and_marks_survive() {
        let filter = PunctuationCharFilter::new();
        assert_eq!(filter.filter("перевод, работа"), "перевод работа");
        assert_eq!(filter.filter("cafe\u{0301}"), "cafe\u{0301}");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(PunctuationCharFilter::new().name(), "punctuation");
    }
}
