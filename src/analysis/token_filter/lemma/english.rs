//! Rule-based English lemmatizer.
//!
//! Words are first looked up in a table of irregular forms and a set of
//! words that merely look inflected ("news", "wedding", "hundred"). Anything
//! else goes through plural detachment and `-ed`/`-ing` detachment, with
//! the usual repairs for doubled consonants and a dropped final `e`. The
//! rules are repeated until the word stops changing, which makes the output
//! a fixed point.
//!
//! Only words made entirely of ASCII lowercase letters are touched.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::Lemmatizer;

static IRREGULAR_FORMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("people", "person"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("lives", "life"),
        ("thieves", "thief"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("selves", "self"),
        ("shelves", "shelf"),
        ("wolves", "wolf"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("does", "do"),
        ("goes", "go"),
        ("buses", "bus"),
        ("heroes", "hero"),
        ("movies", "movie"),
        ("cookies", "cookie"),
        ("selfies", "selfie"),
        ("brides", "bride"),
        ("indices", "index"),
        ("crises", "crisis"),
        ("analyses", "analysis"),
    ]
    .into_iter()
    .collect()
});

static UNINFLECTED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // -s
        "news", "always", "perhaps", "series", "species", "physics", "politics", "economics",
        "ethics", "mathematics", "whereas", "bias", "alias", "atlas", "canvas", "christmas",
        "clothes", "scissors", "thanks",
        // -ing
        "thing", "nothing", "something", "anything", "everything", "morning", "evening",
        "ceiling", "clothing", "feeling", "housing", "wedding", "meeting", "building", "sibling",
        "darling", "offspring", "spring", "string", "during", "pudding", "earring", "lightning",
        "shilling", "sterling",
        // -ed
        "hundred", "naked", "sacred", "wicked", "kindred", "hatred", "shed", "sled", "bred",
        "fled", "rugged", "ragged", "beloved",
    ]
    .into_iter()
    .collect()
});

/// Rule-based lemmatizer for English words.
///
/// # Examples
///
/// ```
/// use complaint_router::analysis::token_filter::lemma::{EnglishLemmatizer, Lemmatizer};
///
/// let lemmatizer = EnglishLemmatizer::new();
/// assert_eq!(lemmatizer.lemmatize("touching"), "touch");
/// assert_eq!(lemmatizer.lemmatize("women"), "woman");
/// assert_eq!(lemmatizer.lemmatize("harassed"), "harass");
/// ```
#[derive(Clone, Debug, Default)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    /// Create a new English lemmatizer.
    pub fn new() -> Self {
        EnglishLemmatizer
    }

    fn is_lemmatizable(word: &str) -> bool {
        !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
    }

    /// Apply the first matching rule, or `None` if the word is settled.
    fn step(word: &str) -> Option<String> {
        if let Some(&lemma) = IRREGULAR_FORMS.get(word) {
            return Some(lemma.to_string());
        }
        if UNINFLECTED_WORDS.contains(word) || word.len() <= 3 {
            return None;
        }

        Self::strip_plural(word)
            .or_else(|| Self::strip_past(word))
            .or_else(|| Self::strip_progressive(word))
    }

    fn strip_plural(word: &str) -> Option<String> {
        let b = word.as_bytes();
        let n = b.len();

        if word.ends_with("sss") {
            let stem = word.trim_end_matches('s');
            return Some(format!("{stem}ss"));
        }
        if word.ends_with("ies") {
            return Some(if n > 4 {
                format!("{}y", &word[..n - 3])
            } else {
                word[..n - 1].to_string()
            });
        }
        if word.ends_with("sses") || word.ends_with("shes") || word.ends_with("xes") {
            return Some(word[..n - 2].to_string());
        }
        if word.ends_with("zzes") {
            return Some(word[..n - 2].to_string());
        }
        if word.ends_with("aches") {
            // "beaches" -> "beach", but "headaches" -> "headache".
            let vowel_before = n > 5 && is_vowel_letter(b[n - 6]);
            let cut = if vowel_before { 2 } else { 1 };
            return Some(word[..n - cut].to_string());
        }
        if word.ends_with("ches") {
            return Some(word[..n - 2].to_string());
        }
        if word.ends_with('s') && !matches!(b[n - 2], b's' | b'u' | b'i') {
            return Some(word[..n - 1].to_string());
        }
        None
    }

    fn strip_past(word: &str) -> Option<String> {
        let n = word.len();
        if !word.ends_with("ed") || word.ends_with("eed") {
            return None;
        }
        if word.ends_with("ied") {
            return Some(if n > 4 {
                format!("{}y", &word[..n - 3])
            } else {
                word[..n - 1].to_string()
            });
        }
        Self::detach(word, 2)
    }

    fn strip_progressive(word: &str) -> Option<String> {
        if !word.ends_with("ing") {
            return None;
        }
        Self::detach(word, 3)
    }

    /// Remove an inflectional suffix of `suffix_len` bytes and repair the stem.
    fn detach(word: &str, suffix_len: usize) -> Option<String> {
        let stem = &word[..word.len() - suffix_len];
        let s = stem.as_bytes();

        if s.len() == 2 && is_vowel_letter(s[0]) {
            // "used" -> "use", "aging" -> "age"
            return Some(format!("{stem}e"));
        }
        if s.len() < 3 || !has_vowel(s) {
            return None;
        }

        let n = s.len();
        let last = s[n - 1];

        if n >= 4
            && last == s[n - 2]
            && is_consonant(s, n - 1)
            && !matches!(last, b'l' | b's' | b'z')
        {
            return Some(stem[..n - 1].to_string());
        }
        if Self::needs_final_e(s) {
            return Some(format!("{stem}e"));
        }
        Some(stem.to_string())
    }

    fn needs_final_e(s: &[u8]) -> bool {
        let n = s.len();
        let last = s[n - 1];
        let prev = s[n - 2];

        match last {
            b's' => prev != b's',
            b'c' | b'v' | b'u' => true,
            b'z' => prev != b'z',
            b'l' => is_consonant(s, n - 2) && prev != b'l',
            b'r' if n > 4 && prev == b'u' && is_consonant(s, n - 3) => true,
            b't' if prev == b'a' && n > 3 && !matches!(s[n - 3], b'a' | b'e' | b'o') => {
                measure(s) >= 2
            }
            _ => measure(s) == 1 && ends_cvc(s),
        }
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if !Self::is_lemmatizable(word) {
            return word.to_string();
        }

        // Every rule either shortens the word or lands on a table entry that
        // no rule touches again, so this terminates.
        let mut current = word.to_string();
        while let Some(next) = Self::step(&current) {
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

fn is_vowel_letter(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// `y` counts as a vowel when it follows a consonant.
fn is_consonant(s: &[u8], i: usize) -> bool {
    match s[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(s, i - 1),
        _ => true,
    }
}

fn has_vowel(s: &[u8]) -> bool {
    (0..s.len()).any(|i| !is_consonant(s, i))
}

/// Number of vowel-consonant transitions in the stem.
fn measure(s: &[u8]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..s.len() {
        let consonant = is_consonant(s, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn ends_cvc(s: &[u8]) -> bool {
    let n = s.len();
    n >= 3
        && is_consonant(s, n - 3)
        && !is_consonant(s, n - 2)
        && is_consonant(s, n - 1)
        && !matches!(s[n - 1], b'w' | b'x' | b'y')
}
