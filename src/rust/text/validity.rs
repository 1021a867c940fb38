use super::compose;
use super::reference::ReferenceData;
use super::segmenter::Segmenter;

/// Inputs whose trimmed length is at or below this many characters are rejected.
pub const MIN_TEXT_CHARS: usize = 5;
pub const MIN_ALPHABETIC_TOKENS: usize = 2;
pub const MIN_VOWEL_RATIO: f64 = 0.25;
pub const MAX_AVERAGE_TOKEN_CHARS: f64 = 10.0;

/// Heuristic filter deciding whether raw input looks like Vietnamese worth classifying.
///
/// This is not a language identifier. It rejects keyboard mashing, numbers and very
/// short input, and accepts anything carrying a common function word.
pub struct ValidityChecker<'a> {
    reference: &'a ReferenceData,
    segmenter: &'a dyn Segmenter,
}

impl<'a> ValidityChecker<'a> {
    pub fn new(reference: &'a ReferenceData, segmenter: &'a dyn Segmenter) -> Self {
        Self { reference, segmenter }
    }

    pub fn is_valid(&self, text: &str) -> bool {
        let text = compose(text);
        if text.chars().count() <= MIN_TEXT_CHARS {
            return false;
        }

        let words: Vec<String> = self
            .segmenter
            .segment(&text)
            .into_iter()
            .filter(|token| token.is_alphabetic())
            .map(|token| token.as_str().to_string())
            .collect();
        if words.len() < MIN_ALPHABETIC_TOKENS {
            return false;
        }

        let letters: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();
        if letters.is_empty() {
            return false;
        }

        let vowels = letters.iter().filter(|&&ch| self.reference.is_vowel(ch)).count();
        let vowel_ratio = vowels as f64 / letters.len() as f64;
        if vowel_ratio < MIN_VOWEL_RATIO {
            return false;
        }

        if words
            .iter()
            .any(|w| self.reference.is_stopword(&w.to_lowercase()))
        {
            return true;
        }

        let average = letters.len() as f64 / words.len() as f64;
        average <= MAX_AVERAGE_TOKEN_CHARS
    }
}
