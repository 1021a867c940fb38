use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const MAX_COMPOUND_SYLLABLES: usize = 4;

const COMPOUNDS: &[&str] = &[
    "bạn bè",
    "gia đình",
    "công việc",
    "chấp nhận",
    "hôm nay",
    "ngày mai",
    "tuyệt vời",
    "cảm ơn",
    "cảm xúc",
    "hạnh phúc",
    "sinh viên",
    "học sinh",
    "thành phố",
    "điện thoại",
    "món ăn",
    "quán ăn",
    "nhà hàng",
    "thất vọng",
    "tức giận",
    "dễ thương",
];

/// A single segmented unit of text: a word, a multi-syllable compound or a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    alphabetic: bool,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let alphabetic = !text.is_empty() && text.chars().all(char::is_alphabetic);
        Self { text, alphabetic }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when every character is a letter. Compounds contain a space and are not.
    pub fn is_alphabetic(&self) -> bool {
        self.alphabetic
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Splits text into ordered tokens.
///
/// Implementations must keep punctuation as separate tokens and are shared across
/// threads by the classifier.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Token>;

    fn segment_as_text(&self, text: &str) -> String {
        self.segment(text)
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Rule-based Vietnamese segmenter.
///
/// Input is composed to NFC first. Alphanumeric runs become syllables, any other
/// visible character is a token on its own, and adjacent syllables found in the
/// compound lexicon are merged greedily.
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    compounds: HashSet<String>,
}

impl RuleSegmenter {
    pub fn new() -> Self {
        Self::with_lexicon(COMPOUNDS.iter().copied())
    }

    pub fn with_lexicon<S: AsRef<str>>(compounds: impl IntoIterator<Item = S>) -> Self {
        let compounds = compounds
            .into_iter()
            .map(|c| {
                c.as_ref()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_lowercase()
            })
            .filter(|c| c.contains(' '))
            .collect();
        Self { compounds }
    }

    fn split_syllables(text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        for ch in text.nfc() {
            if Self::is_word_char(ch) {
                current.push(ch);
                continue;
            }
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            if !ch.is_whitespace() {
                pieces.push(ch.to_string());
            }
        }
        if !current.is_empty() {
            pieces.push(current);
        }
        pieces
    }

    // Marks with no precomposed form stay attached to their base letter
    fn is_word_char(ch: char) -> bool {
        ch.is_alphanumeric() || is_combining_mark(ch)
    }

    fn is_syllable(piece: &str) -> bool {
        piece.chars().all(Self::is_word_char)
    }

    fn merge_compounds(&self, pieces: Vec<String>) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(pieces.len());
        let mut i = 0;
        while i < pieces.len() {
            let mut span = 1;
            if !self.compounds.is_empty() && Self::is_syllable(&pieces[i]) {
                let run = pieces[i..]
                    .iter()
                    .take(MAX_COMPOUND_SYLLABLES)
                    .take_while(|p| Self::is_syllable(p))
                    .count();
                for len in (2..=run).rev() {
                    let candidate = pieces[i..i + len].join(" ");
                    if self.compounds.contains(&candidate.to_lowercase()) {
                        span = len;
                        break;
                    }
                }
            }
            tokens.push(Token::new(pieces[i..i + span].join(" ")));
            i += span;
        }
        tokens
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        self.merge_compounds(Self::split_syllables(text))
    }
}
