//! Lexical side of the pipeline: reference tables, segmentation, the validity
//! heuristic and the two normalization passes.

pub mod normalize;
pub mod reference;
pub mod segmenter;
pub mod validity;

use unicode_normalization::UnicodeNormalization;

pub use normalize::{DisplayNormalizer, ModelPreprocessor};
pub use reference::{NormalizationDictionary, ReferenceData, ReferenceError, PUNCTUATION};
pub use segmenter::{RuleSegmenter, Segmenter, Token};
pub use validity::{ValidityChecker, MIN_TEXT_CHARS};

/// Trimmed, NFC-composed copy of `text`, so decomposed diacritics match the tables.
pub(crate) fn compose(text: &str) -> String {
    text.trim().nfc().collect()
}
