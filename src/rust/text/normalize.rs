use super::compose;
use super::reference::ReferenceData;
use super::segmenter::Segmenter;

/// Rewrites informal input into a readable, diacritized sentence for display.
///
/// `"Ban khoe ko?"` becomes `"Bạn khỏe không?"`. Repeated application is not
/// guaranteed to be stable.
pub struct DisplayNormalizer<'a> {
    reference: &'a ReferenceData,
    segmenter: &'a dyn Segmenter,
}

impl<'a> DisplayNormalizer<'a> {
    pub fn new(reference: &'a ReferenceData, segmenter: &'a dyn Segmenter) -> Self {
        Self { reference, segmenter }
    }

    pub fn normalize(&self, text: &str) -> String {
        let text = compose(text).to_lowercase();
        let dictionary = self.reference.dictionary();

        let mut sentence = String::with_capacity(text.len() + 8);
        for token in self.segmenter.segment(&text) {
            let word = if token.is_alphabetic() {
                dictionary.get(token.as_str()).unwrap_or(token.as_str())
            } else {
                token.as_str()
            };

            if self.reference.is_punctuation(word) {
                sentence.truncate(sentence.trim_end().len());
            }
            sentence.push_str(word);
            sentence.push(' ');
        }

        capitalize_first(sentence.trim())
    }
}

/// Produces the token string fed to the sentiment model.
///
/// Dictionary keys are replaced only where they appear between two spaces, so a key
/// at the very start or end of the input is left untouched. Substitutions run in
/// dictionary order over the whole string, so the output of one entry can be
/// rewritten again by a later entry.
pub struct ModelPreprocessor<'a> {
    reference: &'a ReferenceData,
    segmenter: &'a dyn Segmenter,
}

impl<'a> ModelPreprocessor<'a> {
    pub fn new(reference: &'a ReferenceData, segmenter: &'a dyn Segmenter) -> Self {
        Self { reference, segmenter }
    }

    pub fn preprocess(&self, text: &str) -> String {
        let mut text = compose(text).to_lowercase();
        for (abbreviation, canonical) in self.reference.dictionary().iter() {
            let pattern = format!(" {} ", abbreviation);
            if text.contains(&pattern) {
                text = text.replace(&pattern, &format!(" {} ", canonical));
            }
        }
        self.segmenter.segment_as_text(&text)
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{NormalizationDictionary, RuleSegmenter};

    #[test]
    fn test_display_example() {
        let reference = ReferenceData::builtin();
        let segmenter = RuleSegmenter::new();
        let normalizer = DisplayNormalizer::new(&reference, &segmenter);
        assert_eq!(normalizer.normalize("Ban khoe ko?"), "Bạn khỏe không?");
    }

    #[test]
    fn test_display_punctuation_spacing() {
        let reference = ReferenceData::builtin();
        let segmenter = RuleSegmenter::new();
        let normalizer = DisplayNormalizer::new(&reference, &segmenter);
        assert_eq!(
            normalizer.normalize("  toi  thay vui , nhung met ...  "),
            "Tôi thấy vui, nhưng mệt..."
        );
        assert_eq!(normalizer.normalize("vui - buon"), "Vui - buồn");
        assert_eq!(normalizer.normalize("   "), "");
    }

    #[test]
    fn test_preprocess_skips_edges() {
        let reference = ReferenceData::builtin();
        let segmenter = RuleSegmenter::new();
        let preprocessor = ModelPreprocessor::new(&reference, &segmenter);
        assert_eq!(preprocessor.preprocess("ban rat vui ko"), "ban rất vui ko");
    }

    #[test]
    fn test_preprocess_chains_substitutions() {
        let dictionary: NormalizationDictionary =
            vec![("a", "b"), ("b", "c")].into_iter().collect();
        let reference = ReferenceData::new("aeiou".chars(), Vec::<String>::new(), dictionary);
        let segmenter = RuleSegmenter::with_lexicon(Vec::<String>::new());
        let preprocessor = ModelPreprocessor::new(&reference, &segmenter);
        assert_eq!(preprocessor.preprocess("x a y"), "x c y");
    }

    #[test]
    fn test_preprocess_multi_word_keys() {
        let reference = ReferenceData::builtin();
        let segmenter = RuleSegmenter::new();
        let preprocessor = ModelPreprocessor::new(&reference, &segmenter);
        assert_eq!(
            preprocessor.preprocess("toi yeu gia dinh lam"),
            "toi yêu gia đình lam"
        );
    }
}
