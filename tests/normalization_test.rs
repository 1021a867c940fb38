use std::io::Write;

use unicode_normalization::UnicodeNormalization;
use vietsent::{
    DisplayNormalizer, ModelPreprocessor, ReferenceData, RuleSegmenter, Segmenter,
    ValidityChecker,
};

fn builtin() -> (ReferenceData, RuleSegmenter) {
    (ReferenceData::builtin(), RuleSegmenter::new())
}

#[test]
fn test_display_restores_diacritics() {
    let (reference, segmenter) = builtin();
    let display = DisplayNormalizer::new(&reference, &segmenter);

    assert_eq!(display.normalize("Ban khoe ko?"), "Bạn khỏe không?");
    assert_eq!(display.normalize("TOI YEU BAN!"), "Tôi yêu bạn!");
    assert_eq!(
        display.normalize("mon an o quan nay ngon , nhung hoi man"),
        "Món ăn ở quán nay ngon, nhưng hoi mặn"
    );
}

#[test]
fn test_display_leaves_non_words_alone() {
    let (reference, segmenter) = builtin();
    let display = DisplayNormalizer::new(&reference, &segmenter);
    assert_eq!(display.normalize("k0 sao dau 100%"), "K0 sao đau 100 %");
    assert_eq!(display.normalize("?"), "?");
}

#[test]
fn test_model_text_is_space_joined_tokens() {
    let (reference, segmenter) = builtin();
    let preprocessor = ModelPreprocessor::new(&reference, &segmenter);
    assert_eq!(
        preprocessor.preprocess("  Hom nay toi rat VUI!  "),
        "hom nay tôi rất vui !"
    );
}

#[test]
fn test_model_pass_only_replaces_inner_tokens() {
    let (reference, segmenter) = builtin();
    let preprocessor = ModelPreprocessor::new(&reference, &segmenter);
    // "ko" sits at both edges and in the middle
    assert_eq!(preprocessor.preprocess("ko ko ko"), "ko không ko");
}

#[test]
fn test_decomposed_and_composed_input_agree() {
    let (reference, segmenter) = builtin();
    let checker = ValidityChecker::new(&reference, &segmenter);
    let display = DisplayNormalizer::new(&reference, &segmenter);
    let preprocessor = ModelPreprocessor::new(&reference, &segmenter);

    let samples = [
        "Hôm nay tôi rất vui",
        "Phim này dở tệ, không nên xem.",
        "ban rat vui ko",
    ];
    for composed in samples {
        let decomposed: String = composed.nfd().collect();
        assert!(checker.is_valid(&decomposed), "{:?} should be accepted", decomposed);
        assert_eq!(display.normalize(&decomposed), display.normalize(composed));
        assert_eq!(preprocessor.preprocess(&decomposed), preprocessor.preprocess(composed));
    }
    let decomposed: String = "Hôm nay tôi rất vui".nfd().collect();
    assert_eq!(display.normalize(&decomposed), "Hôm nay tôi rất vui");
}

#[test]
fn test_custom_reference_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{
            "vowels": "aeiouy",
            "stopwords": ["the"],
            "normalization": [["u", "you"], ["r", "are"]]
        }}"#
    )?;
    let reference = ReferenceData::from_json_file(file.path())?;
    let segmenter = RuleSegmenter::with_lexicon(Vec::<String>::new());

    let display = DisplayNormalizer::new(&reference, &segmenter);
    assert_eq!(display.normalize("how r u ?"), "How are you?");

    let preprocessor = ModelPreprocessor::new(&reference, &segmenter);
    assert_eq!(preprocessor.preprocess("how r u ?"), "how are you ?");
    Ok(())
}

#[test]
fn test_segmenter_contract() {
    let segmenter = RuleSegmenter::new();
    let tokens = segmenter.segment("Cảm ơn bạn bè nhé!");
    let texts: Vec<_> = tokens.iter().map(|t| t.as_str()).collect();
    assert_eq!(texts, vec!["Cảm ơn", "bạn bè", "nhé", "!"]);
    assert_eq!(segmenter.segment_as_text("Cảm ơn bạn bè nhé!"), "Cảm ơn bạn bè nhé !");
}
