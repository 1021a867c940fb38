use vietsent::{map_label, ReferenceData, RuleSegmenter, Sentiment, ValidityChecker};

fn is_valid(text: &str) -> bool {
    let reference = ReferenceData::builtin();
    let segmenter = RuleSegmenter::new();
    ValidityChecker::new(&reference, &segmenter).is_valid(text)
}

#[test]
fn test_short_inputs_are_always_rejected() {
    let samples = [
        "", "a", "vui", "  tốt  ", "hay ạ", "12345", "ok ok", "\t\tbuồn\n", "ừ ừ ừ",
    ];
    for text in samples {
        assert!(text.trim().chars().count() <= 5, "{:?} is not short", text);
        assert!(!is_valid(text), "{:?} should be rejected", text);
    }
}

#[test]
fn test_fewer_than_two_words_rejected() {
    for text in [
        "tuyệtvời!!!!",
        "123456789 ?!",
        "hay... 2024",
        "asdqwe123",
        "       buồnnnnnn      ",
    ] {
        assert!(!is_valid(text), "{:?} should be rejected", text);
    }
}

#[test]
fn test_consonant_soup_rejected() {
    assert!(!is_valid("bcdfgh klmnpq rstvwx"));
}

#[test]
fn test_long_tokens_rejected_without_stopword() {
    assert!(!is_valid("supercalifragilistic expialidociousness"));
    // one stopword is enough to accept the same words
    assert!(is_valid("supercalifragilistic và expialidociousness"));
}

#[test]
fn test_average_token_length_boundary() {
    // ten letters per word on average is still accepted
    assert!(is_valid("aaaaabbbbb aaaaabbbbb"));
    // 10.5 is not
    assert!(!is_valid("aaaaabbbbb aaaaabbbbbb"));
}

#[test]
fn test_vietnamese_sentences_accepted() {
    for text in [
        "Hôm nay tôi rất vui",
        "Ban khoe ko?",
        "Phim này dở tệ, không nên xem.",
        "Quán ăn này phục vụ chậm quá",
        "minh thay mon nay ngon",
    ] {
        assert!(is_valid(text), "{:?} should be accepted", text);
    }
}

#[test]
fn test_label_mapper_is_total() {
    let labels = [
        "POSITIVE", "positive", "Pos", "NEGATIVE", "neg", "NEUTRAL", "neu", "LABEL_0", "label_1",
        "LABEL_2", "LABEL_9", "", "😀", "sentiment", "0", "POSITIVE_",
    ];
    let scores = [0.0, 0.1, 0.49, 0.5, 0.51, 0.9, 1.0];
    for label in labels {
        for score in scores {
            let (sentiment, returned) = map_label(label, score);
            assert!(Sentiment::ALL.contains(&sentiment));
            assert_eq!(returned, score);
            if score < 0.5 {
                assert_eq!(sentiment, Sentiment::Neutral, "{} at {}", label, score);
            }
        }
    }
}

#[test]
fn test_label_examples() {
    assert_eq!(map_label("LABEL_2", 0.91), (Sentiment::Positive, 0.91));
    assert_eq!(map_label("NEG", 0.42), (Sentiment::Neutral, 0.42));
    assert_eq!(map_label("NEG", 0.58), (Sentiment::Negative, 0.58));
}
