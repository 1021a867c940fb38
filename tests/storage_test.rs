use std::fs;

use chrono::NaiveDateTime;
use vietsent::history::TIMESTAMP_FORMAT;
use vietsent::{
    BuiltinModel, HistoryStore, InferenceError, JsonlHistory, ModelError, ModelManager, RawScore,
    Sentiment, SentimentClassifier, SentimentModel,
};

struct Positive;

impl SentimentModel for Positive {
    fn score(&self, _text: &str) -> Result<Vec<RawScore>, InferenceError> {
        Ok(vec![RawScore::new("POS", 0.93), RawScore::new("NEG", 0.07)])
    }
}

#[test]
fn test_history_records_original_text() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = JsonlHistory::open(dir.path().join("history.jsonl"))?;
    let classifier = SentimentClassifier::with_model(Positive);

    let result = classifier.classify("Ban khoe ko?")?;
    store.record(&result)?;

    let entries = store.query(10, None)?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Ban khoe ko?");
    assert_eq!(entries[0].sentiment, Sentiment::Positive);
    assert!(NaiveDateTime::parse_from_str(&entries[0].timestamp, TIMESTAMP_FORMAT).is_ok());
    Ok(())
}

#[test]
fn test_history_survives_reopen_and_bad_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("history.jsonl");
    {
        let store = JsonlHistory::open(&path)?;
        store.append("Phim hay quá", Sentiment::Positive, "2024-05-01 08:00:00")?;
    }
    let mut raw = fs::read_to_string(&path)?;
    raw.push_str("not json\n");
    fs::write(&path, raw)?;

    let store = JsonlHistory::open(&path)?;
    store.append("Dở tệ", Sentiment::Negative, "2024-05-01 08:05:00")?;

    let texts: Vec<_> = store
        .query(10, None)?
        .into_iter()
        .map(|entry| entry.text)
        .collect();
    assert_eq!(texts, vec!["Dở tệ", "Phim hay quá"]);
    assert_eq!(store.query(10, Some(Sentiment::Negative))?.len(), 1);
    Ok(())
}

#[test]
fn test_missing_model_is_reported() -> Result<(), ModelError> {
    let dir = tempfile::tempdir()?;
    let manager = ModelManager::new(dir.path())?;
    let info = BuiltinModel::default().get_model_info();
    assert!(matches!(
        manager.require_model(&info),
        Err(ModelError::NotDownloaded(_))
    ));
    Ok(())
}

#[test]
fn test_cached_model_is_reused() -> Result<(), ModelError> {
    let dir = tempfile::tempdir()?;
    let manager = ModelManager::new(dir.path())?;
    let mut info = BuiltinModel::DistilBert.get_model_info();
    // unreachable, so any download attempt would fail
    info.model_url = "http://127.0.0.1:9/model.onnx".to_string();
    info.tokenizer_url = "http://127.0.0.1:9/tokenizer.json".to_string();

    fs::create_dir_all(manager.get_model_dir(&info.name))?;
    fs::write(manager.get_model_path(&info.name), b"onnx")?;
    fs::write(manager.get_tokenizer_path(&info.name), b"{}")?;
    fs::write(manager.get_config_path(&info.name), b"{}")?;

    let dir = tokio_test::block_on(manager.ensure_model_downloaded(&info))?;
    assert_eq!(dir, manager.get_model_dir(&info.name));
    Ok(())
}
