use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::history::JsonlHistory;
use crate::model_manager::ModelManager;
use crate::models::BuiltinModel;
use crate::runtime::RuntimeConfig;
use crate::sentiment::{
    ModelSlot, OnnxSentimentModel, SentimentClassifier, DEFAULT_MAX_SEQUENCE_LENGTH,
};
use crate::text::{ReferenceData, ReferenceError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// ONNX Runtime thread settings; zero lets the runtime decide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub inter_threads: usize,
    pub intra_threads: usize,
}

impl From<RuntimeSettings> for RuntimeConfig {
    fn from(settings: RuntimeSettings) -> Self {
        Self {
            inter_threads: settings.inter_threads,
            intra_threads: settings.intra_threads,
            ..RuntimeConfig::default()
        }
    }
}

/// Application settings. Every field is optional in the JSON file; unset paths fall
/// back to the environment and then to platform directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: BuiltinModel,
    /// Local directory holding `model.onnx` and `tokenizer.json`; bypasses the cache
    pub model_dir: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
    /// JSON file replacing the builtin vowels, stopwords and dictionary
    pub reference_path: Option<PathBuf>,
    pub max_sequence_length: usize,
    pub runtime: RuntimeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: BuiltinModel::default(),
            model_dir: None,
            models_dir: None,
            history_path: None,
            reference_path: None,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            runtime: RuntimeSettings::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn models_dir(&self) -> PathBuf {
        self.models_dir
            .clone()
            .unwrap_or_else(ModelManager::get_default_models_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(JsonlHistory::default_path)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        self.runtime.into()
    }

    pub fn reference_data(&self) -> Result<ReferenceData, ReferenceError> {
        match &self.reference_path {
            Some(path) => ReferenceData::from_json_file(path),
            None => Ok(ReferenceData::builtin()),
        }
    }

    /// Classifier whose ONNX model is loaded from `model_dir` on the first request.
    pub fn build_classifier(
        &self,
        model_dir: PathBuf,
    ) -> Result<SentimentClassifier<OnnxSentimentModel>, ReferenceError> {
        let runtime_config = self.runtime_config();
        let max_sequence_length = self.max_sequence_length;
        let slot = ModelSlot::new(move || {
            OnnxSentimentModel::from_dir(&model_dir, &runtime_config, max_sequence_length)
        });
        Ok(SentimentClassifier::builder(Arc::new(slot))
            .with_reference(Arc::new(self.reference_data()?))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"model": "distilbert", "runtime": {{"intra_threads": 4}}}}"#)?;
        let config = Config::from_file(file.path())?;
        assert_eq!(config.model, BuiltinModel::DistilBert);
        assert_eq!(config.max_sequence_length, 256);
        assert_eq!(config.runtime.intra_threads, 4);
        assert_eq!(config.runtime_config().intra_threads, 4);
        assert!(config.model_dir.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/vietsent.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_build_classifier_is_lazy() -> Result<(), ReferenceError> {
        let classifier = Config::default().build_classifier(PathBuf::from("/nonexistent/model"))?;
        // Rejected input never touches the missing model
        assert!(!classifier.is_valid("qwrtp"));
        let err = classifier.classify("Hôm nay tôi rất vui").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Inference);
        Ok(())
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = Config {
            history_path: Some(PathBuf::from("/tmp/h.jsonl")),
            ..Config::default()
        };
        assert_eq!(config.history_path(), PathBuf::from("/tmp/h.jsonl"));
    }
}
