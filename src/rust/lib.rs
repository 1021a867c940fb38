//! Sentiment classification for short, informal Vietnamese sentences.
//!
//! Raw input is screened by a validity heuristic, rewritten twice (a diacritized
//! sentence for display and a token string for the model), scored by a transformer
//! exported to ONNX and mapped onto `POSITIVE`, `NEGATIVE` or `NEUTRAL`.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use vietsent::{Config, ModelManager};
//!
//! let config = Config::default();
//! let manager = ModelManager::new(config.models_dir())?;
//! let model_dir = manager.require_model(&config.model.get_model_info())?;
//!
//! let classifier = config.build_classifier(model_dir)?;
//! let result = classifier.classify("Ban khoe ko?")?;
//! println!("{} -> {} ({:.2})", result.normalized_text, result.sentiment, result.score);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! [`SentimentClassifier`] is cheap to clone and every clone shares one lazily
//! loaded model:
//!
//! ```rust
//! use std::thread;
//! use vietsent::{InferenceError, RawScore, SentimentClassifier, SentimentModel};
//!
//! struct Constant;
//!
//! impl SentimentModel for Constant {
//!     fn score(&self, _text: &str) -> Result<Vec<RawScore>, InferenceError> {
//!         Ok(vec![RawScore::new("NEU", 0.8)])
//!     }
//! }
//!
//! let classifier = SentimentClassifier::with_model(Constant);
//! let handles: Vec<_> = (0..3)
//!     .map(|_| {
//!         let classifier = classifier.clone();
//!         thread::spawn(move || classifier.classify("toi thay binh thuong").is_ok())
//!     })
//!     .collect();
//! for handle in handles {
//!     assert!(handle.join().unwrap());
//! }
//! ```

pub mod config;
pub mod history;
pub mod model_manager;
pub mod models;
mod runtime;
pub mod sentiment;
pub mod text;

pub use config::{Config, ConfigError, RuntimeSettings};
pub use history::{HistoryEntry, HistoryError, HistoryStore, JsonlHistory, MemoryHistory};
pub use model_manager::{ModelError, ModelManager};
pub use models::{BuiltinModel, ModelInfo};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use sentiment::{
    map_label, ClassificationResult, ClassifierBuilder, ClassifyError, ErrorKind, InferenceError,
    ModelSlot, OnnxSentimentModel, RawScore, Sentiment, SentimentClassifier, SentimentModel,
};
pub use text::{
    DisplayNormalizer, ModelPreprocessor, NormalizationDictionary, ReferenceData, ReferenceError,
    RuleSegmenter, Segmenter, Token, ValidityChecker,
};

pub fn init_logger() {
    env_logger::init();
}
