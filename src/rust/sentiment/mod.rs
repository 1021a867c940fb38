mod classifier;
mod error;
pub mod label;
mod model;
mod onnx;
mod utils;

pub use classifier::{ClassificationResult, ClassifierBuilder, SentimentClassifier};
pub use error::{ClassifyError, ErrorKind, InferenceError};
pub use label::{map_label, ParseSentimentError, Sentiment, CONFIDENCE_FLOOR};
pub use model::{ModelSlot, RawScore, SentimentModel};
pub use onnx::{OnnxSentimentModel, DEFAULT_MAX_SEQUENCE_LENGTH};
