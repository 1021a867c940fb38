use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, error, info};
use ndarray::{Array1, Array2, ArrayD};
use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};

use super::error::InferenceError;
use super::model::{RawScore, SentimentModel};
use super::utils::softmax;
use crate::models::{CONFIG_FILE, MODEL_FILE, TOKENIZER_FILE};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Default truncation length applied to model input.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 256;

#[derive(Debug, Default, Deserialize)]
struct LabelConfig {
    #[serde(default)]
    id2label: HashMap<String, String>,
}

/// A sequence-classification transformer exported to ONNX.
///
/// The model must accept `input_ids` and `attention_mask` and return logits of shape
/// `[1, num_labels]`. Label names come from the `id2label` table of `config.json`
/// when present, otherwise `LABEL_<n>`.
///
/// # Thread Safety
///
/// `Session::run` and `Tokenizer::encode` both take `&self`, so one instance can be
/// shared behind an `Arc` and scored from several threads at once.
#[derive(Debug)]
pub struct OnnxSentimentModel {
    tokenizer: Tokenizer,
    session: Session,
    labels: Vec<String>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<OnnxSentimentModel>();
    }
};

impl OnnxSentimentModel {
    /// Loads `model.onnx`, `tokenizer.json` and the optional `config.json` from a directory.
    pub fn from_dir<P: AsRef<Path>>(
        dir: P,
        runtime_config: &RuntimeConfig,
        max_sequence_length: usize,
    ) -> Result<Self, InferenceError> {
        let dir = dir.as_ref();
        let config_path = dir.join(CONFIG_FILE);
        Self::from_files(
            dir.join(MODEL_FILE),
            dir.join(TOKENIZER_FILE),
            config_path.exists().then_some(config_path.as_path()),
            runtime_config,
            max_sequence_length,
        )
    }

    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        model_path: P,
        tokenizer_path: Q,
        config_path: Option<&Path>,
        runtime_config: &RuntimeConfig,
        max_sequence_length: usize,
    ) -> Result<Self, InferenceError> {
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();
        if max_sequence_length == 0 {
            return Err(InferenceError::Initialization(
                "Max sequence length must be positive".into(),
            ));
        }
        if !model_path.exists() {
            return Err(InferenceError::Initialization(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(InferenceError::Initialization(format!(
                "Tokenizer file not found: {}",
                tokenizer_path.display()
            )));
        }

        let mut tokenizer = Tokenizer::from_file(tokenizer_path).map_err(|e| {
            error!("Failed to load tokenizer: {}", e);
            InferenceError::Initialization(format!("Failed to load tokenizer: {}", e))
        })?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_sequence_length,
                ..Default::default()
            }))
            .map_err(|e| InferenceError::Tokenizer(e.to_string()))?;
        info!("Tokenizer loaded successfully");

        let session = create_session_builder(runtime_config)?.commit_from_file(model_path)?;
        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        let labels = match config_path {
            Some(path) => Self::read_labels(path)?,
            None => Vec::new(),
        };

        let mut model = Self {
            tokenizer,
            session,
            labels,
        };

        if model.labels.is_empty() {
            // No label table: infer the class count by running a test input
            let logits = model.logits("xin chào")?;
            model.labels = (0..logits.len()).map(|i| format!("LABEL_{}", i)).collect();
            info!("Inferred {} labels from model output", model.labels.len());
        }
        info!("Model labels: {}", model.labels.join(", "));

        Ok(model)
    }

    fn read_labels(path: &Path) -> Result<Vec<String>, InferenceError> {
        let json = fs::read_to_string(path).map_err(|e| {
            InferenceError::Initialization(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: LabelConfig = serde_json::from_str(&json).map_err(|e| {
            InferenceError::Initialization(format!(
                "Invalid model config {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut indexed = Vec::with_capacity(config.id2label.len());
        for (id, label) in config.id2label {
            let id: usize = id.parse().map_err(|_| {
                InferenceError::Initialization(format!("Invalid label id '{}' in model config", id))
            })?;
            indexed.push((id, label));
        }
        indexed.sort_by_key(|(id, _)| *id);
        if indexed.iter().enumerate().any(|(i, (id, _))| i != *id) {
            return Err(InferenceError::Initialization(
                "Label ids in model config are not contiguous from 0".into(),
            ));
        }
        Ok(indexed.into_iter().map(|(_, label)| label).collect())
    }

    fn validate_model(session: &Session) -> Result<(), InferenceError> {
        let inputs = &session.inputs;
        if inputs.len() < 2 {
            return Err(InferenceError::Initialization(format!(
                "Model must have at least 2 inputs (input_ids and attention_mask), found {}",
                inputs.len()
            )));
        }
        if session.outputs.is_empty() {
            return Err(InferenceError::Initialization(
                "Model must have at least 1 output for logits".to_string(),
            ));
        }
        Ok(())
    }

    fn logits(&self, text: &str) -> Result<Array1<f32>, InferenceError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| InferenceError::Tokenizer(e.to_string()))?;
        let ids = encoding.get_ids();
        let mask = encoding.get_attention_mask();
        if ids.is_empty() {
            return Err(InferenceError::Tokenizer("Text produced no tokens".into()));
        }
        debug!("Scoring {} tokens", ids.len());

        let input_dyn = to_batch(ids)?;
        let input_ids = input_dyn.as_standard_layout();
        let mask_dyn = to_batch(mask)?;
        let attention_mask = mask_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            "input_ids",
            Tensor::from_array(&input_ids).map_err(|e| {
                InferenceError::Prediction(format!("Failed to create input tensor: {}", e))
            })?,
        );
        input_tensors.insert(
            "attention_mask",
            Tensor::from_array(&attention_mask).map_err(|e| {
                InferenceError::Prediction(format!("Failed to create mask tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| InferenceError::Prediction(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            InferenceError::Prediction(format!("Failed to extract output tensor: {}", e))
        })?;

        Ok(Array1::from_iter(output_tensor.iter().cloned()))
    }
}

/// A `[1, len]` batch of token ids or mask values.
fn to_batch(values: &[u32]) -> Result<ArrayD<i64>, InferenceError> {
    Array2::from_shape_vec((1, values.len()), values.iter().map(|&x| x as i64).collect())
        .map(|array| array.into_dyn())
        .map_err(|e| InferenceError::Prediction(format!("Failed to create input array: {}", e)))
}

impl SentimentModel for OnnxSentimentModel {
    fn score(&self, text: &str) -> Result<Vec<RawScore>, InferenceError> {
        let logits = self.logits(text)?;
        if logits.len() != self.labels.len() {
            return Err(InferenceError::Prediction(format!(
                "Model produced {} logits for {} labels",
                logits.len(),
                self.labels.len()
            )));
        }

        let probabilities = softmax(&logits).ok_or_else(|| {
            InferenceError::Prediction("Model produced non-finite logits".to_string())
        })?;
        Ok(self
            .labels
            .iter()
            .zip(probabilities.iter())
            .map(|(label, &score)| RawScore::new(label.clone(), score))
            .collect())
    }
}
