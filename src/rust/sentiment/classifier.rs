use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::error::{ClassifyError, InferenceError};
use super::label::{map_label, Sentiment};
use super::model::{ModelSlot, RawScore, SentimentModel};
use crate::text::{
    DisplayNormalizer, ModelPreprocessor, ReferenceData, RuleSegmenter, Segmenter,
    ValidityChecker,
};

/// Outcome of classifying one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The text exactly as the caller passed it
    pub original_text: String,
    /// Diacritized, capitalized rendering for display
    pub normalized_text: String,
    pub sentiment: Sentiment,
    /// Raw model probability of the winning label, in `[0, 1]`
    pub score: f32,
}

/// Classifies the sentiment of short, informal Vietnamese sentences.
///
/// Input is screened by [`ValidityChecker`] before any model call, normalized twice
/// (once for display, once for the model) and scored by a lazily loaded
/// [`SentimentModel`]. The winning label goes through [`map_label`].
///
/// ```rust
/// # use vietsent::{SentimentClassifier, SentimentModel, RawScore, InferenceError, Sentiment};
/// struct AlwaysPositive;
///
/// impl SentimentModel for AlwaysPositive {
///     fn score(&self, _text: &str) -> Result<Vec<RawScore>, InferenceError> {
///         Ok(vec![RawScore::new("LABEL_2", 0.91), RawScore::new("LABEL_0", 0.09)])
///     }
/// }
///
/// let classifier = SentimentClassifier::with_model(AlwaysPositive);
/// let result = classifier.classify("Hom nay toi rat vui").unwrap();
/// assert_eq!(result.sentiment, Sentiment::Positive);
/// ```
pub struct SentimentClassifier<M: SentimentModel> {
    reference: Arc<ReferenceData>,
    segmenter: Arc<dyn Segmenter>,
    model: Arc<ModelSlot<M>>,
}

impl<M: SentimentModel> Clone for SentimentClassifier<M> {
    fn clone(&self) -> Self {
        Self {
            reference: Arc::clone(&self.reference),
            segmenter: Arc::clone(&self.segmenter),
            model: Arc::clone(&self.model),
        }
    }
}

impl<M: SentimentModel> SentimentClassifier<M> {
    pub fn new(
        reference: Arc<ReferenceData>,
        segmenter: Arc<dyn Segmenter>,
        model: Arc<ModelSlot<M>>,
    ) -> Self {
        Self {
            reference,
            segmenter,
            model,
        }
    }

    /// Builtin reference data, the rule segmenter and an already loaded model.
    pub fn with_model(model: M) -> Self {
        Self::builder(Arc::new(ModelSlot::ready(model))).build()
    }

    pub fn builder(model: Arc<ModelSlot<M>>) -> ClassifierBuilder<M> {
        ClassifierBuilder::new(model)
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn validity_checker(&self) -> ValidityChecker<'_> {
        ValidityChecker::new(&self.reference, self.segmenter.as_ref())
    }

    pub fn display_normalizer(&self) -> DisplayNormalizer<'_> {
        DisplayNormalizer::new(&self.reference, self.segmenter.as_ref())
    }

    pub fn model_preprocessor(&self) -> ModelPreprocessor<'_> {
        ModelPreprocessor::new(&self.reference, self.segmenter.as_ref())
    }

    pub fn is_valid(&self, text: &str) -> bool {
        self.validity_checker().is_valid(text)
    }

    pub fn classify(&self, raw_text: &str) -> Result<ClassificationResult, ClassifyError> {
        if raw_text.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        if !self.is_valid(raw_text) {
            return Err(ClassifyError::NotPlausibleText);
        }

        let normalized_text = self.display_normalizer().normalize(raw_text);
        let model_text = self.model_preprocessor().preprocess(raw_text);
        debug!("Model input: {}", model_text);

        let scores = self.score(&model_text)?;
        if let Some(bad) = scores.iter().find(|s| !s.score.is_finite()) {
            return Err(InferenceError::InvalidScore {
                label: bad.label.clone(),
                score: bad.score,
            }
            .into());
        }
        let best = top_score(scores).ok_or(InferenceError::EmptyScores)?;
        if !(0.0..=1.0).contains(&best.score) {
            return Err(InferenceError::InvalidScore {
                label: best.label,
                score: best.score,
            }
            .into());
        }
        debug!("Top label {} ({:.4})", best.label, best.score);

        let (sentiment, score) = map_label(&best.label, best.score);
        Ok(ClassificationResult {
            original_text: raw_text.to_string(),
            normalized_text,
            sentiment,
            score,
        })
    }

    fn score(&self, model_text: &str) -> Result<Vec<RawScore>, InferenceError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let model = self.model.acquire()?;
            model.score(model_text)
        }));
        outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            warn!("Sentiment model panicked: {}", message);
            Err(InferenceError::Panicked(message))
        })
    }
}

/// First entry with the strictly highest score.
fn top_score(scores: Vec<RawScore>) -> Option<RawScore> {
    let mut best: Option<RawScore> = None;
    for candidate in scores {
        match &best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Assembles a [`SentimentClassifier`] around an injected model slot.
pub struct ClassifierBuilder<M: SentimentModel> {
    reference: Option<Arc<ReferenceData>>,
    segmenter: Option<Arc<dyn Segmenter>>,
    model: Arc<ModelSlot<M>>,
}

impl<M: SentimentModel> ClassifierBuilder<M> {
    pub fn new(model: Arc<ModelSlot<M>>) -> Self {
        Self {
            reference: None,
            segmenter: None,
            model,
        }
    }

    pub fn with_reference(mut self, reference: Arc<ReferenceData>) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Missing pieces default to [`ReferenceData::builtin`] and [`RuleSegmenter::new`].
    pub fn build(self) -> SentimentClassifier<M> {
        SentimentClassifier::new(
            self.reference
                .unwrap_or_else(|| Arc::new(ReferenceData::builtin())),
            self.segmenter
                .unwrap_or_else(|| Arc::new(RuleSegmenter::new())),
            self.model,
        )
    }
}
