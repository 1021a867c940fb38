use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;
use serde::{Deserialize, Serialize};

use super::error::InferenceError;

/// One class score produced by a sentiment model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    pub label: String,
    pub score: f32,
}

impl RawScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// An opaque scorer returning one [`RawScore`] per class the model supports.
///
/// The classifier calls `score` from whichever thread handles a request, without any
/// locking of its own, so implementations must tolerate concurrent calls. Overly long
/// input must be truncated rather than rejected.
pub trait SentimentModel: Send + Sync {
    fn score(&self, text: &str) -> Result<Vec<RawScore>, InferenceError>;
}

impl<M: SentimentModel + ?Sized> SentimentModel for Arc<M> {
    fn score(&self, text: &str) -> Result<Vec<RawScore>, InferenceError> {
        (**self).score(text)
    }
}

impl<M: SentimentModel + ?Sized> SentimentModel for Box<M> {
    fn score(&self, text: &str) -> Result<Vec<RawScore>, InferenceError> {
        (**self).score(text)
    }
}

type Loader<M> = Box<dyn Fn() -> Result<M, InferenceError> + Send + Sync>;

/// Holds an expensive model that is built on first use and then shared for the life
/// of the slot.
///
/// Initialization runs under a single lock, so concurrent first callers load the
/// model once. A failed or panicking load leaves the slot empty and the next `acquire`
/// tries again.
pub struct ModelSlot<M> {
    loader: Loader<M>,
    model: Mutex<Option<Arc<M>>>,
}

impl<M: SentimentModel> ModelSlot<M> {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<M, InferenceError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            model: Mutex::new(None),
        }
    }

    /// A slot that already holds a loaded model.
    pub fn ready(model: M) -> Self {
        Self {
            loader: Box::new(|| {
                Err(InferenceError::Initialization(
                    "Model slot has no loader".into(),
                ))
            }),
            model: Mutex::new(Some(Arc::new(model))),
        }
    }

    /// Returns the cached model, loading it first if needed.
    pub fn acquire(&self) -> Result<Arc<M>, InferenceError> {
        let mut guard = self.lock();
        if let Some(model) = guard.as_ref() {
            return Ok(Arc::clone(model));
        }

        info!("Loading sentiment model...");
        let model = Arc::new((self.loader)()?);
        info!("Sentiment model ready");
        *guard = Some(Arc::clone(&model));
        Ok(model)
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    // A loader that panicked poisons the lock but never stores a model, so the
    // slot is still empty and safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<M>>> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
