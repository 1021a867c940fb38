use std::fmt;

/// Failures raised by the sentiment model or while preparing it.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The model resource could not be loaded
    #[error("Model initialization failed: {0}")]
    Initialization(String),
    /// Error occurred while loading or using the tokenizer
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
    /// Error occurred while running the model
    #[error("Prediction error: {0}")]
    Prediction(String),
    /// The model returned no scores at all
    #[error("Model returned no scores")]
    EmptyScores,
    /// The winning score is not a probability
    #[error("Model returned an invalid score {score} for label '{label}'")]
    InvalidScore { label: String, score: f32 },
    /// The model panicked while scoring
    #[error("Model panicked: {0}")]
    Panicked(String),
}

impl From<ort::Error> for InferenceError {
    fn from(err: ort::Error) -> Self {
        InferenceError::Initialization(err.to_string())
    }
}

/// What went wrong with a classification request, for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    NotPlausibleText,
    Inference,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty input"),
            Self::NotPlausibleText => write!(f, "not plausible text"),
            Self::Inference => write!(f, "inference"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Input is blank after trimming
    #[error("Input text is empty")]
    EmptyInput,
    /// Input failed the validity heuristic
    #[error("Input does not look like Vietnamese or has no clear meaning")]
    NotPlausibleText,
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl ClassifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::NotPlausibleText => ErrorKind::NotPlausibleText,
            Self::Inference(_) => ErrorKind::Inference,
        }
    }

    /// True for errors the user can fix by typing something else.
    pub fn is_user_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Inference)
    }
}
