use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const CONFIG_FILE: &str = "config.json";

const HF_BASE_URL: &str = "https://huggingface.co";

/// Represents the available built-in sentiment models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinModel {
    /// PhoBERT base v2 fine-tuned for Vietnamese sentiment
    ///
    /// Characteristics:
    /// - Labels: 3 (`LABEL_0`..`LABEL_2`)
    /// - Max sequence length: 256
    /// - Size: ~540MB
    #[default]
    PhoBert,
    /// Multilingual DistilBERT distilled for sentiment
    ///
    /// Characteristics:
    /// - Labels: 3 (`positive`, `neutral`, `negative`)
    /// - Max sequence length: 256
    /// - Size: ~540MB
    DistilBert,
}

/// Where a model's files come from and how to verify them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Directory name inside the models cache
    pub name: String,
    pub model_url: String,
    pub tokenizer_url: String,
    pub config_url: String,
    /// SHA-256 of the model file; unpinned files are trusted as downloaded
    #[serde(default)]
    pub model_hash: Option<String>,
    #[serde(default)]
    pub tokenizer_hash: Option<String>,
}

impl ModelInfo {
    /// Files published under a Hugging Face repository, unpinned.
    pub fn from_hub(name: impl Into<String>, repo_id: &str) -> Self {
        let file_url = |file: &str| format!("{}/{}/resolve/main/{}", HF_BASE_URL, repo_id, file);
        Self {
            name: name.into(),
            model_url: file_url(MODEL_FILE),
            tokenizer_url: file_url(TOKENIZER_FILE),
            config_url: file_url(CONFIG_FILE),
            model_hash: None,
            tokenizer_hash: None,
        }
    }
}

impl BuiltinModel {
    /// Name used when reporting which architecture is in use
    pub fn report_name(&self) -> &'static str {
        match self {
            Self::PhoBert => "phobert-base-v2",
            Self::DistilBert => "distilbert-base-multilingual-cased",
        }
    }

    pub fn hub_id(&self) -> &'static str {
        match self {
            Self::PhoBert => "duchienmtp/PhoBERT-sentiment-analysis",
            Self::DistilBert => "lxyuan/distilbert-base-multilingual-cased-sentiments-student",
        }
    }

    pub fn get_model_info(&self) -> ModelInfo {
        let name = match self {
            Self::PhoBert => "phobert-sentiment",
            Self::DistilBert => "distilbert-sentiment",
        };
        ModelInfo::from_hub(name, self.hub_id())
    }
}

impl fmt::Display for BuiltinModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_name())
    }
}

impl FromStr for BuiltinModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "phobert" | "phobert-base-v2" => Ok(Self::PhoBert),
            "distilbert" | "distilbert-base-multilingual-cased" => Ok(Self::DistilBert),
            other => Err(format!("Unknown model '{}' (expected phobert or distilbert)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_info_urls() {
        let info = BuiltinModel::PhoBert.get_model_info();
        assert_eq!(info.name, "phobert-sentiment");
        assert_eq!(
            info.config_url,
            "https://huggingface.co/duchienmtp/PhoBERT-sentiment-analysis/resolve/main/config.json"
        );
        assert!(info.model_hash.is_none());
    }

    #[test]
    fn test_parse_model() {
        assert_eq!("PhoBERT".parse::<BuiltinModel>(), Ok(BuiltinModel::PhoBert));
        assert_eq!("distilbert".parse::<BuiltinModel>(), Ok(BuiltinModel::DistilBert));
        assert!("minilm".parse::<BuiltinModel>().is_err());
    }
}
