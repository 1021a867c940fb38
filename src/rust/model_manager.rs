use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{ModelInfo, CONFIG_FILE, MODEL_FILE, TOKENIZER_FILE};

/// Environment variable overriding the cache root.
pub const CACHE_ENV: &str = "VIETSENT_CACHE";

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Model verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Keeps model files in a local cache directory, one sub-directory per model.
#[derive(Clone)]
pub struct ModelManager {
    models_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ModelManager {
    /// Creates a new ModelManager with the default models directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        if let Ok(path) = env::var(CACHE_ENV) {
            return PathBuf::from(path).join("models");
        }
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("vietsent").join("models");
        }
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("vietsent").join("models");
        }
        env::temp_dir().join("vietsent").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn get_model_dir(&self, name: &str) -> PathBuf {
        self.models_dir.join(name)
    }

    pub fn get_model_path(&self, name: &str) -> PathBuf {
        self.get_model_dir(name).join(MODEL_FILE)
    }

    pub fn get_tokenizer_path(&self, name: &str) -> PathBuf {
        self.get_model_dir(name).join(TOKENIZER_FILE)
    }

    pub fn get_config_path(&self, name: &str) -> PathBuf {
        self.get_model_dir(name).join(CONFIG_FILE)
    }

    pub fn is_model_downloaded(&self, name: &str) -> bool {
        let model_path = self.get_model_path(name);
        let tokenizer_path = self.get_tokenizer_path(name);
        log::debug!("Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::debug!("Tokenizer path: {:?} (exists: {})", tokenizer_path, tokenizer_path.exists());
        model_path.exists() && tokenizer_path.exists()
    }

    /// Returns the model directory, or `NotDownloaded` when its files are missing.
    pub fn require_model(&self, info: &ModelInfo) -> Result<PathBuf, ModelError> {
        if !self.is_model_downloaded(&info.name) {
            return Err(ModelError::NotDownloaded(info.name.clone()));
        }
        Ok(self.get_model_dir(&info.name))
    }

    pub async fn download_model(&self, info: &ModelInfo) -> Result<(), ModelError> {
        let _lock = self.download_lock.lock().await;

        let model_dir = self.get_model_dir(&info.name);
        log::info!("Creating model directory at {:?}", model_dir);
        fs::create_dir_all(&model_dir)?;

        let model_path = self.get_model_path(&info.name);
        let model_result = self
            .ensure_file(&info.model_url, &model_path, info.model_hash.as_deref(), "model")
            .await;

        let tokenizer_path = self.get_tokenizer_path(&info.name);
        let tokenizer_result = self
            .ensure_file(
                &info.tokenizer_url,
                &tokenizer_path,
                info.tokenizer_hash.as_deref(),
                "tokenizer",
            )
            .await;

        match (model_result, tokenizer_result) {
            (Ok(()), Ok(())) => {}
            (Err(e), _) => {
                log::error!("Failed to setup model file: {}", e);
                let _ = self.remove_download(&info.name);
                return Err(e);
            }
            (_, Err(e)) => {
                log::error!("Failed to setup tokenizer file: {}", e);
                let _ = self.remove_download(&info.name);
                return Err(e);
            }
        }

        // The label table is optional; the model falls back to LABEL_<n> names.
        let config_path = self.get_config_path(&info.name);
        if !config_path.exists() {
            if let Err(e) = self.ensure_file(&info.config_url, &config_path, None, "config").await {
                log::warn!("Model config unavailable, labels will be inferred: {}", e);
            }
        }

        log::info!("Model and tokenizer ready to use");
        Ok(())
    }

    async fn ensure_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: Option<&str>,
        file_type: &str,
    ) -> Result<(), ModelError> {
        if path.exists() {
            log::info!("{} file exists at {:?}, verifying...", file_type, path);
            if self.verify_file(path, expected_hash)? {
                log::info!("Existing {} file verified successfully", file_type);
                return Ok(());
            }
            log::warn!("{} file verification failed, redownloading", file_type);
        } else {
            log::info!("{} file does not exist, downloading...", file_type);
        }
        self.download_and_verify_file(url, path, expected_hash, file_type).await
    }

    fn verify_file(&self, path: &Path, expected_hash: Option<&str>) -> Result<bool, ModelError> {
        let Some(expected_hash) = expected_hash else {
            return Ok(path.exists());
        };
        let bytes = fs::read(path)?;
        let hash = sha256_hex(&bytes);
        log::debug!("Calculated hash: {}", hash);
        log::debug!("Expected hash:   {}", expected_hash);
        Ok(hash == expected_hash)
    }

    pub fn verify_model(&self, info: &ModelInfo) -> Result<bool, ModelError> {
        let model_path = self.get_model_path(&info.name);
        let tokenizer_path = self.get_tokenizer_path(&info.name);

        if !model_path.exists() || !tokenizer_path.exists() {
            log::info!("One or both model files do not exist");
            return Ok(false);
        }

        let model_ok = self.verify_file(&model_path, info.model_hash.as_deref())?;
        let tokenizer_ok = self.verify_file(&tokenizer_path, info.tokenizer_hash.as_deref())?;
        log::info!("Model hash verification: {}", model_ok);
        log::info!("Tokenizer hash verification: {}", tokenizer_ok);

        Ok(model_ok && tokenizer_ok)
    }

    async fn download_and_verify_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: Option<&str>,
        file_type: &str,
    ) -> Result<(), ModelError> {
        log::info!("Downloading {} file from {} to {:?}", file_type, url, path);
        let response = reqwest::get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        if let Some(expected_hash) = expected_hash {
            let hash = sha256_hex(&bytes);
            if hash != expected_hash {
                log::error!(
                    "{} hash mismatch: expected {}, got {}",
                    file_type,
                    expected_hash,
                    hash
                );
                return Err(ModelError::HashMismatch {
                    file_type: file_type.to_string(),
                    expected: expected_hash.to_string(),
                    actual: hash,
                });
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;

        if !self.verify_file(path, expected_hash)? {
            return Err(ModelError::VerificationFailed);
        }

        log::info!("{} file downloaded and verified successfully", file_type);
        Ok(())
    }

    pub fn remove_download(&self, name: &str) -> Result<(), ModelError> {
        for path in [
            self.get_model_path(name),
            self.get_tokenizer_path(name),
            self.get_config_path(name),
        ] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Ensures that a model is downloaded and verified.
    /// If the model doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_model_downloaded(&self, info: &ModelInfo) -> Result<PathBuf, ModelError> {
        log::info!("Checking if model {} is downloaded...", info.name);
        if !self.is_model_downloaded(&info.name) {
            log::info!("Model not found, downloading...");
            self.download_model(info).await?;
        } else if !self.verify_model(info)? {
            log::info!("Model verification failed, re-downloading...");
            self.remove_download(&info.name)?;
            self.download_model(info).await?;
        } else {
            log::info!("Model verification successful");
        }
        Ok(self.get_model_dir(&info.name))
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
