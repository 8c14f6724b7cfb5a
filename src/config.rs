use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `CLASSIFIER__SERVER__BIND_ADDRESS`.
pub const ENV_PREFIX: &str = "CLASSIFIER";

/// Base64 photos easily exceed actix's 256 KiB default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Address and port the HTTP server binds to.
    pub bind_address: String,
    /// Default tracing filter; `RUST_LOG` takes precedence when set.
    pub log_level: String,
    /// Largest request body accepted by `/score`, in bytes.
    pub max_body_bytes: usize,
}

/// Where the model artifact and its label file live on disk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelConfig {
    pub model_dir: PathBuf,
    pub model_file: String,
    pub labels_file: String,
}

impl ModelConfig {
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.model_dir.join(&self.labels_file)
    }
}

impl AppConfig {
    /// Build the configuration from built-in defaults, the optional file at
    /// `path` (any format the `config` crate understands) and finally
    /// `CLASSIFIER__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.bind_address", "127.0.0.1:8080")?
            .set_default("server.log_level", "info")?
            .set_default("server.max_body_bytes", DEFAULT_MAX_BODY_BYTES as i64)?
            .set_default("model.model_dir", "model")?
            .set_default("model.model_file", "model.onnx")?
            .set_default("model.labels_file", "labels.txt")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder.add_source(env).build()?.try_deserialize()
    }
}
