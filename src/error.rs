use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoreError>;

/// Everything that can go wrong while scoring a single request.
///
/// The variants only matter for logs and tests. Callers of the endpoint see
/// the rendered message inside `{"error": ...}` and nothing else.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("invalid request body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid base64 image: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("cannot decode image: {0}")]
    InvalidImage(#[from] image::ImageError),

    #[error("model error: {0}")]
    Model(String),

    #[error("model returned no usable probabilities")]
    EmptyOutput,

    #[error("cannot read labels from {}: {source}", path.display())]
    Labels {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("predicted index {index} has no label ({count} labels loaded)")]
    LabelOutOfRange { index: usize, count: usize },
}

impl ScoreError {
    pub fn model(err: impl std::fmt::Display) -> Self {
        Self::Model(format!("{err:#}"))
    }
}
