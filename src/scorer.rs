//! The scoring pipeline: request body in, prediction or error message out.

use std::path::{Path, PathBuf};

use base64::{prelude::BASE64_STANDARD, Engine};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::classifier::{Classifier, OnnxClassifier};
use crate::config::ModelConfig;
use crate::error::{Result, ScoreError};
use crate::labels::Labels;
use crate::models::{Prediction, ScoreRequest, ScoreResponse};
use crate::preprocess::preprocess_image;

/// A loaded model plus the location of its labels.
///
/// Built once at startup and shared read-only between requests.
pub struct Scorer {
    classifier: Box<dyn Classifier>,
    labels_path: PathBuf,
}

impl Scorer {
    pub fn new(classifier: Box<dyn Classifier>, labels_path: impl Into<PathBuf>) -> Self {
        Self {
            classifier,
            labels_path: labels_path.into(),
        }
    }

    /// Load the ONNX artifact described by `cfg`.
    pub fn from_config(cfg: &ModelConfig) -> anyhow::Result<Self> {
        let model_path = cfg.model_path();
        info!(path = %model_path.display(), "loading model");
        let classifier = OnnxClassifier::load(&model_path)
            .map_err(|e| e.context(format!("failed to load model from {}", model_path.display())))?;
        Ok(Self::new(Box::new(classifier), cfg.labels_path()))
    }

    pub fn labels_path(&self) -> &Path {
        &self.labels_path
    }

    /// Score one raw request body.
    ///
    /// Labels are re-read on every call; a missing `labels.txt` is reported
    /// in the response, not at startup.
    pub fn score(&self, body: &[u8]) -> Result<Prediction> {
        let request: ScoreRequest = serde_json::from_slice(body)?;
        let bytes = decode_image(&request.image)?;
        let batch = preprocess_image(&bytes)?;

        let probabilities = self.classifier.predict(&batch)?;
        let labels = Labels::load(&self.labels_path)?;

        let index = argmax(&probabilities).ok_or(ScoreError::EmptyOutput)?;
        let class_name = labels.get(index)?.to_string();

        Ok(Prediction {
            class_name,
            confidence: probabilities[index],
            all_probabilities: labels.zip_probabilities(&probabilities),
        })
    }

    /// Score `body` and fold any failure into `{"error": ...}`.
    pub fn run(&self, body: &[u8]) -> ScoreResponse {
        let request_id = Uuid::new_v4();
        let _span = info_span!("score", %request_id).entered();

        match self.score(body) {
            Ok(prediction) => {
                info!(
                    class_name = %prediction.class_name,
                    confidence = prediction.confidence,
                    "scored image"
                );
                ScoreResponse::Prediction(prediction)
            }
            Err(err) => {
                warn!(error = %err, "scoring failed");
                ScoreResponse::error(err.to_string())
            }
        }
    }
}

/// Decode the standard base64 alphabet, ignoring line wrapping and other
/// ASCII whitespace some clients insert.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>> {
    let compact: Vec<u8> = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    Ok(BASE64_STANDARD.decode(compact)?)
}

/// Index of the largest probability. Ties go to the first index and NaN never
/// wins; `None` when nothing comparable is left.
pub fn argmax(probabilities: &[f32]) -> Option<usize> {
    probabilities
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_nan())
        .fold(None, |best: Option<(usize, f32)>, (i, &p)| match best {
            Some((_, top)) if top >= p => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}
