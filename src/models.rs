use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Body accepted by the scoring endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreRequest {
    /// Base64 encoded image bytes, any format the decoder understands.
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub confidence: f32,
    /// Keyed by class name, in `labels.txt` order.
    pub all_probabilities: IndexMap<String, f32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// What the endpoint writes back: either a prediction or an error message.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScoreResponse {
    Prediction(Prediction),
    Error(ErrorResponse),
}

impl ScoreResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorResponse {
            error: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
