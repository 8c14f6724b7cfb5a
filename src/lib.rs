//! Serves an ONNX image classifier over HTTP.
//!
//! A request carries a base64 encoded image; the answer is the predicted
//! class, its confidence and the probability of every class, or a single
//! `error` message.

pub mod classifier;
pub mod config;
pub mod error;
pub mod handlers;
pub mod labels;
pub mod models;
pub mod preprocess;
pub mod scorer;

pub use classifier::{Classifier, OnnxClassifier};
pub use error::{Result, ScoreError};
pub use models::{Prediction, ScoreRequest, ScoreResponse};
pub use scorer::Scorer;
