//! The model runtime seam.
//!
//! Everything numerical happens behind [`Classifier`]. The scoring pipeline
//! only sees a batch going in and a probability vector coming out.

use std::path::Path;

use ndarray::Array4;
use tract_core::prelude::Tensor;
use tract_onnx::prelude::*;

use crate::error::{Result, ScoreError};
use crate::preprocess::INPUT_SHAPE;

pub trait Classifier: Send + Sync {
    /// Run one forward pass and return the probabilities for the single
    /// sample in `batch`.
    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>>;
}

type Plan = TypedRunnableModel<TypedModel>;

/// ONNX graph loaded and optimized by tract.
pub struct OnnxClassifier {
    plan: Plan,
}

impl OnnxClassifier {
    /// Load, pin the input to `f32 [1, 224, 224, 3]`, optimize and make the
    /// graph runnable. Any failure here is a startup failure.
    pub fn load(path: &Path) -> TractResult<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 224, 224, 3)),
            )?
            .into_optimized()?
            .into_runnable()?;
        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>> {
        if batch.shape() != INPUT_SHAPE {
            return Err(ScoreError::Model(format!(
                "expected input shape {:?}, got {:?}",
                INPUT_SHAPE,
                batch.shape()
            )));
        }
        let data: Vec<f32> = batch.iter().copied().collect();
        let tensor = Tensor::from_shape(&INPUT_SHAPE, &data).map_err(ScoreError::model)?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(ScoreError::model)?;
        let output = outputs
            .first()
            .ok_or_else(|| ScoreError::Model("model produced no outputs".into()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(ScoreError::model)?;

        Ok(view.iter().copied().collect())
    }
}
