#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use base64::{prelude::BASE64_STANDARD, Engine};
use classifier_backend::{Classifier, Result, Scorer};
use image::{DynamicImage, ImageOutputFormat};
use ndarray::Array4;
use tempfile::TempDir;

/// Returns a fixed probability vector and keeps every batch it was given.
#[derive(Clone)]
pub struct StubClassifier {
    probabilities: Vec<f32>,
    pub batches: Arc<Mutex<Vec<Array4<f32>>>>,
}

impl StubClassifier {
    pub fn new(probabilities: &[f32]) -> Self {
        Self {
            probabilities: probabilities.to_vec(),
            batches: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_batch(&self) -> Array4<f32> {
        self.batches
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("classifier was never called")
    }
}

impl Classifier for StubClassifier {
    fn predict(&self, batch: &Array4<f32>) -> Result<Vec<f32>> {
        self.batches.lock().unwrap().push(batch.clone());
        Ok(self.probabilities.clone())
    }
}

/// Model directory holding only a `labels.txt`.
pub fn labels_dir(labels: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("labels.txt"), labels.join("\n") + "\n").unwrap();
    dir
}

pub fn scorer(classifier: StubClassifier, dir: &TempDir) -> Scorer {
    Scorer::new(Box::new(classifier), dir.path().join("labels.txt"))
}

pub fn png_base64(img: DynamicImage) -> String {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageOutputFormat::Png).unwrap();
    BASE64_STANDARD.encode(buf.into_inner())
}

pub fn request_body(image_b64: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "image": image_b64 })).unwrap()
}
