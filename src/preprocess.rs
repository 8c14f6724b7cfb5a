//! Turns raw image bytes into the tensor the classifier expects.

use image::imageops::FilterType;
use ndarray::Array4;

use crate::error::Result;

/// Side length of the square input the model was trained on.
pub const INPUT_SIZE: u32 = 224;
pub const CHANNELS: usize = 3;

/// Shape of the batch handed to the classifier, NHWC.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, CHANNELS];

/// Decode `bytes`, force three channels, stretch to 224x224 and scale into
/// `[0, 1]`. The result always has shape `1x224x224x3`.
pub fn preprocess_image(bytes: &[u8]) -> Result<Array4<f32>> {
    let img = image::load_from_memory(bytes)?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );

    // Grayscale is expanded and alpha dropped here, before resampling.
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);

    let mut batch = Array4::<f32>::zeros(INPUT_SHAPE);
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..CHANNELS {
            batch[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }

    Ok(batch)
}
