use candle_core::{Device, Result, Tensor};
use image::RgbImage;
use image::imageops::FilterType;

/// Expected input edge length for Teachable Machine style models.
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Convert a decoded image into the model input tensor.
///
/// Resizes to exactly 224x224 with Lanczos resampling and scales pixel
/// values to [0, 1]. The filter choice matches the model's training-time
/// preprocessing and must not be downgraded to nearest-neighbor. Output
/// shape is (1, 224, 224, 3) so both the real and mock paths see a uniform
/// batch-of-one layout.
pub fn preprocess(image: &RgbImage) -> Result<Tensor> {
    let size = MODEL_INPUT_SIZE;
    let resized = image::imageops::resize(image, size, size, FilterType::Lanczos3);

    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect();

    Tensor::from_vec(data, (1, size as usize, size as usize, 3), &Device::Cpu)
}
