use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbImage;

use crate::error::ClassifyError;

/// Decode a base64-encoded image into an RGB raster.
///
/// Inputs may carry a data-URL prefix (`data:image/png;base64,...`);
/// everything up to and including the first comma is discarded without
/// inspecting it. Alpha and grayscale sources are converted to RGB.
pub fn decode_image(input: &str) -> Result<RgbImage, ClassifyError> {
    let payload = match input.find(',') {
        Some(idx) => &input[idx + 1..],
        None => input,
    };

    let bytes = STANDARD.decode(payload)?;
    let image = image::load_from_memory(&bytes)?;
    Ok(image.to_rgb8())
}
