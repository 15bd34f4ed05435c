use image::imageops::FilterType;
use image::DynamicImage;

/// Fixed-shape float buffer ready for an inference call.
///
/// Holds `3 · side²` interleaved R,G,B values in `[0,1]`, serialized in
/// row-major pixel order (channels-last, the layout the bundled models were
/// trained with). One buffer is built fresh per model invocation and
/// discarded after the call returns.
#[derive(Debug, Clone)]
pub struct EncodedTensor {
    side: u32,
    data: Vec<f32>,
}

impl EncodedTensor {
    /// Square input resolution this buffer was encoded for.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// The raw float buffer, length `3 · side²`.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Encode a cropped face for a model with square input resolution `side`.
///
/// The crop is resampled to exactly `side` × `side` with bilinear filtering,
/// then each pixel's R, G, B channels are appended as `u8 / 255.0` floats.
/// Alpha is dropped.
pub fn encode_face(face: &DynamicImage, side: u32) -> EncodedTensor {
    let resized = face.resize_exact(side, side, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let mut data = Vec::with_capacity(3 * (side * side) as usize);
    for pixel in rgb.pixels() {
        let [r, g, b] = pixel.0;
        data.push(r as f32 / 255.0);
        data.push(g as f32 / 255.0);
        data.push(b as f32 / 255.0);
    }

    EncodedTensor { side, data }
}
