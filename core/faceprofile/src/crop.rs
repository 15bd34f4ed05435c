use image::DynamicImage;

use crate::face_detector::FaceBox;

/// Crop region within the source image, clamped to its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Region width in pixels, at least 1.
    pub width: u32,
    /// Region height in pixels, at least 1.
    pub height: u32,
}

/// Clamp a detector bounding box to the image bounds.
///
/// Each edge is clamped independently (`left`/`top` into `[0, dim - 1]`,
/// `right`/`bottom` into `[0, dim]`) and the resulting width and height are
/// floored at 1, so a box that is inverted or lies entirely outside the
/// image still yields a valid (possibly 1×1) region. There is no error
/// path; callers guarantee non-zero image dimensions.
pub fn clamp_box(bbox: &FaceBox, image_width: u32, image_height: u32) -> CropRegion {
    let x = bbox.left.clamp(0, image_width as i32 - 1) as u32;
    let y = bbox.top.clamp(0, image_height as i32 - 1) as u32;
    let right = bbox.right.clamp(0, image_width as i32) as u32;
    let bottom = bbox.bottom.clamp(0, image_height as i32) as u32;

    CropRegion {
        x,
        y,
        width: right.saturating_sub(x).max(1),
        height: bottom.saturating_sub(y).max(1),
    }
}

/// Extract the face sub-image for a detector bounding box.
pub fn crop_face(image: &DynamicImage, bbox: &FaceBox) -> (DynamicImage, CropRegion) {
    let region = clamp_box(bbox, image.width(), image.height());
    let face = image.crop_imm(region.x, region.y, region.width, region.height);
    (face, region)
}
