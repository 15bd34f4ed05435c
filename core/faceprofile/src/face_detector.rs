/// Bounding box of a detected face, in image pixel coordinates.
///
/// Edges come straight from the detection backend and may be negative or
/// extend beyond the image; vision SDKs routinely report such rectangles
/// near the frame border. [`crate::crop::clamp_box`] brings them into range
/// before any pixel access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    /// X coordinate of the left edge (pixels).
    pub left: i32,
    /// Y coordinate of the top edge (pixels).
    pub top: i32,
    /// X coordinate of the right edge (pixels, exclusive).
    pub right: i32,
    /// Y coordinate of the bottom edge (pixels, exclusive).
    pub bottom: i32,
    /// Detection confidence score.
    pub confidence: f64,
}

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom face detector (ONNX, dlib, etc.)
/// and pass it to [`crate::FaceProfiler::face_detector`].
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    ///
    /// The returned list keeps the backend's native ordering. The analyzer
    /// takes the first entry as the primary face; no confidence re-ranking
    /// is done.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBox>;
}
