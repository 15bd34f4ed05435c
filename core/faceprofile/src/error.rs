use thiserror::Error;

/// Errors that can occur while loading backends or analyzing a photo.
#[derive(Debug, Error)]
pub enum FaceProfileError {
    /// The input bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    /// The decoded image has a zero width or height.
    #[error("image dimensions are zero")]
    ZeroDimensions,

    /// `analyze` was called before a face detector was configured.
    #[error("no face detector configured")]
    NoDetector,

    /// The detection backend failed or panicked.
    #[error("face detection failed: {0}")]
    DetectionFailed(String),

    /// A detector or attribute model file could not be loaded.
    #[error("failed to load model from {path}: {reason}")]
    ModelLoad {
        /// Path the load was attempted from.
        path: String,
        /// Backend-reported failure reason.
        reason: String,
    },

    /// An attribute model failed while running.
    #[error("inference failed: {0}")]
    InferenceFailed(String),

    /// An attribute model produced an output of the wrong length.
    #[error("model output length {actual} does not match expected {expected}")]
    OutputShapeMismatch {
        /// Output length the model kind requires.
        expected: usize,
        /// Length actually produced.
        actual: usize,
    },
}
