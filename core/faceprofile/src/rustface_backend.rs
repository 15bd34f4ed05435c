use std::path::Path;

use crate::error::FaceProfileError;
use crate::face_detector::{FaceBox, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// Loads a SeetaFace frontal-face model from a caller-supplied path on
/// construction. No model binary is bundled; Android/iOS hosts ship the
/// file alongside the attribute models and pass its resolved path in.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    /// Load a SeetaFace model file (e.g. `seeta_fd_frontal_v1.0.bin`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FaceProfileError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| FaceProfileError::ModelLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let model = rustface::read_model(std::io::Cursor::new(data)).map_err(|e| {
            FaceProfileError::ModelLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBox> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox {
                    left: bbox.x(),
                    top: bbox.y(),
                    right: bbox.x() + bbox.width() as i32,
                    bottom: bbox.y() + bbox.height() as i32,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}
