//! Face attribute profiling: detect the prominent face in a photo and
//! estimate emotion, age, and gender with pre-trained models.
//!
//! The pipeline is linear: decode the photo, locate the primary face, crop
//! it, then run three independent encode → infer → decode passes. Detection
//! and inference are pluggable backends behind the [`FaceDetector`] and
//! [`AttributeModel`] traits; built-in backends for `rustface` (SeetaFace)
//! and `ort` (ONNX Runtime) are available behind cargo features of the same
//! names.
//!
//! # Example
//!
//! ```no_run
//! use faceprofile::{Analysis, FaceProfiler};
//!
//! # fn main() -> Result<(), faceprofile::FaceProfileError> {
//! let photo = std::fs::read("photo.jpg").unwrap();
//! let mut profiler = FaceProfiler::new()
//!     .rustface_detector("models/seeta_fd_frontal_v1.0.bin")?
//!     .ort_models(
//!         "models/emotion_model.onnx",
//!         "models/age_model.onnx",
//!         "models/gender_model.onnx",
//!     );
//!
//! match profiler.analyze(&photo)? {
//!     Analysis::NoFace => println!("No face detected"),
//!     Analysis::Profile(profile) => println!("{}", profile.summary()),
//! }
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod analyzer;
/// Bounding-box clamping and face cropping.
pub mod crop;
/// Decoding of raw model outputs into labels and an age in years.
pub mod decode;
/// Face-to-tensor encoding.
pub mod encode;
mod error;
/// Face detection traits and data types.
pub mod face_detector;
/// Attribute model traits and per-model constants.
pub mod inference;
#[cfg(feature = "ort")]
/// Built-in ONNX Runtime attribute-model backend.
pub mod ort_backend;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;

/// Analysis progress states.
pub use analyzer::AnalysisState;
/// Crop region type.
pub use crop::CropRegion;
/// Tensor buffer passed to attribute models.
pub use encode::EncodedTensor;
/// Error type returned by faceprofile operations.
pub use error::FaceProfileError;
/// Face detection trait and face bounding-box type.
pub use face_detector::{FaceBox, FaceDetector};
/// Attribute model trait and model kinds.
pub use inference::{AttributeModel, ModelKind};
#[cfg(feature = "ort")]
/// Built-in model handle backed by ONNX Runtime.
pub use ort_backend::OrtModel;
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model file.
pub use rustface_backend::RustfaceDetector;

use image::DynamicImage;

/// Outcome of a single analysis.
#[derive(Debug, Clone)]
pub enum Analysis {
    /// The detector returned no faces; nothing was inferred. The
    /// presentation layer maps this to a "No face detected" notification.
    NoFace,
    /// Attribute estimates for the primary detected face.
    Profile(FaceProfile),
}

/// Attribute estimates for one face.
#[derive(Debug, Clone)]
pub struct FaceProfile {
    /// Emotion label, or `"Unknown"` if the emotion model is unavailable.
    pub emotion: String,
    /// Estimated age in years, or `-1` if the age model is unavailable.
    /// Not clamped: a model output outside `[0,1]` yields an age outside
    /// `[0,116]`.
    pub age: i32,
    /// Gender label, or `"Unknown"` if the gender model is unavailable.
    pub gender: String,
    /// The clamped face region the estimates were computed from, in source
    /// image coordinates.
    pub face: CropRegion,
}

impl FaceProfile {
    /// Render the user-visible text block.
    pub fn summary(&self) -> String {
        format!(
            "Emotion: {}\nAge: {}\nGender: {}",
            self.emotion, self.age, self.gender
        )
    }
}

/// Analyzes photos with a configured detector and model handles.
///
/// Build one at startup, load the backends once, then call
/// [`analyze`](FaceProfiler::analyze) per user action. Model handles are
/// read-only after construction; `analyze` takes `&mut self`, so a profiler
/// never runs two analyses concurrently.
pub struct FaceProfiler {
    detector: Option<Box<dyn FaceDetector>>,
    emotion: Option<Box<dyn AttributeModel>>,
    age: Option<Box<dyn AttributeModel>>,
    gender: Option<Box<dyn AttributeModel>>,
    state: AnalysisState,
}

impl Default for FaceProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceProfiler {
    /// Create a profiler with no detector and no model handles.
    pub fn new() -> Self {
        Self {
            detector: None,
            emotion: None,
            age: None,
            gender: None,
            state: AnalysisState::Idle,
        }
    }

    /// Provide the face detection backend. Required before analyzing.
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Provide the emotion model handle (7-class output, 64×64 input).
    pub fn emotion_model(mut self, model: Box<dyn AttributeModel>) -> Self {
        self.emotion = Some(model);
        self
    }

    /// Provide the age model handle (scalar output, 200×200 input).
    pub fn age_model(mut self, model: Box<dyn AttributeModel>) -> Self {
        self.age = Some(model);
        self
    }

    /// Provide the gender model handle (2-class output, 128×128 input).
    pub fn gender_model(mut self, model: Box<dyn AttributeModel>) -> Self {
        self.gender = Some(model);
        self
    }

    /// Load the built-in SeetaFace detector from a model file.
    ///
    /// Unlike the attribute models, a profiler cannot work without a
    /// detector, so a load failure here is a hard error.
    #[cfg(feature = "rustface")]
    pub fn rustface_detector<P: AsRef<std::path::Path>>(
        self,
        path: P,
    ) -> Result<Self, FaceProfileError> {
        Ok(self.face_detector(Box::new(RustfaceDetector::from_file(path)?)))
    }

    /// Load the three ONNX attribute models from files.
    ///
    /// A model that fails to load is logged and left unset; the matching
    /// attribute degrades to its sentinel (`"Unknown"` / `-1`) instead of
    /// failing the application.
    #[cfg(feature = "ort")]
    pub fn ort_models<P: AsRef<std::path::Path>>(
        mut self,
        emotion_path: P,
        age_path: P,
        gender_path: P,
    ) -> Self {
        let load = |path: P, kind: ModelKind| -> Option<Box<dyn AttributeModel>> {
            match OrtModel::from_file(path, kind) {
                Ok(model) => Some(Box::new(model)),
                Err(e) => {
                    log::warn!("{} model unavailable: {e}", kind.as_str());
                    None
                }
            }
        };
        self.emotion = load(emotion_path, ModelKind::Emotion);
        self.age = load(age_path, ModelKind::Age);
        self.gender = load(gender_path, ModelKind::Gender);
        self
    }

    /// Current analysis state; `Done` or `NoFaceFound` after a completed
    /// run, `Idle` after a failed one.
    pub fn state(&self) -> AnalysisState {
        self.state
    }

    /// Analyze a photo from raw encoded bytes (JPEG, PNG, or WebP).
    pub fn analyze(&mut self, input: &[u8]) -> Result<Analysis, FaceProfileError> {
        let image = image::load_from_memory(input).map_err(|e| {
            let err = FaceProfileError::DecodeError(e.to_string());
            log::error!("{err}");
            self.state = AnalysisState::Idle;
            err
        })?;
        self.analyze_image(&image)
    }

    /// Analyze an already-decoded image.
    pub fn analyze_image(
        &mut self,
        image: &DynamicImage,
    ) -> Result<Analysis, FaceProfileError> {
        if image.width() == 0 || image.height() == 0 {
            self.state = AnalysisState::Idle;
            return Err(FaceProfileError::ZeroDimensions);
        }
        self.state = AnalysisState::ImageSelected;

        let Some(detector) = self.detector.as_deref() else {
            self.state = AnalysisState::Idle;
            return Err(FaceProfileError::NoDetector);
        };
        analyzer::run_analysis(
            detector,
            self.emotion.as_deref(),
            self.age.as_deref(),
            self.gender.as_deref(),
            image,
            &mut self.state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_without_detector_is_an_error() {
        let image = DynamicImage::new_rgb8(64, 64);
        let mut profiler = FaceProfiler::new();
        let result = profiler.analyze_image(&image);
        assert!(matches!(result, Err(FaceProfileError::NoDetector)));
        assert_eq!(profiler.state(), AnalysisState::Idle);
    }

    #[test]
    fn analyze_rejects_garbage_bytes() {
        let mut profiler = FaceProfiler::new();
        let result = profiler.analyze(b"not an image");
        assert!(matches!(result, Err(FaceProfileError::DecodeError(_))));
        assert_eq!(profiler.state(), AnalysisState::Idle);
    }

    #[test]
    fn summary_renders_the_text_block() {
        let profile = FaceProfile {
            emotion: "Happy".to_string(),
            age: 31,
            gender: "Female".to_string(),
            face: CropRegion {
                x: 0,
                y: 0,
                width: 10,
                height: 10,
            },
        };
        assert_eq!(profile.summary(), "Emotion: Happy\nAge: 31\nGender: Female");
    }

    #[test]
    fn sentinel_profile_summary() {
        let profile = FaceProfile {
            emotion: "Unknown".to_string(),
            age: -1,
            gender: "Unknown".to_string(),
            face: CropRegion {
                x: 0,
                y: 0,
                width: 1,
                height: 1,
            },
        };
        assert_eq!(
            profile.summary(),
            "Emotion: Unknown\nAge: -1\nGender: Unknown"
        );
    }
}
