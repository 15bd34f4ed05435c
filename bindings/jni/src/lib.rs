uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FaceProfileError {
    #[error("failed to decode image: {message}")]
    DecodeError { message: String },
    #[error("image dimensions are zero")]
    ZeroDimensions,
    #[error("no face detector configured")]
    NoDetector,
    #[error("face detection failed: {message}")]
    DetectionFailed { message: String },
    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: String, reason: String },
    #[error("inference failed: {message}")]
    InferenceFailed { message: String },
    #[error("model output length {actual} does not match expected {expected}")]
    OutputShapeMismatch { expected: u64, actual: u64 },
}

impl From<faceprofile::FaceProfileError> for FaceProfileError {
    fn from(e: faceprofile::FaceProfileError) -> Self {
        use faceprofile::FaceProfileError as Core;
        match e {
            Core::DecodeError(message) => FaceProfileError::DecodeError { message },
            Core::ZeroDimensions => FaceProfileError::ZeroDimensions,
            Core::NoDetector => FaceProfileError::NoDetector,
            Core::DetectionFailed(message) => FaceProfileError::DetectionFailed { message },
            Core::ModelLoad { path, reason } => FaceProfileError::ModelLoad { path, reason },
            Core::InferenceFailed(message) => FaceProfileError::InferenceFailed { message },
            Core::OutputShapeMismatch { expected, actual } => {
                FaceProfileError::OutputShapeMismatch {
                    expected: expected as u64,
                    actual: actual as u64,
                }
            }
        }
    }
}

/// Clamped face region in source image coordinates.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Outcome of one analysis, mirrored for the FFI surface.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum AnalysisOutcome {
    NoFace,
    Profile {
        emotion: String,
        age: i32,
        gender: String,
        face: FaceRegion,
    },
}

fn convert_analysis(analysis: faceprofile::Analysis) -> AnalysisOutcome {
    match analysis {
        faceprofile::Analysis::NoFace => AnalysisOutcome::NoFace,
        faceprofile::Analysis::Profile(profile) => AnalysisOutcome::Profile {
            emotion: profile.emotion,
            age: profile.age,
            gender: profile.gender,
            face: FaceRegion {
                x: profile.face.x,
                y: profile.face.y,
                width: profile.face.width,
                height: profile.face.height,
            },
        },
    }
}

/// Render the user-visible text for an outcome, matching what the original
/// screen shows: the three-line summary, or the no-face notification.
#[uniffi::export]
pub fn outcome_text(outcome: AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::NoFace => "No face detected".to_string(),
        AnalysisOutcome::Profile {
            emotion,
            age,
            gender,
            ..
        } => format!("Emotion: {emotion}\nAge: {age}\nGender: {gender}"),
    }
}

/// A profiler constructed once at app startup and reused per photo pick.
///
/// The mutex serializes analyses: the host may call `analyze` from any
/// thread, but only one runs at a time.
#[derive(uniffi::Object)]
pub struct PhotoProfiler {
    inner: Mutex<faceprofile::FaceProfiler>,
}

#[uniffi::export]
impl PhotoProfiler {
    /// Load the detector and the three attribute models from resolved file
    /// paths. The detector is required; attribute models that fail to load
    /// degrade that attribute to its sentinel ("Unknown" / -1).
    #[uniffi::constructor]
    pub fn new(
        detector_model: String,
        emotion_model: String,
        age_model: String,
        gender_model: String,
    ) -> Result<Arc<Self>, FaceProfileError> {
        let profiler = faceprofile::FaceProfiler::new()
            .rustface_detector(&detector_model)?
            .ort_models(&emotion_model, &age_model, &gender_model);
        Ok(Arc::new(Self {
            inner: Mutex::new(profiler),
        }))
    }

    /// Analyze a photo from raw encoded bytes (JPEG, PNG, or WebP).
    pub fn analyze(&self, input: Vec<u8>) -> Result<AnalysisOutcome, FaceProfileError> {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let analysis = inner.analyze(&input)?;
        Ok(convert_analysis(analysis))
    }
}
