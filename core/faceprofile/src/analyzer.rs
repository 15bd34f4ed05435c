//! The analysis pipeline: detect → crop → (encode → infer → decode) × 3.

use std::panic;
use std::sync::mpsc;
use std::thread;

use image::DynamicImage;

use crate::crop::crop_face;
use crate::decode::{
    decode_age, decode_emotion, decode_gender, AGE_UNKNOWN, UNKNOWN_LABEL,
};
use crate::encode::encode_face;
use crate::error::FaceProfileError;
use crate::face_detector::{FaceBox, FaceDetector};
use crate::inference::{AttributeModel, ModelKind};
use crate::{Analysis, FaceProfile};

/// Progress of a single analysis, mirroring the user-visible flow.
///
/// A run walks `Idle → ImageSelected → FaceDetecting`, then either
/// `NoFaceFound` or `FaceFound → Analyzing → Done`. Any failure returns the
/// profiler to `Idle`; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisState {
    /// No analysis in progress.
    Idle,
    /// An image was decoded successfully.
    ImageSelected,
    /// The detection task has been dispatched.
    FaceDetecting,
    /// The detector returned at least one box.
    FaceFound,
    /// The detector returned no boxes; the run ends here.
    NoFaceFound,
    /// The three attribute pipelines are running.
    Analyzing,
    /// A profile was produced.
    Done,
}

fn advance(state: &mut AnalysisState, next: AnalysisState) {
    log::debug!("analysis state: {:?} -> {:?}", state, next);
    *state = next;
}

pub(crate) fn run_analysis(
    detector: &dyn FaceDetector,
    emotion: Option<&dyn AttributeModel>,
    age: Option<&dyn AttributeModel>,
    gender: Option<&dyn AttributeModel>,
    image: &DynamicImage,
    state: &mut AnalysisState,
) -> Result<Analysis, FaceProfileError> {
    let result = run_pipeline(detector, emotion, age, gender, image, state);
    if let Err(e) = &result {
        log::error!("analysis aborted: {e}");
        advance(state, AnalysisState::Idle);
    }
    result
}

fn run_pipeline(
    detector: &dyn FaceDetector,
    emotion: Option<&dyn AttributeModel>,
    age: Option<&dyn AttributeModel>,
    gender: Option<&dyn AttributeModel>,
    image: &DynamicImage,
    state: &mut AnalysisState,
) -> Result<Analysis, FaceProfileError> {
    advance(state, AnalysisState::FaceDetecting);
    let faces = detect_faces(detector, image)?;

    // First entry wins. The detector's native ordering is trusted as-is;
    // no confidence re-ranking.
    let Some(primary) = faces.first() else {
        log::info!("no face detected");
        advance(state, AnalysisState::NoFaceFound);
        return Ok(Analysis::NoFace);
    };
    advance(state, AnalysisState::FaceFound);

    let (face, region) = crop_face(image, primary);
    advance(state, AnalysisState::Analyzing);

    let profile = FaceProfile {
        emotion: classify_emotion(emotion, &face)?,
        age: predict_age(age, &face)?,
        gender: classify_gender(gender, &face)?,
        face: region,
    };

    advance(state, AnalysisState::Done);
    log::info!(
        "profile: emotion={} age={} gender={}",
        profile.emotion,
        profile.age,
        profile.gender
    );
    Ok(Analysis::Profile(profile))
}

/// Dispatch detection to a worker thread and wait for its message.
///
/// The original flow hands the result back through a completion callback;
/// here the handoff is an explicit channel between the detection task and
/// the orchestrator. A panicking backend is contained and reported as a
/// detection failure instead of tearing down the caller.
fn detect_faces(
    detector: &dyn FaceDetector,
    image: &DynamicImage,
) -> Result<Vec<FaceBox>, FaceProfileError> {
    let gray = image::imageops::grayscale(image);
    let (width, height) = gray.dimensions();
    let buffer = gray.as_raw().as_slice();

    let (tx, rx) = mpsc::channel();
    thread::scope(|scope| {
        scope.spawn(move || {
            let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                detector.detect(buffer, width, height)
            }));
            let _ = tx.send(outcome);
        });

        match rx.recv() {
            Ok(Ok(faces)) => Ok(faces),
            Ok(Err(_)) => Err(FaceProfileError::DetectionFailed(
                "detection backend panicked".to_string(),
            )),
            Err(_) => Err(FaceProfileError::DetectionFailed(
                "detection task exited without a result".to_string(),
            )),
        }
    })
}

fn classify_emotion(
    model: Option<&dyn AttributeModel>,
    face: &DynamicImage,
) -> Result<String, FaceProfileError> {
    let Some(model) = model else {
        log::debug!("emotion model unavailable, reporting sentinel");
        return Ok(UNKNOWN_LABEL.to_string());
    };
    let tensor = encode_face(face, ModelKind::Emotion.input_side());
    let scores = model.run(&tensor)?;
    Ok(decode_emotion(&scores)?.to_string())
}

fn predict_age(
    model: Option<&dyn AttributeModel>,
    face: &DynamicImage,
) -> Result<i32, FaceProfileError> {
    let Some(model) = model else {
        log::debug!("age model unavailable, reporting sentinel");
        return Ok(AGE_UNKNOWN);
    };
    let tensor = encode_face(face, ModelKind::Age.input_side());
    let output = model.run(&tensor)?;
    let [raw] = output.as_slice() else {
        return Err(FaceProfileError::OutputShapeMismatch {
            expected: 1,
            actual: output.len(),
        });
    };
    log::debug!("age model raw output = {raw}");
    Ok(decode_age(*raw))
}

fn classify_gender(
    model: Option<&dyn AttributeModel>,
    face: &DynamicImage,
) -> Result<String, FaceProfileError> {
    let Some(model) = model else {
        log::debug!("gender model unavailable, reporting sentinel");
        return Ok(UNKNOWN_LABEL.to_string());
    };
    let tensor = encode_face(face, ModelKind::Gender.input_side());
    let scores = model.run(&tensor)?;
    Ok(decode_gender(&scores)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::EncodedTensor;

    struct FixedDetector(Vec<FaceBox>);

    impl FaceDetector for FixedDetector {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBox> {
            self.0.clone()
        }
    }

    struct PanickingDetector;

    impl FaceDetector for PanickingDetector {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<FaceBox> {
            panic!("backend blew up");
        }
    }

    struct FixedModel(Vec<f32>);

    impl AttributeModel for FixedModel {
        fn run(&self, _input: &EncodedTensor) -> Result<Vec<f32>, FaceProfileError> {
            Ok(self.0.clone())
        }
    }

    fn test_image() -> DynamicImage {
        DynamicImage::new_rgb8(320, 240)
    }

    fn centered_box() -> FaceBox {
        FaceBox {
            left: 100,
            top: 60,
            right: 220,
            bottom: 180,
            confidence: 5.0,
        }
    }

    #[test]
    fn empty_detection_ends_in_no_face_found() {
        let detector = FixedDetector(vec![]);
        let mut state = AnalysisState::ImageSelected;
        let result =
            run_analysis(&detector, None, None, None, &test_image(), &mut state).unwrap();
        assert!(matches!(result, Analysis::NoFace));
        assert_eq!(state, AnalysisState::NoFaceFound);
    }

    #[test]
    fn successful_run_ends_in_done() {
        let detector = FixedDetector(vec![centered_box()]);
        let emotion = FixedModel(vec![0.0, 0.9, 0.0, 0.0, 0.1, 0.0, 0.0]);
        let age = FixedModel(vec![0.25]);
        let gender = FixedModel(vec![0.2, 0.8]);
        let mut state = AnalysisState::ImageSelected;

        let result = run_analysis(
            &detector,
            Some(&emotion),
            Some(&age),
            Some(&gender),
            &test_image(),
            &mut state,
        )
        .unwrap();

        assert_eq!(state, AnalysisState::Done);
        let Analysis::Profile(profile) = result else {
            panic!("expected a profile");
        };
        assert_eq!(profile.emotion, "Sad");
        assert_eq!(profile.age, 29);
        assert_eq!(profile.gender, "Female");
        assert_eq!(profile.face.width, 120);
        assert_eq!(profile.face.height, 120);
    }

    #[test]
    fn first_face_wins_over_higher_confidence_later_entries() {
        let small_first = FaceBox {
            left: 0,
            top: 0,
            right: 10,
            bottom: 10,
            confidence: 0.1,
        };
        let mut later = centered_box();
        later.confidence = 99.0;
        let detector = FixedDetector(vec![small_first, later]);
        let mut state = AnalysisState::ImageSelected;

        let result =
            run_analysis(&detector, None, None, None, &test_image(), &mut state).unwrap();
        let Analysis::Profile(profile) = result else {
            panic!("expected a profile");
        };
        assert_eq!(profile.face.width, 10);
        assert_eq!(profile.face.height, 10);
    }

    #[test]
    fn missing_models_report_sentinels() {
        let detector = FixedDetector(vec![centered_box()]);
        let mut state = AnalysisState::ImageSelected;
        let result =
            run_analysis(&detector, None, None, None, &test_image(), &mut state).unwrap();
        let Analysis::Profile(profile) = result else {
            panic!("expected a profile");
        };
        assert_eq!(profile.emotion, "Unknown");
        assert_eq!(profile.age, -1);
        assert_eq!(profile.gender, "Unknown");
    }

    #[test]
    fn panicking_detector_aborts_and_returns_to_idle() {
        let mut state = AnalysisState::ImageSelected;
        let result = run_analysis(
            &PanickingDetector,
            None,
            None,
            None,
            &test_image(),
            &mut state,
        );
        assert!(matches!(
            result,
            Err(FaceProfileError::DetectionFailed(_))
        ));
        assert_eq!(state, AnalysisState::Idle);
    }

    #[test]
    fn wrong_age_output_shape_is_an_error() {
        let detector = FixedDetector(vec![centered_box()]);
        let age = FixedModel(vec![0.1, 0.2]);
        let mut state = AnalysisState::ImageSelected;
        let result = run_analysis(
            &detector,
            None,
            Some(&age),
            None,
            &test_image(),
            &mut state,
        );
        assert!(matches!(
            result,
            Err(FaceProfileError::OutputShapeMismatch {
                expected: 1,
                actual: 2
            })
        ));
        assert_eq!(state, AnalysisState::Idle);
    }
}
