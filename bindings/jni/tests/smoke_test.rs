use faceprofile_jni::*;

#[test]
fn constructor_fails_without_detector_model() {
    let result = PhotoProfiler::new(
        "does/not/exist/seeta.bin".to_string(),
        "does/not/exist/emotion.onnx".to_string(),
        "does/not/exist/age.onnx".to_string(),
        "does/not/exist/gender.onnx".to_string(),
    );
    assert!(matches!(result, Err(FaceProfileError::ModelLoad { .. })));
}

#[test]
fn outcome_text_for_no_face() {
    assert_eq!(outcome_text(AnalysisOutcome::NoFace), "No face detected");
}

#[test]
fn outcome_text_for_profile() {
    let outcome = AnalysisOutcome::Profile {
        emotion: "Neutral".to_string(),
        age: 42,
        gender: "Male".to_string(),
        face: FaceRegion {
            x: 10,
            y: 20,
            width: 100,
            height: 100,
        },
    };
    assert_eq!(
        outcome_text(outcome),
        "Emotion: Neutral\nAge: 42\nGender: Male"
    );
}

#[test]
fn error_messages_are_descriptive() {
    let err = FaceProfileError::ModelLoad {
        path: "emotion_model.onnx".to_string(),
        reason: "file not found".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "failed to load model from emotion_model.onnx: file not found"
    );
}

#[test]
fn output_shape_error_keeps_both_lengths() {
    let err: FaceProfileError = faceprofile::FaceProfileError::OutputShapeMismatch {
        expected: 7,
        actual: 2,
    }
    .into();
    assert!(matches!(
        err,
        FaceProfileError::OutputShapeMismatch {
            expected: 7,
            actual: 2
        }
    ));
    assert_eq!(
        err.to_string(),
        "model output length 2 does not match expected 7"
    );
}
