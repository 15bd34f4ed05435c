//! Decoding of raw model outputs into human-readable values.
//!
//! All functions here are pure: deterministic, no side effects. Sentinel
//! handling for models that failed to load lives in the analyzer, not here.

use crate::error::FaceProfileError;

/// Emotion class labels, in the fixed output order of the emotion model.
pub const EMOTION_LABELS: [&str; 7] = [
    "Happy",
    "Sad",
    "Angry",
    "Surprised",
    "Neutral",
    "Disgust",
    "Fear",
];

/// Gender class labels: index 0 → Male, index 1 → Female.
pub const GENDER_LABELS: [&str; 2] = ["Male", "Female"];

/// Denormalization constant for the age regression output.
pub const AGE_SCALE: f32 = 116.0;

/// Sentinel label reported when a classification model is unavailable.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Sentinel age reported when the age model is unavailable.
pub const AGE_UNKNOWN: i32 = -1;

/// Index of the largest element; ties break toward the lowest index.
///
/// An all-equal vector yields 0. Empty input yields 0 as well, though the
/// decoders below reject wrong-length vectors before reaching here.
pub fn arg_max(values: &[f32]) -> usize {
    let mut idx = 0;
    let mut max = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > max {
            max = v;
            idx = i;
        }
    }
    idx
}

/// Decode a length-7 emotion probability vector into its label.
pub fn decode_emotion(scores: &[f32]) -> Result<&'static str, FaceProfileError> {
    if scores.len() != EMOTION_LABELS.len() {
        return Err(FaceProfileError::OutputShapeMismatch {
            expected: EMOTION_LABELS.len(),
            actual: scores.len(),
        });
    }
    Ok(EMOTION_LABELS[arg_max(scores)])
}

/// Decode a length-2 `[male, female]` score vector into its label.
pub fn decode_gender(scores: &[f32]) -> Result<&'static str, FaceProfileError> {
    if scores.len() != GENDER_LABELS.len() {
        return Err(FaceProfileError::OutputShapeMismatch {
            expected: GENDER_LABELS.len(),
            actual: scores.len(),
        });
    }
    Ok(GENDER_LABELS[arg_max(scores)])
}

/// Rescale the normalized age regression output to years.
///
/// Deliberately unclamped: a raw value outside the nominal `[0,1]` range
/// produces an age outside `[0,116]`, matching the original behavior.
pub fn decode_age(raw: f32) -> i32 {
    (raw * AGE_SCALE).round() as i32
}
