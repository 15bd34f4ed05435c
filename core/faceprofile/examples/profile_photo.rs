//! Profile a photo from the command line.
//!
//! Usage:
//!   cargo run --example profile_photo --features "rustface ort" -- photo.jpg [model_dir]
//!
//! `model_dir` defaults to `models/` and must contain
//! `seeta_fd_frontal_v1.0.bin`, `emotion_model.onnx`, `age_model.onnx`,
//! and `gender_model.onnx`. Attribute models that are missing simply
//! degrade to "Unknown"/-1.

use faceprofile::{Analysis, FaceProfiler};

fn main() -> Result<(), faceprofile::FaceProfileError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let photo_path = args.next().unwrap_or_else(|| "photo.jpg".to_string());
    let model_dir = args.next().unwrap_or_else(|| "models".to_string());

    let photo = std::fs::read(&photo_path)
        .unwrap_or_else(|e| panic!("failed to read {photo_path}: {e}"));

    let mut profiler = FaceProfiler::new()
        .rustface_detector(format!("{model_dir}/seeta_fd_frontal_v1.0.bin"))?
        .ort_models(
            format!("{model_dir}/emotion_model.onnx"),
            format!("{model_dir}/age_model.onnx"),
            format!("{model_dir}/gender_model.onnx"),
        );

    match profiler.analyze(&photo)? {
        Analysis::NoFace => println!("No face detected"),
        Analysis::Profile(profile) => {
            println!(
                "face at ({}, {}) {}x{}",
                profile.face.x, profile.face.y, profile.face.width, profile.face.height
            );
            println!("{}", profile.summary());
        }
    }

    Ok(())
}
