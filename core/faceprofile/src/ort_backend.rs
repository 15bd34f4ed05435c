use std::path::Path;

use ndarray::Array4;
use ort::{Session, Value};

use crate::encode::EncodedTensor;
use crate::error::FaceProfileError;
use crate::inference::{AttributeModel, ModelKind};

/// Attribute model backed by an ONNX Runtime session.
///
/// The bundled models are channels-last (NHWC) conversions, so the encoded
/// `[0,1]` float buffer maps directly onto a `[1, side, side, 3]` input
/// tensor without any permutation.
pub struct OrtModel {
    session: Session,
    input_name: String,
    kind: ModelKind,
}

impl OrtModel {
    /// Load an ONNX model file for the given attribute.
    pub fn from_file<P: AsRef<Path>>(path: P, kind: ModelKind) -> Result<Self, FaceProfileError> {
        let path = path.as_ref();
        let load_err = |e: ort::Error| FaceProfileError::ModelLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let session = Session::builder()
            .map_err(load_err)?
            .commit_from_file(path)
            .map_err(load_err)?;

        let input_name = match session.inputs.first() {
            Some(input) => input.name.clone(),
            None => {
                return Err(FaceProfileError::ModelLoad {
                    path: path.display().to_string(),
                    reason: "model declares no inputs".to_string(),
                })
            }
        };

        log::debug!(
            "loaded {} model from {} (input '{}')",
            kind.as_str(),
            path.display(),
            input_name
        );

        Ok(Self {
            session,
            input_name,
            kind,
        })
    }
}

impl AttributeModel for OrtModel {
    fn run(&self, input: &EncodedTensor) -> Result<Vec<f32>, FaceProfileError> {
        let infer_err = |e: ort::Error| FaceProfileError::InferenceFailed(e.to_string());

        if input.side() != self.kind.input_side() {
            return Err(FaceProfileError::InferenceFailed(format!(
                "{} model expects {}×{} input, got {}×{}",
                self.kind.as_str(),
                self.kind.input_side(),
                self.kind.input_side(),
                input.side(),
                input.side()
            )));
        }

        let side = input.side() as usize;
        let tensor = Array4::from_shape_vec((1, side, side, 3), input.data().to_vec())
            .map_err(|e| FaceProfileError::InferenceFailed(e.to_string()))?;
        let value = Value::from_array(tensor).map_err(infer_err)?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => value].map_err(infer_err)?)
            .map_err(infer_err)?;

        let output = outputs[0].try_extract_tensor::<f32>().map_err(infer_err)?;
        Ok(output.view().iter().copied().collect())
    }
}
