use crate::encode::EncodedTensor;
use crate::error::FaceProfileError;

/// Which attribute a model estimates.
///
/// Determines the square input resolution the tensor encoder must produce
/// and the output vector length the decoder expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// 7-class emotion classifier, 64×64 input.
    Emotion,
    /// Scalar age regressor, 200×200 input.
    Age,
    /// 2-class gender classifier, 128×128 input.
    Gender,
}

impl ModelKind {
    /// Square input resolution in pixels.
    pub fn input_side(self) -> u32 {
        match self {
            ModelKind::Emotion => 64,
            ModelKind::Age => 200,
            ModelKind::Gender => 128,
        }
    }

    /// Flattened output tensor length.
    pub fn output_len(self) -> usize {
        match self {
            ModelKind::Emotion => 7,
            ModelKind::Age => 1,
            ModelKind::Gender => 2,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ModelKind::Emotion => "emotion",
            ModelKind::Age => "age",
            ModelKind::Gender => "gender",
        }
    }
}

/// Pluggable inference backend for a single loaded model.
///
/// The contract mirrors the underlying runtime: a fixed-shape buffer in, a
/// flattened output buffer out, synchronously. Handles are created once at
/// startup and are read-only thereafter; the analyzer never runs two
/// inferences concurrently.
pub trait AttributeModel: Send + Sync {
    /// Run the model on an encoded face tensor.
    ///
    /// The tensor's shape must match the model's expected input or the call
    /// fails with [`FaceProfileError::InferenceFailed`].
    fn run(&self, input: &EncodedTensor) -> Result<Vec<f32>, FaceProfileError>;
}
