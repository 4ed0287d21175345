use candle_core::Tensor;
use rand::Rng;

use crate::error::ClassifyError;
use crate::registry::ModelHandle;
use crate::types::ProduceType;

/// Produce a probability distribution over the ripeness classes of
/// `produce_type` from a preprocessed input tensor.
///
/// The mock path synthesizes a confident-looking distribution; the real
/// path trusts the model's own softmax output but verifies its length
/// against the class table.
#[cfg_attr(not(feature = "real-models"), allow(unused_variables))]
pub fn predict(
    handle: &ModelHandle,
    input: &Tensor,
    produce_type: ProduceType,
) -> Result<Vec<f32>, ClassifyError> {
    let num_classes = produce_type.class_table().len();

    match handle {
        #[cfg(feature = "real-models")]
        ModelHandle::Real(model) => {
            let probs = model.predict(input)?;
            if probs.len() != num_classes {
                return Err(ClassifyError::Configuration {
                    produce_type: produce_type.as_str(),
                    expected: num_classes,
                    actual: probs.len(),
                });
            }
            Ok(probs)
        }
        ModelHandle::Mock => Ok(mock_probabilities(num_classes)),
    }
}

/// Synthesize a plausible prediction: one dominant class in [0.70, 0.95]
/// at a random index, the rest uniform draws rescaled to the remaining
/// mass so the vector sums to exactly 1.0.
fn mock_probabilities(num_classes: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();

    let dominant_idx = rng.gen_range(0..num_classes);
    let dominant: f32 = rng.gen_range(0.70..=0.95);

    let rest: Vec<f32> = (0..num_classes - 1)
        .map(|_| rng.gen_range(0.0..1.0f32))
        .collect();
    let rest_sum: f32 = rest.iter().sum();
    let remaining = 1.0 - dominant;

    let mut probs = Vec::with_capacity(num_classes);
    let mut rest_iter = rest.into_iter();
    for idx in 0..num_classes {
        if idx == dominant_idx {
            probs.push(dominant);
        } else if rest_sum > 0.0 {
            probs.push(rest_iter.next().unwrap_or(0.0) / rest_sum * remaining);
        } else {
            probs.push(remaining / (num_classes - 1).max(1) as f32);
        }
    }
    probs
}
