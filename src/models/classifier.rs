//! Ensemble classifier inference via ONNX Runtime.
//!
//! The artifact is a RandomForest exported from the offline trainer; the
//! per-tree probability averaging happens inside the exported graph, so this
//! wrapper only extracts the two class probabilities and turns them into a
//! verdict. Output handling covers both plain tensors and the
//! `seq(map(int64, float))` layout sklearn-onnx emits with ZipMap enabled.

use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType};
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

use crate::models::loader::{LoadedModel, ModelLoader};

/// Classifier output for a single vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub is_phishing: bool,
    /// Maximum class probability, in [0, 1].
    pub confidence: f64,
    /// [legitimate, phishing] probabilities.
    pub class_probabilities: [f64; 2],
}

impl Verdict {
    /// Argmax over the class probabilities, first class winning ties, which
    /// is how the trainer's `predict` resolves them.
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        Self {
            is_phishing: probabilities[1] > probabilities[0],
            confidence: probabilities[0].max(probabilities[1]),
            class_probabilities: probabilities,
        }
    }
}

/// Pre-trained ensemble, loaded once and read-only afterwards. The lock only
/// exists because `Session::run` needs exclusive access; no state mutates
/// across predictions.
pub struct Classifier {
    model: RwLock<LoadedModel>,
}

impl Classifier {
    /// Load the classifier artifact. Failure here must abort startup.
    pub fn load<P: AsRef<Path>>(path: P, onnx_threads: usize) -> Result<Self> {
        let loader = ModelLoader::with_threads(onnx_threads)?;
        let model = loader.load_model(path)?;
        Ok(Self {
            model: RwLock::new(model),
        })
    }

    /// Run inference on a scaled, manifest-ordered feature vector.
    pub fn predict(&self, features: &[f32]) -> Result<Verdict> {
        let probabilities = self.class_probabilities(features)?;
        Ok(Verdict::from_probabilities(probabilities))
    }

    fn class_probabilities(&self, features: &[f32]) -> Result<[f64; 2]> {
        use ort::value::Tensor;

        // Input tensor shape [1, num_features].
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;
        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let outputs = model.session.run(ort::inputs![&input_name => input_tensor])?;

        Self::extract_probabilities(&outputs, &output_name)
    }

    /// Pull [p0, p1] out of the session outputs, trying the tensor layout
    /// first and the sklearn-onnx seq(map) layout second.
    fn extract_probabilities(
        outputs: &ort::session::SessionOutputs,
        output_name: &str,
    ) -> Result<[f64; 2]> {
        if let Some(output) = outputs.get(output_name) {
            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                return Ok(Self::probabilities_from_tensor(&shape, data));
            }

            if DynSequenceValueType::can_downcast(&output.dtype()) {
                if let Ok(probs) = Self::probabilities_from_sequence_map(output) {
                    return Ok(probs);
                }
            }
        }

        // Fallback: scan every output, skipping the label tensor.
        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }

            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                debug!(output = %name, "Extracted probabilities from fallback tensor");
                return Ok(Self::probabilities_from_tensor(&shape, data));
            }

            if DynSequenceValueType::can_downcast(&output.dtype()) {
                if let Ok(probs) = Self::probabilities_from_sequence_map(&output) {
                    return Ok(probs);
                }
            }
        }

        // A label-only or otherwise unrecognized output set means the
        // artifact does not match this wrapper: that is version skew, and it
        // must surface as an error, never as a neutral verdict.
        Err(Self::unsupported_output_layout(output_name))
    }

    fn unsupported_output_layout(output_name: &str) -> anyhow::Error {
        anyhow::anyhow!(
            "Classifier output {output_name:?} has no extractable class probabilities; \
             the artifact's output layout matches neither a float tensor nor seq(map)"
        )
    }

    /// Probabilities from a `[1, n_classes]` (or flattened) tensor.
    fn probabilities_from_tensor(shape: &ort::tensor::Shape, data: &[f32]) -> [f64; 2] {
        let dims: Vec<i64> = shape.iter().copied().collect();
        let classes = match dims.len() {
            2 => dims[1] as usize,
            1 => dims[0] as usize,
            _ => 0,
        };

        if classes >= 2 && data.len() >= 2 {
            [data[0] as f64, data[1] as f64]
        } else if let Some(&p1) = data.last() {
            // Single-probability output carries the positive class.
            [1.0 - p1 as f64, p1 as f64]
        } else {
            [0.5, 0.5]
        }
    }

    /// Probabilities from `seq(map(int64, float))` (sklearn-onnx ZipMap).
    fn probabilities_from_sequence_map(output: &ort::value::DynValue) -> Result<[f64; 2]> {
        let allocator = Allocator::default();

        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;

        let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
        let map_value = maps
            .first()
            .ok_or_else(|| anyhow::anyhow!("Empty probability sequence"))?;

        let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

        let mut probabilities = [f64::NAN, f64::NAN];
        for (class_id, prob) in &kv_pairs {
            match class_id {
                0 => probabilities[0] = *prob as f64,
                1 => probabilities[1] = *prob as f64,
                _ => {}
            }
        }

        match (probabilities[0].is_nan(), probabilities[1].is_nan()) {
            (false, false) => Ok(probabilities),
            (false, true) => Ok([probabilities[0], 1.0 - probabilities[0]]),
            (true, false) => Ok([1.0 - probabilities[1], probabilities[1]]),
            (true, true) => Err(anyhow::anyhow!("No class probabilities in map")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_probabilities() {
        let phishing = Verdict::from_probabilities([0.2, 0.8]);
        assert!(phishing.is_phishing);
        assert_eq!(phishing.confidence, 0.8);

        let legitimate = Verdict::from_probabilities([0.9, 0.1]);
        assert!(!legitimate.is_phishing);
        assert_eq!(legitimate.confidence, 0.9);
    }

    #[test]
    fn test_unrecognized_output_layout_is_an_error() {
        // An artifact emitting only an int64 label tensor reaches this path:
        // no float tensor extracts, nothing downcasts to a sequence, and the
        // label output is skipped by name. The result must be an error the
        // boundary reports as status="error", not a fabricated verdict.
        let err = Classifier::unsupported_output_layout("output_label");
        let message = err.to_string();
        assert!(message.contains("output_label"));
        assert!(message.contains("no extractable class probabilities"));
    }

    #[test]
    fn test_verdict_tie_resolves_to_legitimate() {
        // Argmax picks the first class on a tie, same as the trainer.
        let tie = Verdict::from_probabilities([0.5, 0.5]);
        assert!(!tie.is_phishing);
        assert_eq!(tie.confidence, 0.5);
    }
}
