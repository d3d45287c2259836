//! Standardization transform fitted offline.
//!
//! The training pipeline fits a `StandardScaler` and exports its parameters
//! to JSON (`feature_names`, `mean`, `var`). Scaling at inference must use
//! those exact parameters in the exact manifest order, or every prediction
//! is silently corrupted; the loader therefore validates both the vector
//! length and the persisted name order against the manifest and refuses to
//! start on any mismatch.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::features::Feature;

/// On-disk form of the fitted scaler parameters.
#[derive(Debug, Deserialize)]
struct ScalerFile {
    feature_names: Vec<String>,
    mean: Vec<f64>,
    var: Vec<f64>,
}

/// Per-feature standardization: `(x - mean) / sqrt(var)`.
#[derive(Debug)]
pub struct Scaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Scaler {
    /// Load and validate persisted parameters. Absence or any shape/order
    /// skew against the feature manifest is fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler parameters from {}", path.display()))?;
        let file: ScalerFile = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scaler parameters from {}", path.display()))?;

        let manifest = Feature::manifest();
        if file.feature_names.len() != manifest.len() {
            bail!(
                "Scaler artifact carries {} features, manifest expects {}; \
                 the artifact was fit against a different manifest version",
                file.feature_names.len(),
                manifest.len()
            );
        }
        for (position, (persisted, expected)) in
            file.feature_names.iter().zip(manifest.iter()).enumerate()
        {
            if persisted != expected {
                bail!(
                    "Scaler feature order mismatch at position {position}: \
                     artifact has {persisted:?}, manifest expects {expected:?}"
                );
            }
        }

        let scaler = Self::from_params(file.mean, file.var)?;
        info!(path = %path.display(), features = manifest.len(), "Scaler parameters loaded");
        Ok(scaler)
    }

    /// Build a scaler from already-validated mean/variance vectors.
    pub fn from_params(mean: Vec<f64>, var: Vec<f64>) -> Result<Self> {
        if mean.len() != Feature::COUNT || var.len() != Feature::COUNT {
            bail!(
                "Scaler parameter length mismatch: mean={}, var={}, expected {}",
                mean.len(),
                var.len(),
                Feature::COUNT
            );
        }

        // sklearn maps zero variance to unit scale instead of dividing by 0.
        let scale = var
            .iter()
            .map(|&v| {
                let s = v.sqrt();
                if s == 0.0 {
                    1.0
                } else {
                    s
                }
            })
            .collect();

        Ok(Self { mean, scale })
    }

    /// Standardize a manifest-ordered vector. The length check guards
    /// against artifact/version skew and is never coerced away.
    pub fn transform(&self, vector: &[f64]) -> Result<Vec<f32>> {
        if vector.len() != self.mean.len() {
            bail!(
                "Feature vector length {} does not match scaler dimension {}",
                vector.len(),
                self.mean.len()
            );
        }

        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| ((x - mean) / scale) as f32)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler() -> Scaler {
        Scaler::from_params(vec![0.0; Feature::COUNT], vec![1.0; Feature::COUNT]).unwrap()
    }

    #[test]
    fn test_scaling_all_means_yields_zeros() {
        let mean: Vec<f64> = (0..Feature::COUNT).map(|i| i as f64 * 1.5).collect();
        let var: Vec<f64> = (0..Feature::COUNT).map(|i| (i + 1) as f64).collect();
        let scaler = Scaler::from_params(mean.clone(), var).unwrap();

        let scaled = scaler.transform(&mean).unwrap();
        assert!(scaled.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_standardization_formula() {
        let mut mean = vec![0.0; Feature::COUNT];
        let mut var = vec![1.0; Feature::COUNT];
        mean[0] = 10.0;
        var[0] = 4.0;
        let scaler = Scaler::from_params(mean, var).unwrap();

        let mut vector = vec![0.0; Feature::COUNT];
        vector[0] = 16.0;
        let scaled = scaler.transform(&vector).unwrap();
        // (16 - 10) / sqrt(4) = 3
        assert_eq!(scaled[0], 3.0);
    }

    #[test]
    fn test_zero_variance_uses_unit_scale() {
        let mut var = vec![1.0; Feature::COUNT];
        var[3] = 0.0;
        let scaler = Scaler::from_params(vec![0.0; Feature::COUNT], var).unwrap();

        let mut vector = vec![0.0; Feature::COUNT];
        vector[3] = 7.0;
        let scaled = scaler.transform(&vector).unwrap();
        assert_eq!(scaled[3], 7.0);
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let scaler = identity_scaler();
        assert!(scaler.transform(&vec![0.0; Feature::COUNT - 1]).is_err());
        assert!(scaler.transform(&vec![0.0; Feature::COUNT + 1]).is_err());
    }

    #[test]
    fn test_parameter_length_mismatch_is_rejected() {
        assert!(Scaler::from_params(vec![0.0; 3], vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_name_order_skew_is_rejected() {
        let mut names: Vec<String> = Feature::manifest().iter().map(|s| s.to_string()).collect();
        names.swap(0, 1);
        let file = serde_json::json!({
            "feature_names": names,
            "mean": vec![0.0; Feature::COUNT],
            "var": vec![1.0; Feature::COUNT],
        });

        let dir = std::env::temp_dir().join("phishing-detector-scaler-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("skewed.json");
        std::fs::write(&path, file.to_string()).unwrap();

        let err = Scaler::load(&path).expect_err("skewed order must fail");
        assert!(err.to_string().contains("order mismatch"));
    }
}
