//! Phishing URL Detector Library
//!
//! Classifies URLs as phishing or legitimate: lexical and page-content
//! features are assembled into a fixed-order vector, standardized with
//! training-time scaler parameters, and scored by a pre-trained ensemble
//! served through ONNX Runtime.

pub mod config;
pub mod features;
pub mod fetch;
pub mod metrics;
pub mod models;
pub mod predictor;
pub mod types;

pub use config::AppConfig;
pub use features::{Feature, FeatureBag};
pub use fetch::{FetchError, PageFetcher};
pub use models::{Classifier, Scaler};
pub use predictor::Predictor;
pub use types::{Prediction, PredictionResponse};
