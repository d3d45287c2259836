//! Type definitions for the phishing detection pipeline

pub mod prediction;

pub use prediction::{Prediction, PredictionResponse};
