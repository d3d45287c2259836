//! Model artifacts: the ONNX ensemble classifier and the fitted scaler.

pub mod classifier;
pub mod loader;
pub mod scaler;

pub use classifier::{Classifier, Verdict};
pub use loader::ModelLoader;
pub use scaler::Scaler;
