//! Prediction result data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one pipeline run over a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// The URL as submitted
    pub url: String,

    /// Classifier verdict
    pub is_phishing: bool,

    /// Maximum class probability (0.0 - 1.0)
    pub confidence: f64,

    /// Whether the page body was fetched and content features computed
    pub content_analyzed: bool,

    /// Prediction timestamp
    pub checked_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(url: String, is_phishing: bool, confidence: f64, content_analyzed: bool) -> Self {
        Self {
            url,
            is_phishing,
            confidence,
            content_analyzed,
            checked_at: Utc::now(),
        }
    }
}

/// Boundary record handed to the caller, one per submitted URL. Serializes
/// with a `status` discriminant so a failed prediction never masquerades as
/// a verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PredictionResponse {
    Success {
        url: String,
        is_phishing: bool,
        confidence: f64,
    },
    Error {
        url: String,
        error: String,
    },
}

impl PredictionResponse {
    pub fn success(prediction: &Prediction) -> Self {
        Self::Success {
            url: prediction.url.clone(),
            is_phishing: prediction.is_phishing,
            confidence: prediction.confidence,
        }
    }

    pub fn error(url: &str, error: impl std::fmt::Display) -> Self {
        Self::Error {
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let prediction = Prediction::new("https://example.com".into(), true, 0.93, true);
        let json = serde_json::to_value(PredictionResponse::success(&prediction)).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["is_phishing"], true);
        assert!((json["confidence"].as_f64().unwrap() - 0.93).abs() < 1e-12);
    }

    #[test]
    fn test_error_response_shape() {
        let json =
            serde_json::to_value(PredictionResponse::error("bad://", "model unavailable")).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["url"], "bad://");
        assert_eq!(json["error"], "model unavailable");
        assert!(json.get("is_phishing").is_none());
    }

    #[test]
    fn test_response_round_trip() {
        let response = PredictionResponse::Success {
            url: "http://x.test".into(),
            is_phishing: false,
            confidence: 0.61,
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: PredictionResponse = serde_json::from_str(&json).unwrap();
        match back {
            PredictionResponse::Success { confidence, .. } => assert_eq!(confidence, 0.61),
            PredictionResponse::Error { .. } => panic!("wrong variant"),
        }
    }
}
