//! End-to-end prediction pipeline.
//!
//! A `Predictor` is the single context object holding everything loaded at
//! startup: scaler parameters, the ONNX classifier, and the HTTP client.
//! It is immutable after construction, so concurrent predictions can share
//! one instance behind an `Arc` with no further synchronization.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::features;
use crate::fetch::PageFetcher;
use crate::models::{Classifier, Scaler};
use crate::types::Prediction;

pub struct Predictor {
    scaler: Scaler,
    classifier: Classifier,
    fetcher: PageFetcher,
}

impl Predictor {
    /// Load all startup artifacts. Any failure here means the process must
    /// not serve predictions.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let scaler =
            Scaler::load(&config.artifacts.scaler_path).context("Scaler artifact unavailable")?;
        let classifier = Classifier::load(
            &config.artifacts.classifier_path,
            config.artifacts.onnx_threads,
        )
        .context("Classifier artifact unavailable")?;
        let fetcher = PageFetcher::new(&config.fetcher)?;

        info!("Predictor initialized");
        Ok(Self {
            scaler,
            classifier,
            fetcher,
        })
    }

    /// Classify a URL: fetch its page best-effort, extract features, scale,
    /// and run the ensemble. A failed fetch only disables content features;
    /// it never fails the prediction.
    pub async fn predict(&self, url: &str) -> Result<Prediction> {
        let body = match self.fetcher.fetch(url).await {
            Ok(body) => Some(body),
            Err(err) => {
                debug!(url = %url, category = err.category(), error = %err, "Fetch failed, content features default to zero");
                None
            }
        };

        self.predict_with_body(url, body.as_deref())
    }

    /// Same as [`predict`](Self::predict) and additionally reports the fetch
    /// failure category, for callers that track fetch outcomes.
    pub async fn predict_traced(
        &self,
        url: &str,
    ) -> Result<(Prediction, Option<&'static str>)> {
        let fetched = self.fetcher.fetch(url).await;
        let (body, failure) = match &fetched {
            Ok(body) => (Some(body.as_str()), None),
            Err(err) => {
                debug!(url = %url, category = err.category(), error = %err, "Fetch failed, content features default to zero");
                (None, Some(err.category()))
            }
        };

        let prediction = self.predict_with_body(url, body)?;
        Ok((prediction, failure))
    }

    /// The pure tail of the pipeline: everything after the fetch.
    pub fn predict_with_body(&self, url: &str, body: Option<&str>) -> Result<Prediction> {
        let bag = features::extract(url, body);
        let vector = bag.to_vector();
        let scaled = self.scaler.transform(&vector)?;
        let verdict = self.classifier.predict(&scaled)?;

        debug!(
            url = %url,
            is_phishing = verdict.is_phishing,
            confidence = verdict.confidence,
            content_analyzed = body.is_some(),
            "Prediction complete"
        );

        Ok(Prediction::new(
            url.to_string(),
            verdict.is_phishing,
            verdict.confidence,
            body.is_some(),
        ))
    }
}
