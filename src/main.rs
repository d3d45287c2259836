//! Phishing URL Detector - Main Entry Point
//!
//! Loads the classifier and scaler artifacts once, then classifies each URL
//! given as an argument (or read line-by-line from stdin) and prints one
//! JSON result per URL.

use std::io::BufRead;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use phishing_detector::{
    config::AppConfig, metrics::PipelineMetrics, predictor::Predictor, types::PredictionResponse,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("phishing_detector=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Phishing URL Detector");

    // Load configuration
    let config = AppConfig::load()?;
    info!(
        classifier = %config.artifacts.classifier_path,
        scaler = %config.artifacts.scaler_path,
        timeout_secs = config.fetcher.timeout_secs,
        "Configuration loaded"
    );

    // Load artifacts; absence is fatal before any request is served.
    let predictor = Arc::new(Predictor::new(&config)?);
    let metrics = Arc::new(PipelineMetrics::new());

    let urls: Vec<String> = std::env::args().skip(1).collect();
    let urls = if urls.is_empty() {
        info!("No URLs on the command line, reading from stdin");
        std::io::stdin()
            .lock()
            .lines()
            .map_while(Result::ok)
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        urls
    };

    for url in &urls {
        let start_time = Instant::now();

        let response = match predictor.predict_traced(url).await {
            Ok((prediction, fetch_failure)) => {
                if let Some(category) = fetch_failure {
                    metrics.record_fetch_failure(category);
                }
                metrics.record_prediction(
                    start_time.elapsed(),
                    prediction.confidence,
                    prediction.is_phishing,
                );
                PredictionResponse::success(&prediction)
            }
            Err(e) => {
                // One bad URL must not stop the run.
                error!(url = %url, error = %e, "Prediction failed");
                metrics.record_error();
                PredictionResponse::error(url, e)
            }
        };

        println!("{}", serde_json::to_string(&response)?);
    }

    metrics.print_summary();
    Ok(())
}
