//! In-process statistics for the prediction pipeline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for pipeline performance
pub struct PipelineMetrics {
    /// Total URLs processed
    pub urls_processed: AtomicU64,
    /// Predictions that came back as phishing
    pub phishing_detected: AtomicU64,
    /// Predictions that failed outright
    pub errors: AtomicU64,
    /// Fetch failures by category
    fetch_failures: RwLock<HashMap<&'static str, u64>>,
    /// End-to-end processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Confidence distribution buckets
    confidence_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self {
            urls_processed: AtomicU64::new(0),
            phishing_detected: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            fetch_failures: RwLock::new(HashMap::new()),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            confidence_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a completed prediction
    pub fn record_prediction(&self, elapsed: Duration, confidence: f64, is_phishing: bool) {
        self.urls_processed.fetch_add(1, Ordering::Relaxed);
        if is_phishing {
            self.phishing_detected.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(elapsed.as_micros() as u64);
            // Bound memory for long runs
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        let bucket = (confidence * 10.0).min(9.0) as usize;
        if let Ok(mut buckets) = self.confidence_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a prediction that could not be produced
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fetch failure by category
    pub fn record_fetch_failure(&self, category: &'static str) {
        if let Ok(mut failures) = self.fetch_failures.write() {
            *failures.entry(category).or_insert(0) += 1;
        }
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = match self.processing_times.read() {
            Ok(times) => times,
            Err(_) => return ProcessingStats::default(),
        };
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get current throughput (URLs per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.urls_processed.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Fetch failure counts by category
    pub fn get_fetch_failures(&self) -> HashMap<&'static str, u64> {
        self.fetch_failures
            .read()
            .map(|f| f.clone())
            .unwrap_or_default()
    }

    /// Confidence distribution
    pub fn get_confidence_distribution(&self) -> [u64; 10] {
        self.confidence_buckets
            .read()
            .map(|b| *b)
            .unwrap_or([0; 10])
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let processed = self.urls_processed.load(Ordering::Relaxed);
        let phishing = self.phishing_detected.load(Ordering::Relaxed);
        let errors = self.errors.load(Ordering::Relaxed);
        let phishing_rate = if processed > 0 {
            (phishing as f64 / processed as f64) * 100.0
        } else {
            0.0
        };

        let processing = self.get_processing_stats();
        let fetch_failures = self.get_fetch_failures();
        let distribution = self.get_confidence_distribution();

        info!(
            processed = processed,
            phishing = phishing,
            errors = errors,
            "Pipeline summary: {:.1}% flagged, {:.1} url/s",
            phishing_rate,
            self.get_throughput()
        );
        info!(
            "Processing time (μs): mean={} p50={} p95={} p99={} max={}",
            processing.mean_us, processing.p50_us, processing.p95_us, processing.p99_us, processing.max_us
        );

        if !fetch_failures.is_empty() {
            let mut categories: Vec<_> = fetch_failures.iter().collect();
            categories.sort();
            for (category, count) in categories {
                info!("Fetch failures [{}]: {}", category, count);
            }
        }

        let total: u64 = distribution.iter().sum();
        if total > 0 {
            for (i, &count) in distribution.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let pct = (count as f64 / total as f64) * 100.0;
                info!(
                    "Confidence {:.1}-{:.1}: {} ({:.1}%)",
                    i as f64 / 10.0,
                    (i + 1) as f64 / 10.0,
                    count,
                    pct
                );
            }
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = PipelineMetrics::new();

        metrics.record_prediction(Duration::from_micros(100), 0.9, true);
        metrics.record_prediction(Duration::from_micros(200), 0.6, false);
        metrics.record_error();
        metrics.record_fetch_failure("timeout");
        metrics.record_fetch_failure("timeout");
        metrics.record_fetch_failure("connect");

        assert_eq!(metrics.urls_processed.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.phishing_detected.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.errors.load(Ordering::Relaxed), 1);

        let failures = metrics.get_fetch_failures();
        assert_eq!(failures.get("timeout"), Some(&2));
        assert_eq!(failures.get("connect"), Some(&1));

        let stats = metrics.get_processing_stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_us, 150);
    }

    #[test]
    fn test_confidence_distribution_buckets() {
        let metrics = PipelineMetrics::new();
        metrics.record_prediction(Duration::from_micros(10), 0.05, false);
        metrics.record_prediction(Duration::from_micros(10), 0.95, true);
        metrics.record_prediction(Duration::from_micros(10), 1.0, true);

        let distribution = metrics.get_confidence_distribution();
        assert_eq!(distribution[0], 1);
        assert_eq!(distribution[9], 2);
    }
}
