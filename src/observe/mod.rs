//! Search observation
//!
//! Every search attempt, successful or not, is reported once to a
//! [`SearchObserver`]. The default observer writes a `tracing` event; the
//! [`SearchMetrics`] observer keeps counters and a bounded audit trail.

mod metrics;

pub use metrics::{SearchMetrics, SearchRecord, SearchStats};

use crate::results::RawResult;
use std::sync::Arc;
use tracing::{info, warn};

/// Sink for (query, results, success) observations
pub trait SearchObserver: Send + Sync {
    fn record(&self, query: &str, results: &[RawResult], success: bool);
}

/// Logs each search attempt
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn record(&self, query: &str, results: &[RawResult], success: bool) {
        if success {
            info!(query, result_count = results.len(), "search completed");
            for (idx, result) in results.iter().enumerate() {
                tracing::debug!(
                    rank = idx + 1,
                    title = %result.title,
                    url = %result.url,
                    score = result.score.unwrap_or(0.0),
                    "search result"
                );
            }
        } else {
            warn!(query, "search failed");
        }
    }
}

/// Fans one observation out to several observers
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn SearchObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn SearchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl SearchObserver for ObserverSet {
    fn record(&self, query: &str, results: &[RawResult], success: bool) {
        for observer in &self.observers {
            observer.record(query, results, success);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_set_fans_out() {
        let first = Arc::new(SearchMetrics::new());
        let second = Arc::new(SearchMetrics::new());
        let set = ObserverSet::new()
            .with(first.clone())
            .with(second.clone())
            .with(Arc::new(TracingObserver));
        assert_eq!(set.len(), 3);

        set.record("q", &[RawResult::new("t", "u", "c")], true);

        assert_eq!(first.stats().total_searches, 1);
        assert_eq!(second.stats().results_returned, 1);
    }
}
