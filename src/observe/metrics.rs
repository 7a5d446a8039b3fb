//! Metrics collection
//!
//! Tracks search counts, failures, and a rolling log of recent searches.

use super::SearchObserver;
use crate::results::RawResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Number of recent searches kept in the audit trail
const RECENT_CAPACITY: usize = 100;

/// One audited search attempt
#[derive(Debug, Clone, Serialize)]
pub struct SearchRecord {
    pub query: String,
    pub result_count: usize,
    pub success: bool,
    pub at: DateTime<Utc>,
}

/// Snapshot of the collected metrics
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub total_searches: u64,
    pub failed_searches: u64,
    pub results_returned: u64,
    /// Percentage of successful searches
    pub reliability: f64,
    pub recent: Vec<SearchRecord>,
}

/// In-memory metrics observer
pub struct SearchMetrics {
    total_searches: AtomicU64,
    failed_searches: AtomicU64,
    results_returned: AtomicU64,
    recent: RwLock<VecDeque<SearchRecord>>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            failed_searches: AtomicU64::new(0),
            results_returned: AtomicU64::new(0),
            recent: RwLock::new(VecDeque::with_capacity(RECENT_CAPACITY)),
        }
    }

    /// Percentage of successful searches; 100 when nothing was recorded yet
    pub fn reliability(&self) -> f64 {
        let total = self.total_searches.load(Ordering::Relaxed);
        let failed = self.failed_searches.load(Ordering::Relaxed);
        if total == 0 {
            100.0
        } else {
            ((total - failed) as f64 / total as f64) * 100.0
        }
    }

    pub fn stats(&self) -> SearchStats {
        let recent = match self.recent.read() {
            Ok(recent) => recent.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        };

        SearchStats {
            total_searches: self.total_searches.load(Ordering::Relaxed),
            failed_searches: self.failed_searches.load(Ordering::Relaxed),
            results_returned: self.results_returned.load(Ordering::Relaxed),
            reliability: self.reliability(),
            recent,
        }
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchObserver for SearchMetrics {
    fn record(&self, query: &str, results: &[RawResult], success: bool) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        if success {
            self.results_returned
                .fetch_add(results.len() as u64, Ordering::Relaxed);
        } else {
            self.failed_searches.fetch_add(1, Ordering::Relaxed);
        }

        let record = SearchRecord {
            query: query.to_string(),
            result_count: results.len(),
            success,
            at: Utc::now(),
        };

        let mut recent = match self.recent.write() {
            Ok(recent) => recent,
            Err(poisoned) => poisoned.into_inner(),
        };
        if recent.len() >= RECENT_CAPACITY {
            recent.pop_front();
        }
        recent.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = SearchMetrics::new();
        assert_eq!(metrics.reliability(), 100.0);

        let results = vec![
            RawResult::new("a", "https://a.io", "x"),
            RawResult::new("b", "https://b.io", "y"),
        ];
        metrics.record("rust", &results, true);
        metrics.record("rust", &[], false);

        let stats = metrics.stats();
        assert_eq!(stats.total_searches, 2);
        assert_eq!(stats.failed_searches, 1);
        assert_eq!(stats.results_returned, 2);
        assert_eq!(stats.reliability, 50.0);
        assert_eq!(stats.recent.len(), 2);
        assert!(!stats.recent[1].success);
    }

    #[test]
    fn test_recent_is_bounded() {
        let metrics = SearchMetrics::new();
        for i in 0..(RECENT_CAPACITY + 10) {
            metrics.record(&format!("q{}", i), &[], true);
        }
        let stats = metrics.stats();
        assert_eq!(stats.recent.len(), RECENT_CAPACITY);
        assert_eq!(stats.recent[0].query, "q10");
    }
}
