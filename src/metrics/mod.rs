//! Observed-accuracy tracking for experiment drivers (requires `metrics`
//! feature).
//!
//! The filter itself reports theoretical rates; this module measures actual
//! behavior. A driver feeds query outcomes into an [`AccuracyTracker`] —
//! which queries came back positive or negative, and which of those verdicts
//! the driver knows to be wrong from its ground-truth corpora — and reads
//! back observed false-positive and false-negative rates.
//!
//! Plain counters, no interior mutability: the core structures are
//! single-threaded and so is any driver exercising them.
//!
//! # Examples
//!
//! ```
//! use softbloom::metrics::AccuracyTracker;
//!
//! let mut tracker = AccuracyTracker::new();
//!
//! // 10 queries for known non-members: 9 correctly negative, 1 false positive
//! for _ in 0..9 {
//!     tracker.record_true_negative();
//! }
//! tracker.record_false_positive();
//!
//! assert!((tracker.false_positive_rate() - 0.1).abs() < 1e-9);
//! assert_eq!(tracker.false_negative_rate(), 0.0);
//! ```

/// Running tally of query outcomes against ground truth.
#[derive(Debug, Clone, Default)]
pub struct AccuracyTracker {
    true_positives: u64,
    true_negatives: u64,
    false_positives: u64,
    false_negatives: u64,
}

impl AccuracyTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query that correctly reported a member present.
    pub fn record_true_positive(&mut self) {
        self.true_positives += 1;
    }

    /// Record a query that correctly reported a non-member absent.
    pub fn record_true_negative(&mut self) {
        self.true_negatives += 1;
    }

    /// Record a query that reported a known non-member present.
    pub fn record_false_positive(&mut self) {
        self.false_positives += 1;
    }

    /// Record a query that reported a known member absent.
    ///
    /// For a correct filter this only happens after a soft deletion; a false
    /// negative on a never-removed member is a bug in the structure under
    /// test.
    pub fn record_false_negative(&mut self) {
        self.false_negatives += 1;
    }

    /// Record a verdict for a known non-member.
    pub fn record_negative_query(&mut self, reported_present: bool) {
        if reported_present {
            self.record_false_positive();
        } else {
            self.record_true_negative();
        }
    }

    /// Record a verdict for a known member.
    pub fn record_positive_query(&mut self, reported_present: bool) {
        if reported_present {
            self.record_true_positive();
        } else {
            self.record_false_negative();
        }
    }

    /// Observed false positives so far.
    #[must_use]
    pub fn false_positives(&self) -> u64 {
        self.false_positives
    }

    /// Observed false negatives so far.
    #[must_use]
    pub fn false_negatives(&self) -> u64 {
        self.false_negatives
    }

    /// Total queries recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Fraction of known non-member queries wrongly reported present.
    ///
    /// 0.0 when no non-member queries have been recorded.
    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        let non_members = self.false_positives + self.true_negatives;
        if non_members == 0 {
            return 0.0;
        }
        self.false_positives as f64 / non_members as f64
    }

    /// Fraction of known member queries wrongly reported absent.
    ///
    /// 0.0 when no member queries have been recorded.
    #[must_use]
    pub fn false_negative_rate(&self) -> f64 {
        let members = self.false_negatives + self.true_positives;
        if members == 0 {
            return 0.0;
        }
        self.false_negatives as f64 / members as f64
    }

    /// Reset all counters for the next experiment phase.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_reports_zero() {
        let tracker = AccuracyTracker::new();
        assert_eq!(tracker.false_positive_rate(), 0.0);
        assert_eq!(tracker.false_negative_rate(), 0.0);
        assert_eq!(tracker.total(), 0);
    }

    #[test]
    fn test_false_positive_rate() {
        let mut tracker = AccuracyTracker::new();
        for _ in 0..90 {
            tracker.record_true_negative();
        }
        for _ in 0..10 {
            tracker.record_false_positive();
        }
        assert!((tracker.false_positive_rate() - 0.1).abs() < 1e-9);
        assert_eq!(tracker.false_positives(), 10);
    }

    #[test]
    fn test_false_negative_rate() {
        let mut tracker = AccuracyTracker::new();
        for _ in 0..99 {
            tracker.record_true_positive();
        }
        tracker.record_false_negative();
        assert!((tracker.false_negative_rate() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_query_helpers() {
        let mut tracker = AccuracyTracker::new();
        tracker.record_negative_query(true); // false positive
        tracker.record_negative_query(false); // true negative
        tracker.record_positive_query(true); // true positive
        tracker.record_positive_query(false); // false negative

        assert_eq!(tracker.total(), 4);
        assert!((tracker.false_positive_rate() - 0.5).abs() < 1e-9);
        assert!((tracker.false_negative_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_reset() {
        let mut tracker = AccuracyTracker::new();
        tracker.record_false_positive();
        tracker.reset();
        assert_eq!(tracker.total(), 0);
        assert_eq!(tracker.false_positive_rate(), 0.0);
    }
}
