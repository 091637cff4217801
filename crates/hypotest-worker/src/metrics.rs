//! Metrics collection for background scans

/// Counters for scan requests and their fates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerMetrics {
    /// Requests submitted
    pub submitted: usize,

    /// Results published
    pub completed: usize,

    /// Published results where no boundary existed
    pub exhausted: usize,

    /// Scans stopped early by cancellation
    pub cancelled: usize,

    /// Finished scans whose result was dropped because a newer request existed
    pub stale_discarded: usize,

    /// Scans run inline on the submitting thread
    pub inline: usize,
}

impl WorkerMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission
    pub fn record_submission(&mut self, inline: bool) {
        self.submitted += 1;
        if inline {
            self.inline += 1;
        }
    }

    /// Record a published result
    pub fn record_completion(&mut self, exhausted: bool) {
        self.completed += 1;
        if exhausted {
            self.exhausted += 1;
        }
    }

    /// Record a cancelled scan
    pub fn record_cancellation(&mut self) {
        self.cancelled += 1;
    }

    /// Record a discarded stale result
    pub fn record_stale(&mut self) {
        self.stale_discarded += 1;
    }

    /// Requests that never produced a visible result
    pub fn total_dropped(&self) -> usize {
        self.cancelled + self.stale_discarded
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Scan Worker Metrics Summary".to_string(),
            "===========================".to_string(),
            format!("Submitted: {} ({} inline)", self.submitted, self.inline),
            format!("Completed: {}", self.completed),
            format!("  No boundary: {}", self.exhausted),
            format!("Cancelled: {}", self.cancelled),
            format!("Stale discarded: {}", self.stale_discarded),
        ];
        lines.join("\n")
    }
}
