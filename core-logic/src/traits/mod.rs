use std::ops::AddAssign;

/// Success/failure counters for a batch or a single wallet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub success: u64,
    pub failed: u64,
}

impl BatchStats {
    pub fn record(&mut self, success: bool) {
        if success {
            self.success += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.success + self.failed
    }

    /// Percentage of successful attempts, 0.0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total > 0 {
            (self.success as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl AddAssign for BatchStats {
    fn add_assign(&mut self, rhs: Self) {
        self.success += rhs.success;
        self.failed += rhs.failed;
    }
}
