/// Run-level inputs to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Run time in seconds since the Unix epoch.
    pub run_time: i64,
    /// Seconds a timestamp may lie beyond the run time.
    pub tolerance_secs: i64,
}

impl ValidationContext {
    pub fn new(run_time: i64, tolerance_secs: i64) -> Self {
        Self {
            run_time,
            tolerance_secs,
        }
    }

    /// Latest accepted timestamp.
    pub fn max_timestamp(&self) -> i64 {
        self.run_time.saturating_add(self.tolerance_secs)
    }
}
