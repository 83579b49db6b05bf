use std::time::Duration;

/// Tuning knobs for one sweep run.
pub struct SweepConfig {
    /// Echo requests sent per probe.
    pub packet_count: u32,

    /// Per-packet reply timeout handed to the external ping.
    pub timeout_secs: u64,

    /// Upper bound on probes in flight at any instant.
    pub max_workers: usize,
}

impl SweepConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            packet_count: 2,
            timeout_secs: 2,
            max_workers: 10,
        }
    }
}
