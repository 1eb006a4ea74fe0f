use std::sync::Mutex;

/// Counters for the fetch lifecycle, kept behind a mutex so a shared
/// recorder can be read from a diagnostics surface.
pub struct MetricsRecorder {
    inner: Mutex<Counters>,
}

#[derive(Default)]
struct Counters {
    issued: usize,
    applied: usize,
    discarded_stale: usize,
    failed: usize,
}

/// Point-in-time copy of the fetch counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub issued: usize,
    pub applied: usize,
    pub discarded_stale: usize,
    pub failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn record_issued(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.issued += 1;
        }
    }

    pub fn record_applied(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.applied += 1;
        }
    }

    pub fn record_discarded_stale(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.discarded_stale += 1;
        }
    }

    pub fn record_failed(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.failed += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(counters) = self.inner.lock() {
            MetricsSnapshot {
                issued: counters.issued,
                applied: counters.applied,
                discarded_stale: counters.discarded_stale,
                failed: counters.failed,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
