use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source. `now()` is measured from an arbitrary fixed origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `std::time::Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Used by tests and offline simulation.
#[derive(Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.micros
            .fetch_add(by.as_micros() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

/// Active-time accounting for a session: wall time since start minus paused
/// intervals, frozen once stopped.
#[derive(Debug, Default, Clone)]
pub(crate) struct Stopwatch {
    started: Option<Duration>,
    paused_since: Option<Duration>,
    paused_total: Duration,
    stopped: Option<Duration>,
}

impl Stopwatch {
    pub(crate) fn start(&mut self, now: Duration) {
        *self = Self {
            started: Some(now),
            ..Self::default()
        };
    }

    pub(crate) fn pause(&mut self, now: Duration) {
        if self.paused_since.is_none() {
            self.paused_since = Some(now);
        }
    }

    pub(crate) fn resume(&mut self, now: Duration) {
        if let Some(since) = self.paused_since.take() {
            self.paused_total += now.saturating_sub(since);
        }
    }

    pub(crate) fn stop(&mut self, now: Duration) {
        if self.stopped.is_some() {
            return;
        }
        self.resume(now);
        self.stopped = Some(now);
    }

    pub(crate) fn elapsed(&self, now: Duration) -> Duration {
        let Some(started) = self.started else {
            return Duration::ZERO;
        };
        let end = self.stopped.unwrap_or(now);
        let mut paused = self.paused_total;
        if let Some(since) = self.paused_since {
            paused += end.saturating_sub(since);
        }
        end.saturating_sub(started).saturating_sub(paused)
    }
}
