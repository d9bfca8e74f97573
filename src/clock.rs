use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::traits::Clock;

/// Wall-clock time in unix seconds.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn name(&self) -> &'static str {
        "system-clock"
    }

    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually advanced clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    pub fn at(secs: u64) -> Self {
        Self {
            secs: AtomicU64::new(secs),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, secs: u64) {
        self.secs.store(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn name(&self) -> &'static str {
        "manual-clock"
    }

    fn now_secs(&self) -> u64 {
        self.secs.load(Ordering::SeqCst)
    }
}

/// Enum representing all clock implementations.
#[derive(Debug)]
pub enum ClockVariant {
    System(SystemClock),
    Manual(ManualClock),
}

impl Clock for ClockVariant {
    fn name(&self) -> &'static str {
        match self {
            ClockVariant::System(inner) => inner.name(),
            ClockVariant::Manual(inner) => inner.name(),
        }
    }

    fn now_secs(&self) -> u64 {
        match self {
            ClockVariant::System(inner) => inner.now_secs(),
            ClockVariant::Manual(inner) => inner.now_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::at(1_000);
        assert_eq!(clock.now_secs(), 1_000);
        clock.advance(250);
        assert_eq!(clock.now_secs(), 1_250);
        clock.set(40);
        assert_eq!(clock.now_secs(), 40);
    }

    #[test]
    fn test_system_clock_is_post_epoch() {
        assert!(SystemClock.now_secs() > 1_600_000_000);
    }
}
