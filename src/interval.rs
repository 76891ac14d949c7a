use std::time::Instant;

/// Milliseconds elapsed since `start`, the clock every schedule in the crate runs on.
pub fn millis_since(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Millisecond period checked from the main loop.
///
/// Fires on the first check, then at most once per elapsed period. A loop that
/// falls behind gets one firing, not a burst of catch-up firings.
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Interval {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_fired_ms: None,
        }
    }

    pub fn due(&mut self, now_ms: u64) -> bool {
        let fire = match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.period_ms,
        };

        if fire {
            self.last_fired_ms = Some(now_ms);
        }

        fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_immediately_then_once_per_period() {
        let mut interval = Interval::new(400);

        assert!(interval.due(0));
        assert!(!interval.due(1));
        assert!(!interval.due(399));
        assert!(interval.due(400));
        assert!(!interval.due(799));
        assert!(interval.due(800));
    }

    #[test]
    fn late_loop_does_not_burst() {
        let mut interval = Interval::new(5);

        assert!(interval.due(100));
        assert!(interval.due(130));
        assert!(!interval.due(131));
        assert!(interval.due(135));
    }

    #[test]
    fn clock_is_monotonic() {
        let start = Instant::now();
        let first = millis_since(start);

        assert!(millis_since(start) >= first);
    }
}
