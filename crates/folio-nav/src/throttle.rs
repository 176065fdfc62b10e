//! Event throttling
//!
//! Leading-edge rate limiter: the first call in a window executes,
//! later calls inside the window are dropped rather than queued, so a
//! burst's final call has no delivery guarantee.

/// At most one execution per interval
#[derive(Debug)]
pub struct Throttle {
    interval_ms: u64,
    last_run: Option<u64>,
}

impl Throttle {
    /// Create a throttle with the given suppression interval
    pub fn new(interval_ms: u64) -> Self {
        Self { interval_ms, last_run: None }
    }

    /// Whether a call arriving at `now_ms` may execute. Executing
    /// calls open a new suppression window.
    pub fn should_run(&mut self, now_ms: u64) -> bool {
        match self.last_run {
            Some(last) if now_ms < last + self.interval_ms => false,
            _ => {
                self.last_run = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_edge() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.should_run(0));
        assert!(!throttle.should_run(5));
        assert!(!throttle.should_run(15));
        assert!(throttle.should_run(16));
    }

    #[test]
    fn test_burst_drops_trailing() {
        let mut throttle = Throttle::new(16);
        let executed = (0..100).filter(|_| throttle.should_run(3)).count();
        assert_eq!(executed, 1);
    }

    #[test]
    fn test_zero_interval_never_suppresses() {
        let mut throttle = Throttle::new(0);
        assert!(throttle.should_run(1));
        assert!(throttle.should_run(1));
    }
}
