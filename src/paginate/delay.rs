// src/paginate/delay.rs
// =============================================================================
// Politeness delays between consecutive page requests.
//
// The paginator asks its DelayPolicy how long to wait before every request
// after the first. The production policy picks a random pause (2 to 5 seconds
// by default) so the request rate doesn't look mechanical. Tests plug in
// NoDelay, or a closure, so they never wait on the wall clock.
// =============================================================================

use std::time::Duration;

pub trait DelayPolicy {
    fn next_delay(&mut self) -> Duration;
}

// Uniformly random delay in [min, max], millisecond resolution
pub struct RandomDelay {
    min_ms: u64,
    max_ms: u64,
    rng: fastrand::Rng,
}

impl RandomDelay {
    // Bounds given in the wrong order are swapped
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, fastrand::Rng::new())
    }

    // Same sequence of delays for the same seed
    pub fn with_seed(min: Duration, max: Duration, seed: u64) -> Self {
        Self::with_rng(min, max, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(min: Duration, max: Duration, rng: fastrand::Rng) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min_ms: millis(min),
            max_ms: millis(max),
            rng,
        }
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(5))
    }
}

impl DelayPolicy for RandomDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.u64(self.min_ms..=self.max_ms))
    }
}

// Never waits
pub struct NoDelay;

impl DelayPolicy for NoDelay {
    fn next_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

// Any closure returning a Duration is a policy too
impl<F> DelayPolicy for F
where
    F: FnMut() -> Duration,
{
    fn next_delay(&mut self) -> Duration {
        self()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
