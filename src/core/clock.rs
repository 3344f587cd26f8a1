use std::{
    thread,
    time::{Duration, Instant},
};

use super::state::Nanos;

/// Time source for a scheduling run.
///
/// `advance` accounts for simulated CPU work, `block` for simulated IO wait.
/// Timestamps are nanoseconds from the clock's own origin.
pub trait Clock {
    fn now(&self) -> Nanos;

    fn advance(&mut self, d: Duration);

    fn block(&mut self, d: Duration);
}

fn as_nanos(d: Duration) -> Nanos {
    Nanos::try_from(d.as_nanos()).unwrap_or(Nanos::MAX)
}

/// Logical clock. Nothing sleeps; time only moves when the scheduler says so.
#[derive(Debug, Default, Clone)]
pub struct VirtualClock {
    now: Nanos,
}

impl VirtualClock {
    pub fn starting_at(now: Nanos) -> Self {
        Self { now }
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Nanos {
        self.now
    }

    fn advance(&mut self, d: Duration) {
        self.now = self.now.saturating_add(as_nanos(d));
    }

    fn block(&mut self, d: Duration) {
        self.advance(d);
    }
}

/// Monotonic wall clock. IO wait really sleeps and stalls the whole loop.
#[derive(Debug, Clone)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Nanos {
        as_nanos(self.origin.elapsed())
    }

    // Simulated CPU work costs no real time
    fn advance(&mut self, _d: Duration) {}

    fn block(&mut self, d: Duration) {
        thread::sleep(d);
    }
}

/// Runtime-selectable clock, so the binary can pick one from the command line.
#[derive(Debug, Clone)]
pub enum AnyClock {
    Virtual(VirtualClock),
    Wall(WallClock),
}

impl Clock for AnyClock {
    fn now(&self) -> Nanos {
        match self {
            Self::Virtual(c) => c.now(),
            Self::Wall(c) => c.now(),
        }
    }

    fn advance(&mut self, d: Duration) {
        match self {
            Self::Virtual(c) => c.advance(d),
            Self::Wall(c) => c.advance(d),
        }
    }

    fn block(&mut self, d: Duration) {
        match self {
            Self::Virtual(c) => c.block(d),
            Self::Wall(c) => c.block(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_moves_only_when_told() {
        let mut clock = VirtualClock::starting_at(5);
        assert_eq!(clock.now(), 5);
        clock.advance(Duration::from_millis(1));
        assert_eq!(clock.now(), 1_000_005);
        clock.block(Duration::from_millis(10));
        assert_eq!(clock.now(), 11_000_005);
    }

    #[test]
    fn wall_clock_block_sleeps() {
        let mut clock = WallClock::new();
        let before = clock.now();
        clock.advance(Duration::from_secs(60));
        clock.block(Duration::from_millis(2));
        let elapsed = clock.now() - before;
        assert!(elapsed >= 2_000_000);
        assert!(elapsed < 60_000_000_000);
    }
}
