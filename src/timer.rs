use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running { started: Instant },
    Stopped,
}

/// Round clock. Starts on the first drag and freezes for good once the
/// board is solved.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    state: State,
    centis: u64,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            centis: 0,
        }
    }

    /// Has no effect unless the stopwatch is idle.
    pub fn start(&mut self, now: Instant) {
        if self.state == State::Idle {
            self.state = State::Running { started: now };
            self.centis = 0;
        }
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            self.state = State::Stopped;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn tick(&mut self, now: Instant) {
        if let State::Running { started } = self.state {
            self.centis = to_centis(now.saturating_duration_since(started));
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    /// Elapsed time as of the last tick, in hundredths of a second.
    pub fn centis(&self) -> u64 {
        self.centis
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.centis / 100, self.centis % 100)
    }
}

fn to_centis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.tick(t0 + Duration::from_secs(3));
        assert!(sw.is_idle());
        assert_eq!(sw.centis(), 0);
        assert_eq!(sw.to_string(), "0.00");
    }

    #[test]
    fn rounds_to_hundredths() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start(t0);
        assert!(sw.is_running());
        sw.tick(t0 + Duration::from_millis(1234));
        assert_eq!(sw.centis(), 123);
        sw.tick(t0 + Duration::from_millis(1236));
        assert_eq!(sw.centis(), 124);
        assert_eq!(sw.to_string(), "1.24");
    }

    #[test]
    fn second_start_is_ignored() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start(t0);
        sw.start(t0 + Duration::from_secs(5));
        sw.tick(t0 + Duration::from_secs(6));
        assert_eq!(sw.centis(), 600);
    }

    #[test]
    fn stop_freezes_for_good() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start(t0);
        sw.tick(t0 + Duration::from_millis(2500));
        sw.stop();
        sw.tick(t0 + Duration::from_secs(60));
        assert!(sw.is_stopped());
        sw.start(t0 + Duration::from_secs(61));
        assert!(sw.is_stopped());
        assert_eq!(sw.to_string(), "2.50");
    }

    #[test]
    fn reset_returns_to_idle() {
        let t0 = Instant::now();
        let mut sw = Stopwatch::new();
        sw.start(t0);
        sw.tick(t0 + Duration::from_secs(1));
        sw.stop();
        sw.reset();
        assert!(sw.is_idle());
        assert_eq!(sw.centis(), 0);
        sw.start(t0 + Duration::from_secs(2));
        assert!(sw.is_running());
    }
}
