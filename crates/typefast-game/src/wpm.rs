// Words-per-minute timing
//
// All times are offsets from a single logical clock. Time before the first
// keystroke is inactive; once the player starts typing, the inactive span is
// frozen and every later frame counts as active.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Reference word length used to normalize the adjusted rate.
pub const STANDARD_WORD_LENGTH: f64 = 4.0;

const MS_PER_MINUTE: f64 = 60_000.0;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of monotonic time, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall clock measured from its construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Used for headless replays and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// WpmStats
// ---------------------------------------------------------------------------

/// Typing-speed counters for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct WpmStats {
    word_count: u32,
    total_word_length: usize,
    start: Duration,
    active: Duration,
    inactive: Duration,
    has_started: bool,
}

impl WpmStats {
    /// Start counting at `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            word_count: 0,
            total_word_length: 0,
            start: now,
            active: Duration::ZERO,
            inactive: Duration::ZERO,
            has_started: false,
        }
    }

    /// Record a completed word of `byte_len` bytes.
    pub fn word_input(&mut self, byte_len: usize) {
        self.word_count += 1;
        self.total_word_length += byte_len;
    }

    /// Mark the player's first keystroke. Only the first call has an effect.
    pub fn first_letter_input(&mut self, now: Duration) {
        if self.has_started {
            return;
        }
        self.has_started = true;
        self.inactive = now.saturating_sub(self.start);
    }

    /// Recompute the active span. Called once per frame.
    pub fn tick(&mut self, now: Duration) {
        self.active = now.saturating_sub(self.start).saturating_sub(self.inactive);
    }

    /// Clear every counter and restart from `now`.
    pub fn reset(&mut self, now: Duration) {
        *self = Self::new(now);
    }

    /// Completed words per minute of active time; 0 before any word or time.
    pub fn wpm(&self) -> f64 {
        rate(f64::from(self.word_count), self.active)
    }

    /// Rate counting every [`STANDARD_WORD_LENGTH`] bytes as one word.
    pub fn adjusted_wpm(&self) -> f64 {
        let words = (self.total_word_length as f64 / STANDARD_WORD_LENGTH).round();
        rate(words, self.active)
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    pub fn total_word_length(&self) -> usize {
        self.total_word_length
    }

    pub fn active_duration(&self) -> Duration {
        self.active
    }

    pub fn inactive_duration(&self) -> Duration {
        self.inactive
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }
}

fn rate(words: f64, active: Duration) -> f64 {
    let ms = active.as_secs_f64() * 1000.0;
    if words <= 0.0 || ms <= 0.0 {
        return 0.0;
    }
    MS_PER_MINUTE / (ms / words)
}
