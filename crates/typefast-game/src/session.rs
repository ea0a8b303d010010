// Game session: one explicit context driven once per frame.
//
// A tick runs in a fixed order:
//   1. spawn a word if the cadence interval has passed
//   2. advance scrolling words and flashes, expiring words off the right edge
//   3. apply this frame's keystrokes to the input buffer
//   4. drain the event queue (hits, misses, first letter)
//   5. update the WPM clock and recompute highlights
//
// Submitting input only queues `WordTyped`; the pool is touched by the event
// pass alone, which turns a match into `WordHit` within the same drain.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, trace};
use typefast_core::event::{BoundedText, Event};
use typefast_text::generator::WordGenerator;

use crate::config::{ConfigError, GameConfig};
use crate::events::EventQueue;
use crate::input::{InputBuffer, InputError};
use crate::scroll::{MissFlashes, ScrollingWord, Spawner, TextMeasure, WordPool};
use crate::wpm::{Clock, WpmStats};

/// One keystroke from the keyboard collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A decoded codepoint.
    Char(u32),
    /// Raw UTF-8 bytes of a single keystroke, not yet decoded.
    Utf8(Vec<u8>),
    Backspace,
    Space,
    Enter,
}

/// What happened during one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Every event handled this frame, in order.
    pub events: Vec<Event>,
    /// Words spawned this frame.
    pub spawned: usize,
    /// Keystrokes rejected this frame.
    pub rejected_keys: usize,
}

/// Counters and rates for the current round.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub hits: u32,
    pub misses: u32,
    pub spawned: u32,
    pub word_count: u32,
    pub total_word_length: usize,
    pub wpm: f64,
    pub adjusted_wpm: f64,
}

/// The whole mutable game state.
///
/// A session must be driven from a single thread. None of its parts are safe
/// for concurrent mutation without external locking.
pub struct GameSession<C, R = StdRng> {
    config: GameConfig,
    clock: C,
    generator: WordGenerator<R>,
    spawner: Spawner<R>,
    pool: WordPool,
    input: InputBuffer,
    events: EventQueue,
    flashes: MissFlashes,
    wpm: WpmStats,
    wpm_target: u32,
    last_spawn: Duration,
    hits: u32,
    misses: u32,
    spawned: u32,
}

impl<C: Clock, R: Rng> GameSession<C, R> {
    /// Start a session at the clock's current time.
    ///
    /// `spawn_rng` places new words; the generator keeps its own RNG.
    pub fn new(
        config: GameConfig,
        generator: WordGenerator<R>,
        clock: C,
        spawn_rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let now = clock.now();
        let wpm_target = config.clamp_wpm_target(config.wpm_target);
        Ok(Self {
            spawner: Spawner::new(config.spawn, spawn_rng),
            config,
            clock,
            generator,
            pool: WordPool::new(),
            input: InputBuffer::new(),
            events: EventQueue::new(),
            flashes: MissFlashes::new(),
            wpm: WpmStats::new(now),
            wpm_target,
            last_spawn: now,
            hits: 0,
            misses: 0,
            spawned: 0,
        })
    }

    /// Run one frame.
    pub fn tick<M>(&mut self, keys: &[Key], measure: &M) -> FrameOutcome
    where
        M: TextMeasure + ?Sized,
    {
        let now = self.clock.now();
        let mut outcome = FrameOutcome::default();

        if now.saturating_sub(self.last_spawn) > self.spawn_interval() {
            self.last_spawn = now;
            if self.spawn_word(measure) {
                outcome.spawned += 1;
            }
        }

        self.pool.advance(self.config.screen_width, &mut self.events);
        self.flashes.advance(self.config.screen_width);

        for key in keys {
            if let Err(e) = self.apply_key(key) {
                trace!(?key, error = %e, "rejected keystroke");
                outcome.rejected_keys += 1;
            }
        }

        while let Some(event) = self.events.pop() {
            self.handle_event(&event, now);
            outcome.events.push(event);
        }

        self.wpm.tick(now);
        self.pool.update_highlights(self.input.as_str());
        outcome
    }

    /// Spawn one word now, regardless of cadence.
    ///
    /// Returns `false` if the drawn word is too long to scroll.
    pub fn spawn_word<M>(&mut self, measure: &M) -> bool
    where
        M: TextMeasure + ?Sized,
    {
        let word = self.generator.next_word();
        let text = match BoundedText::new(word) {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "skipped oversized word");
                return false;
            }
        };
        let width = measure.measure(&text, self.config.font_size);
        let entry = self.spawner.spawn(text, self.config.screen_height, width);
        debug!(
            word = %entry.text,
            speed = entry.speed,
            y = entry.position.y,
            "spawned word"
        );
        self.pool.insert(entry);
        self.spawned += 1;
        true
    }

    fn apply_key(&mut self, key: &Key) -> Result<(), InputError> {
        let event = match key {
            Key::Char(codepoint) => self.input.push_codepoint(*codepoint)?,
            Key::Utf8(bytes) => self.input.push_utf8(bytes)?,
            Key::Backspace => {
                self.input.backspace();
                None
            }
            Key::Space | Key::Enter => self.input.submit()?,
        };
        if let Some(event) = event {
            self.events.push(event);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event, now: Duration) {
        match event {
            Event::WordTyped(word) => {
                if self.pool.remove(word).is_some() {
                    self.events.push(Event::WordHit(word.clone()));
                } else {
                    debug!(word = %word, "typed word not on screen");
                }
            }
            Event::WordHit(word) => {
                self.wpm.word_input(word.len());
                self.hits += 1;
                debug!(word = %word, "word hit");
            }
            Event::WordMissed(word) => {
                self.flashes
                    .trigger(self.config.screen_width, self.config.screen_height);
                self.misses += 1;
                debug!(word = %word, "word missed");
            }
            Event::FirstLetterTyped(_) => self.wpm.first_letter_input(now),
        }
    }

    /// Time between spawns at the current target.
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / f64::from(self.wpm_target))
    }

    /// Change the spawn rate; the value is clamped to the configured range.
    pub fn set_wpm_target(&mut self, target: u32) -> u32 {
        self.wpm_target = self.config.clamp_wpm_target(target);
        self.wpm_target
    }

    pub fn wpm_target(&self) -> u32 {
        self.wpm_target
    }

    /// Clear all round state and restart timing from now.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.pool.clear();
        self.input.clear();
        self.events.clear();
        self.flashes.clear();
        self.wpm.reset(now);
        self.last_spawn = now;
        self.hits = 0;
        self.misses = 0;
        self.spawned = 0;
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            hits: self.hits,
            misses: self.misses,
            spawned: self.spawned,
            word_count: self.wpm.word_count(),
            total_word_length: self.wpm.total_word_length(),
            wpm: self.wpm.wpm(),
            adjusted_wpm: self.wpm.adjusted_wpm(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    /// Place `entry` directly in the pool, replacing any live word with the
    /// same text.
    pub fn insert_word(&mut self, entry: ScrollingWord) {
        self.pool.insert(entry);
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn wpm_stats(&self) -> &WpmStats {
        &self.wpm
    }

    pub fn flashes(&self) -> &MissFlashes {
        &self.flashes
    }
}
