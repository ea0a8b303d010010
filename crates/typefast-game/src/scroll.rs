// Scrolling-word pool
//
// Words enter from the left edge at a random height and drift right at their
// own speed. The pool keys entries by word text, so spawning a word that is
// already on screen replaces the older instance. An entry leaves the pool
// when it crosses the right edge (a miss) or when the player types it.

use hashbrown::HashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use typefast_core::event::{BoundedText, Event};
use typefast_core::geometry::{Rect, Vec2};
use typefast_core::utf8;

use crate::events::EventQueue;
use crate::highlight::highlight_count;

// ---------------------------------------------------------------------------
// Text measurement
// ---------------------------------------------------------------------------

/// Measures the rendered width of text. Supplied by the renderer.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed advance per codepoint, as a fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        utf8::codepoint_length(text.as_bytes()) as f32 * font_size * self.advance
    }
}

// ---------------------------------------------------------------------------
// ScrollingWord
// ---------------------------------------------------------------------------

/// One word moving across the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollingWord {
    pub text: BoundedText,
    pub position: Vec2,
    /// Horizontal pixels per frame.
    pub speed: f32,
    /// Rendered width at spawn time.
    pub width: f32,
    pub active: bool,
    /// Leading codepoints matched by the current input.
    pub highlight_count: usize,
}

impl ScrollingWord {
    pub fn new(text: BoundedText, position: Vec2, speed: f32, width: f32) -> Self {
        Self {
            text,
            position,
            speed,
            width,
            active: true,
            highlight_count: 0,
        }
    }

    /// Move one frame to the right. Inactive entries stay put.
    pub fn advance(&mut self) {
        if self.active {
            self.position.x += self.speed;
        }
    }

    /// Whether the entry has left a screen `screen_width` pixels wide.
    pub fn is_off_screen(&self, screen_width: f32) -> bool {
        self.position.x > screen_width
    }

    /// Matched prefix and remainder of the word text.
    pub fn split(&self) -> (&str, &str) {
        crate::highlight::split_highlight(&self.text, self.highlight_count)
    }
}

// ---------------------------------------------------------------------------
// WordPool
// ---------------------------------------------------------------------------

/// Live scrolling words keyed by their text.
///
/// Not safe for concurrent mutation; it is owned by a single game session.
#[derive(Debug, Default)]
pub struct WordPool {
    entries: HashMap<String, ScrollingWord>,
}

impl WordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry`, returning the entry it replaced if the text was live.
    pub fn insert(&mut self, entry: ScrollingWord) -> Option<ScrollingWord> {
        self.entries.insert(entry.text.to_string(), entry)
    }

    pub fn remove(&mut self, word: &str) -> Option<ScrollingWord> {
        self.entries.remove(word)
    }

    pub fn get(&self, word: &str) -> Option<&ScrollingWord> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &ScrollingWord> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move every entry one frame and expire those past the right edge.
    ///
    /// Each expired entry is removed and reported once as
    /// [`Event::WordMissed`]. Returns the number expired.
    pub fn advance(&mut self, screen_width: f32, events: &mut EventQueue) -> usize {
        let mut expired = 0;
        self.entries.retain(|_, entry| {
            entry.advance();
            if entry.is_off_screen(screen_width) {
                debug!(word = %entry.text, x = entry.position.x, "word expired");
                events.push(Event::WordMissed(entry.text.clone()));
                expired += 1;
                false
            } else {
                true
            }
        });
        expired
    }

    /// Recompute every entry's highlight against `input`.
    pub fn update_highlights(&mut self, input: &str) {
        for entry in self.entries.values_mut() {
            entry.highlight_count = highlight_count(input, &entry.text);
        }
    }
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Ranges new words are drawn from. Each range is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPolicy {
    /// Highest spawn row.
    pub top: f32,
    /// Rows within this distance of the bottom edge are never used.
    pub bottom_margin: f32,
    pub start_x_min: f32,
    pub start_x_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            top: 100.0,
            bottom_margin: 200.0,
            start_x_min: -200.0,
            start_x_max: -100.0,
            speed_min: 0.2,
            speed_max: 0.7,
        }
    }
}

/// Places new words according to a [`SpawnPolicy`].
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    policy: SpawnPolicy,
    rng: R,
}

impl<R: Rng> Spawner<R> {
    pub fn new(policy: SpawnPolicy, rng: R) -> Self {
        Self { policy, rng }
    }

    pub fn policy(&self) -> &SpawnPolicy {
        &self.policy
    }

    /// Build an entry for `text` just off the left edge of the screen.
    pub fn spawn(&mut self, text: BoundedText, screen_height: f32, width: f32) -> ScrollingWord {
        let p = self.policy;
        let y = sample(&mut self.rng, p.top, screen_height - p.bottom_margin);
        let x = sample(&mut self.rng, p.start_x_min, p.start_x_max);
        let speed = sample(&mut self.rng, p.speed_min, p.speed_max);
        ScrollingWord::new(text, Vec2::new(x, y), speed, width)
    }
}

/// Uniform draw from `[low, high)`, or `low` when the range is empty or its
/// width is not a finite `f32`.
fn sample<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low && (high - low).is_finite() {
        rng.gen_range(low..high)
    } else {
        low
    }
}

// ---------------------------------------------------------------------------
// Miss flash
// ---------------------------------------------------------------------------

pub const FLASH_WIDTH: f32 = 50.0;
pub const FLASH_SPEED: f32 = 5.0;

/// Red bar that sweeps off the right edge after a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissFlash {
    pub rect: Rect,
    pub active: bool,
}

/// Flash slots. Finished slots are reused before new ones are allocated.
#[derive(Debug, Default)]
pub struct MissFlashes {
    slots: Vec<MissFlash>,
}

impl MissFlashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a flash at the right edge of the screen.
    pub fn trigger(&mut self, screen_width: f32, screen_height: f32) {
        let flash = MissFlash {
            rect: Rect::new(screen_width - FLASH_WIDTH, 0.0, FLASH_WIDTH, screen_height),
            active: true,
        };
        match self.slots.iter_mut().find(|slot| !slot.active) {
            Some(slot) => *slot = flash,
            None => self.slots.push(flash),
        }
    }

    /// Move active flashes and retire those past the right edge.
    pub fn advance(&mut self, screen_width: f32) {
        for slot in self.slots.iter_mut().filter(|slot| slot.active) {
            slot.rect.x += FLASH_SPEED;
            if slot.rect.x > screen_width {
                slot.active = false;
            }
        }
    }

    /// Flashes still on screen.
    pub fn active(&self) -> impl Iterator<Item = &MissFlash> {
        self.slots.iter().filter(|slot| slot.active)
    }

    /// Total slots, finished ones included.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn word(text: &str, x: f32, speed: f32) -> ScrollingWord {
        ScrollingWord::new(BoundedText::new(text).unwrap(), Vec2::new(x, 200.0), speed, 0.0)
    }

    // -- pool --

    #[test]
    fn insert_replaces_same_text() {
        let mut pool = WordPool::new();
        assert!(pool.insert(word("apple", 0.0, 1.0)).is_none());
        let old = pool.insert(word("apple", -150.0, 0.5)).unwrap();
        assert_eq!(old.position.x, 0.0);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("apple").unwrap().position.x, -150.0);
    }

    #[test]
    fn advance_moves_by_speed() {
        let mut pool = WordPool::new();
        let mut events = EventQueue::new();
        pool.insert(word("pear", 10.0, 0.5));
        pool.advance(1280.0, &mut events);
        pool.advance(1280.0, &mut events);
        assert_eq!(pool.get("pear").unwrap().position.x, 11.0);
        assert!(events.is_empty());
    }

    #[test]
    fn expiry_emits_one_miss() {
        let mut pool = WordPool::new();
        let mut events = EventQueue::new();
        pool.insert(word("plum", 1279.5, 0.5));
        pool.insert(word("fig", 0.0, 0.5));
        // Lands exactly on the edge: still visible.
        assert_eq!(pool.advance(1280.0, &mut events), 0);
        assert_eq!(pool.advance(1280.0, &mut events), 1);
        assert!(!pool.contains("plum"));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.advance(1280.0, &mut events), 0);
        let missed: Vec<_> = events.drain().collect();
        assert_eq!(missed, vec![Event::WordMissed(BoundedText::new("plum").unwrap())]);
    }

    #[test]
    fn inactive_entries_do_not_move() {
        let mut entry = word("kiwi", 5.0, 1.0);
        entry.active = false;
        entry.advance();
        assert_eq!(entry.position.x, 5.0);
    }

    #[test]
    fn highlights_follow_input() {
        let mut pool = WordPool::new();
        pool.insert(word("apple", 0.0, 0.2));
        pool.insert(word("apricot", 0.0, 0.2));
        pool.insert(word("banana", 0.0, 0.2));
        pool.update_highlights("app");
        assert_eq!(pool.get("apple").unwrap().highlight_count, 3);
        assert_eq!(pool.get("apricot").unwrap().highlight_count, 2);
        assert_eq!(pool.get("banana").unwrap().highlight_count, 0);
        assert_eq!(pool.get("apple").unwrap().split(), ("app", "le"));
        pool.update_highlights("");
        assert!(pool.iter().all(|e| e.highlight_count == 0));
    }

    // -- spawner --

    #[test]
    fn spawn_within_policy_ranges() {
        let mut spawner = Spawner::new(SpawnPolicy::default(), StdRng::seed_from_u64(3));
        for _ in 0..500 {
            let entry = spawner.spawn(BoundedText::new("x").unwrap(), 720.0, 18.0);
            assert!((100.0..520.0).contains(&entry.position.y), "y {}", entry.position.y);
            assert!((-200.0..-100.0).contains(&entry.position.x), "x {}", entry.position.x);
            assert!((0.2..0.7).contains(&entry.speed), "speed {}", entry.speed);
            assert_eq!(entry.width, 18.0);
            assert!(entry.active);
        }
    }

    #[test]
    fn spawn_on_short_screen_uses_top() {
        let mut spawner = Spawner::new(SpawnPolicy::default(), StdRng::seed_from_u64(3));
        let entry = spawner.spawn(BoundedText::new("x").unwrap(), 250.0, 0.0);
        assert_eq!(entry.position.y, 100.0);
    }

    #[test]
    fn spawn_with_overflowing_range_falls_back_to_lower_bound() {
        let policy = SpawnPolicy {
            start_x_min: -3e38,
            start_x_max: 3e38,
            ..SpawnPolicy::default()
        };
        let mut spawner = Spawner::new(policy, StdRng::seed_from_u64(3));
        let entry = spawner.spawn(BoundedText::new("x").unwrap(), 720.0, 0.0);
        assert_eq!(entry.position.x, -3e38);
    }

    // -- measure --

    #[test]
    fn monospace_counts_codepoints() {
        let m = MonospaceMeasure { advance: 0.5 };
        assert_eq!(m.measure("åäö", 30.0), 45.0);
        assert_eq!(m.measure("", 30.0), 0.0);
    }

    // -- flashes --

    #[test]
    fn flash_sweeps_off_and_slot_is_reused() {
        let mut flashes = MissFlashes::new();
        flashes.trigger(1280.0, 720.0);
        let flash = *flashes.active().next().unwrap();
        assert_eq!(flash.rect, Rect::new(1230.0, 0.0, 50.0, 720.0));
        // 1230 -> 1285 after 11 frames.
        for _ in 0..10 {
            flashes.advance(1280.0);
        }
        assert_eq!(flashes.active().count(), 1);
        flashes.advance(1280.0);
        assert_eq!(flashes.active().count(), 0);
        flashes.trigger(1280.0, 720.0);
        assert_eq!(flashes.capacity(), 1);
        flashes.trigger(1280.0, 720.0);
        assert_eq!(flashes.capacity(), 2);
        assert_eq!(flashes.active().count(), 2);
    }
}
