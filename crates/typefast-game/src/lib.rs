//! Gameplay engine for typefast.
//!
//! Words drawn from a [`typefast_text::generator::WordGenerator`] scroll
//! across the screen while the player types. Each frame the live input is
//! matched against every scrolling word to find its highlighted prefix;
//! words that leave the screen are missed, words typed exactly are hits, and
//! hits feed the words-per-minute counters.
//!
//! Nothing here draws, plays audio or polls devices. The caller supplies
//! keystrokes, a [`scroll::TextMeasure`] and a [`wpm::Clock`], and renders
//! from the state a [`session::GameSession`] exposes.
//!
//! # Architecture
//!
//! - [`input`] -- Bounded input buffer and keystroke validation
//! - [`highlight`] -- Codepoint prefix match and render split
//! - [`scroll`] -- Scrolling words, keyed pool, spawner, miss flashes
//! - [`events`] -- Per-frame event queue
//! - [`wpm`] -- Active/inactive timing and WPM rates
//! - [`config`] -- Game settings with defaults and validation
//! - [`session`] -- Frame tick tying the pieces together
//!
//! # Threading
//!
//! All types are meant for one game loop on one thread. They hold no locks;
//! sharing one across threads requires external synchronization.

pub mod config;
pub mod events;
pub mod highlight;
pub mod input;
pub mod scroll;
pub mod session;
pub mod wpm;
