//! Shared building blocks for the typefast typing game.
//!
//! This crate holds the byte-level text machinery that every gameplay feature
//! relies on, plus the plain value types passed between the engine and its
//! rendering/input collaborators.
//!
//! # Architecture
//!
//! - [`utf8`] -- UTF-8 codepoint decode/encode, backward seek, substrings
//! - [`character`] -- Word-letter classification and Swedish case folding
//! - [`policy`] -- Delimiter policy shared by tokenizer and dictionary builder
//! - [`geometry`] -- Points, rectangles and line segments
//! - [`event`] -- Bounded word text and the game event envelope

pub mod character;
pub mod event;
pub mod geometry;
pub mod policy;
pub mod utf8;

/// Maximum number of bytes a word or input buffer may hold.
///
/// Writes that would exceed it are rejected with
/// [`event::CapacityError`]; text is never truncated.
pub const MAX_WORD_BYTES: usize = 40;
