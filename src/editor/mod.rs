//! Field editor for the focused README section.
//!
//! Provides a rope-backed working copy of one section's text with cursor
//! and selection handling, designed for integration into the TEA architecture.

mod buffer;

pub use buffer::{Cursor, Direction, FieldEditor};
