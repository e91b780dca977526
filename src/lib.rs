// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. sections::SectionSpec)
    clippy::module_name_repetitions
)]

//! # readme-composer
//!
//! A terminal README composer.
//!
//! Fill in a fixed set of README sections, switch each one on or off, watch
//! the composed Markdown (or its HTML rendering) update live, then copy it
//! to the clipboard or save it as `README.md`.
//!
//! ## Architecture
//!
//! readme-composer uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`sections`]: The fixed section table
//! - [`composer`]: Document state, composition and export
//! - [`preview`]: Markdown to HTML rendering
//! - [`editor`]: Field editor for the focused section
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flag defaults

pub mod app;
pub mod composer;
pub mod config;
pub mod editor;
pub mod preview;
pub mod sections;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::composer::DocumentState;
    pub use crate::preview::{ComrakRenderer, MarkdownRenderer};
    pub use crate::sections::SectionId;
}
