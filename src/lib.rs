// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderState)
    clippy::module_name_repetitions
)]

//! # Bean
//!
//! Render lightweight markdown as terminal text.
//!
//! Bean turns headers, rules, nested lists, paragraphs and inline emphasis
//! into plain text with ANSI escape sequences, word-wrapped to the
//! terminal width.
//!
//! ## Example
//!
//! ```
//! let out = bean::render(&["## Notes", "Some **bold** text."], 80);
//! assert_eq!(out, "\x1b[1mNotes\x1b[0m\n\nSome \x1b[1mbold\x1b[0m text.");
//! ```
//!
//! ## Modules
//!
//! - [`render`]: The renderer (pure, no I/O)
//! - [`source`]: Reading documents into lines
//! - [`terminal`]: Output width and screen control
//! - [`config`]: Saved default flags
//! - [`watcher`]: Re-rendering on file changes
//! - [`perf`]: Timing and debug logging

pub mod config;
pub mod perf;
pub mod render;
pub mod source;
pub mod terminal;
pub mod watcher;

pub use render::{RenderOptions, Renderer, render};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::render::{HeaderStyle, ListGap, RenderOptions, Renderer, render};
    pub use crate::source::{Source, SourceError};
}
