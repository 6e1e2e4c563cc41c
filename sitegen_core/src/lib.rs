//! `sitegen_core` is the build engine behind [sitegen](https://github.com/ifiokjr/sitegen). It reads a `.generator` site definition, resolves the build settings, runs the queued directives and renders page templates by substituting `&{name}` placeholders with values defined in content files.
//!
//! ## Processing Pipeline
//!
//! ```text
//! .generator file
//!   → SDL parser (directive lines + page blocks)
//!   → Resolver (immediate settings, ordered directive queue)
//!   → Ignore rules (compiled from the `:ignore_rules` file)
//!   → Queue (include, include_dir, redirect, content, in declaration order)
//!   → Page renderer (content blocks merged over global content, templates streamed)
//! ```
//!
//! ## Modules
//!
//! - [`sdl`]: Extracts directives and page blocks from a site definition.
//! - [`ignore_rules`]: Compiles glob-like ignore lines into full-path matchers.
//! - [`content`]: Parses `:def <name> ... :end` blocks into [`Properties`].
//! - [`formatter`]: Substitutes placeholders in text or across a chunked stream.
//! - [`directives`]: Splits directives into [`Settings`] and a queue, and executes the queue.
//! - [`pages`]: Renders page files into the build tree.
//! - [`files`]: Path resolution and file operations for one site.
//!
//! ## Site Definition
//!
//! ```text
//! :build public
//! :source src
//! :ignore_rules .buildignore
//! :include_dir assets assets
//! :content content/site.txt
//! :redirect /old /new
//!
//! /blog
//! file = index.html
//! template = templates/post.html
//! content = content/post.txt
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitegen_core::Generator;
//! use std::path::Path;
//!
//! let generator = Generator::load(Path::new("my-site")).unwrap();
//! generator.clear_build().unwrap();
//! generator.start().unwrap();
//! ```

pub use config::Settings;
pub use content::*;
pub use directives::Directive;
pub use engine::*;
pub use error::*;
pub use files::FileManager;
pub use ignore_rules::IgnorePattern;
pub use ignore_rules::IgnoreRules;
pub use sdl::Command;
pub use sdl::Page;
pub use sdl::PageFile;

pub mod config;
pub mod content;
pub mod directives;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod files;
pub mod formatter;
pub mod ignore_rules;
pub mod pages;
pub mod sdl;

#[cfg(test)]
mod __fixtures;
