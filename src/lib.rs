//! hexo-source-tool: move hexo front matter between content files and a
//! central JSON index
//!
//! A hexo `source/` directory keeps each post's metadata inline, at the top
//! of the file. This library reorganizes such a tree into a "custom" layout
//! where content files hold only their body and every header lives in one
//! `headers.json`, and back again.
//!
//! # Directions
//!
//! - [`ops::run_init`]: native layout -> custom layout. Parses the front
//!   matter of `_posts/*.md` and `<page>/index.md`, writes body-only files,
//!   copies asset directories and saves the [`MetadataIndex`].
//! - [`ops::run_convert`]: custom layout -> native layout. Reads the index,
//!   optionally [autofills](crate::core::Autofill) missing `title`, `date`,
//!   `updated` and `description` fields, and writes each header block back
//!   in front of its body.
//!
//! Both return a [`Report`] listing what was written and which records were
//! skipped. Only precondition and write failures abort a run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hexo_source_tool::{ops, ConvertOptions, GitHistory, InitOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let report = ops::run_init(&InitOptions::new("blog/source", "custom"))?;
//!     report.render();
//!
//!     let history = GitHistory::new();
//!     let options = ConvertOptions::new("custom", "blog/source-out").autofill(true);
//!     ops::run_convert(&options, &history)?.render();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: header map, front matter grammar, metadata index, autofill,
//!   run report
//! - [`io`]: tree copier, destination guard, file reader and writer, git
//!   history
//! - [`ops`]: the directory orchestrators
//! - [`config`]: layout names and per-run options
//! - [`error`]: the error type and its recoverable/fatal split

pub use crate::config::{ConvertOptions, InitOptions, Layout};
pub use crate::core::{ContentRecord, Header, HistoryProvider, MetadataIndex, Report};
pub use crate::error::{Result, SourceToolError};
pub use crate::io::GitHistory;

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod ops;
