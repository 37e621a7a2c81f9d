//! This crate converts profiles in the "collapsed stacks" text format into
//! the Gecko profile format, which can be loaded into the
//! [Firefox Profiler](https://profiler.firefox.com/).
//!
//! Collapsed stacks are what `stackcollapse-perf.pl`, async-profiler's
//! `collapsed` output and many other tools produce: one line per distinct
//! stack, with the frames joined by `;` from the root to the leaf, followed
//! by a sample count.
//!
//! ```text
//! main;parse;read_token 12
//! main;parse 3
//! main;java.lang.Thread.run_[j] 1
//! ```
//!
//! Use [`is_collapsed_stacks_format`] to check whether some input is in this
//! format, and [`convert`] to turn it into a [`Profile`]. To get JSON, use
//! [`serde_json`], for example [`serde_json::to_writer`].
//!
//! ## Example
//!
//! ```
//! use fxprof_collapsed_stacks::{convert, is_collapsed_stacks_format, ImportProps};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "main;foo;bar 2\nmain;foo;baz 1\n";
//! assert!(is_collapsed_stacks_format(text));
//!
//! let profile = convert(text, &ImportProps::default())?;
//! let thread = profile.thread();
//! assert_eq!(thread.stack_table().len(), 4);
//! assert_eq!(thread.samples().len(), 3);
//!
//! let json = serde_json::to_string(&profile)?;
//! # let _ = json;
//! # Ok(())
//! # }
//! ```

mod category;
mod convert;
mod detect;
mod error;
mod fast_hash_map;
mod frame_table;
mod line_parser;
mod marker_table;
mod profile;
mod props;
mod sample_table;
mod stack_table;
mod string_table;
mod thread;

pub use category::{stored_label, Category, CategoryColor};
pub use convert::{convert, convert_with_stats, ConversionStats};
pub use detect::is_collapsed_stacks_format;
pub use error::{Error, LineError};
pub use frame_table::{Frame, FrameIndex, FrameTable};
pub use line_parser::{parse_line, CollapsedStack};
pub use profile::Profile;
pub use props::ImportProps;
pub use sample_table::{Sample, SampleTable, DEFAULT_MAX_SAMPLES};
pub use stack_table::{Stack, StackIndex, StackTable};
pub use string_table::{StringIndex, StringTable};
pub use thread::Thread;
