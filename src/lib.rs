//! # dirsnap
//!
//! `dirsnap` walks a directory tree and records every non-ignored file as a relative,
//! `/`-separated path with its text content, plus a list of per-file errors. The
//! result serializes to a single JSON document.
//!
//! A file carries content only when content is not suppressed, its size is within the
//! ceiling, and it does not look binary. Text that is not valid UTF-8 is decoded
//! lossily rather than rejected.
//!
//! # Features
//!
//! - `parallel`: Reads file contents on the Rayon pool. Output order is unchanged.
//! - `logging`: Emits debug and warning events via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use dirsnap::{SnapshotBuilder, output, snapshot};
//!
//! let config = SnapshotBuilder::new(".")
//!     .ignore_patterns(vec!["*.tmp".into()])
//!     .max_size(64 * 1024)
//!     .build();
//!
//! let result = snapshot(&config).expect("Failed to snapshot directory");
//! output::write_snapshot(&result, &config.output, true).expect("Failed to write snapshot");
//!
//! for file in &result.files {
//!     println!("{} ({})", file.path, file.content.as_ref().map_or(0, |c| c.len()));
//! }
//! ```

mod content;
mod engine;
mod error;
mod filter;
mod options;
pub mod output;
mod tree;
mod types;

pub use engine::{file_structure, snapshot};
pub use error::SnapshotError;
pub use options::{
    BinaryDetection, DEFAULT_IGNORE_PATTERNS, DEFAULT_MAX_SIZE, DEFAULT_OUTPUT, SnapshotBuilder,
    SnapshotConfig,
};
pub use types::{ErrorEntry, FileEntry, SnapshotResult};
