//! Chunk reassembly.
//!
//! Uploaded videos arrive as numbered fragment files inside a task
//! directory. This module finds them, orders them by the number embedded in
//! their filenames, and concatenates them into a single artifact.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use vc_core::chunks::{ChunkMerger, MergeStrategy};
//!
//! let merger = ChunkMerger::new().with_strategy(MergeStrategy::Atomic);
//! let summary = merger
//!     .merge(Path::new("uploads/1"), Path::new("uploads/1/merged.mp4"))
//!     .unwrap();
//! println!("{} chunks, {} bytes", summary.chunk_count, summary.bytes_written);
//! ```

mod discovery;
mod errors;
mod merger;
mod sequence;
mod types;

pub use discovery::{discover_chunks, DEFAULT_CHUNK_SUFFIX};
pub use errors::{MergeError, MergeResult};
pub use merger::{order_chunks, partial_path, ChunkMerger};
pub use sequence::sequence_key;
pub use types::{ChunkFile, MergeStrategy, MergeSummary};
