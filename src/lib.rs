//! # Blockwise
//!
//! Write-sparing file copy for copy-on-write storage.
//!
//! Blockwise copies a source file over a destination file while issuing the
//! minimum number of writes: both files are walked in fixed-size pages, each
//! pair of pages is compared byte-for-byte, and only differing pages are
//! rewritten. On snapshot-aware or deduplicating storage this leaves the
//! physical blocks of identical pages shared, and on flash it avoids
//! needless write amplification.
//!
//! ## Features
//!
//! - **Selective writes**: identical pages are never rewritten, not even
//!   reallocated
//! - **Length reconciliation**: the destination is truncated or extended to
//!   the source length before the scan
//! - **Page accounting**: every run reports written vs. untouched pages
//! - **Pluggable tracing**: page decisions stream to a caller-supplied sink
//!
//! ## Example
//!
//! ```rust
//! use blockwise::{copy_blockwise, discard, page_count};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let src = dir.path().join("data.bin");
//! let dst = dir.path().join("copy.bin");
//! std::fs::write(&src, vec![0x5Au8; 10_000]).unwrap();
//!
//! // First copy writes every page.
//! let first = copy_blockwise(&mut discard, &src, &dst).unwrap();
//! assert_eq!(first.pages_written, page_count(10_000, 4096));
//!
//! // Copying again writes nothing.
//! let second = copy_blockwise(&mut discard, &src, &dst).unwrap();
//! assert_eq!(second.pages_written, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

mod copier;
mod error;
mod stats;
mod trace;

pub use copier::{copy_blockwise, Copier, CopierBuilder, CopierConfig, DEFAULT_PAGE_SIZE};
pub use error::{CopyError, Result};
pub use stats::{page_count, CopyStats};
pub use trace::{discard, TraceSink};
