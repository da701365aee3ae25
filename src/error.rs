//! Error types for blockwise copy operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while copying a file page-by-page.
///
/// Each variant names the phase that failed so callers can report a precise
/// diagnostic. The first error aborts the copy; pages already rewritten stay
/// rewritten, so the destination may be left in a mixed state.
#[derive(Error, Debug)]
pub enum CopyError {
    /// Source could not be opened for reading, or destination could not be
    /// created or opened for read-write.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// File size could not be determined.
    #[error("failed to stat {}: {source}", path.display())]
    Stat {
        /// Path that failed to stat.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Destination could not be truncated or extended to the source length.
    #[error("failed to resize {} to {len} bytes: {source}", path.display())]
    Resize {
        /// Destination path.
        path: PathBuf,
        /// Length the destination was being resized to.
        len: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A page read from source or destination failed or came up short.
    ///
    /// A short read below the expected page length means the file shrank
    /// mid-copy, which is treated as fatal rather than recovered from.
    #[error("failed to read page {page} of {}: {source}", path.display())]
    Read {
        /// Path the read targeted.
        path: PathBuf,
        /// Zero-based page index.
        page: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A differing page could not be written to the destination.
    #[error("failed to write page {page} of {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Zero-based page index.
        page: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result type for blockwise operations.
pub type Result<T> = std::result::Result<T, CopyError>;
