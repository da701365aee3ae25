//! Page-comparing copy engine.
//!
//! This module provides the [`Copier`] engine and the [`copy_blockwise`]
//! convenience function. A copy walks source and destination in page-sized
//! steps, comparing each pair of pages byte-for-byte and writing only the
//! pages that differ. Identical pages are never rewritten, so on
//! copy-on-write storage their physical blocks stay shared.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{CopyError, Result};
use crate::stats::{page_count, CopyStats};
use crate::trace::TraceSink;

/// Default page size in bytes.
///
/// Matches the common filesystem block size, so an unmodified page maps to
/// an unmodified on-disk block.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Configuration for a copy engine.
#[derive(Debug, Clone)]
pub struct CopierConfig {
    /// Page size for comparison and I/O (must be a power of 2, 512-65536).
    pub page_size: usize,
}

impl Default for CopierConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Builder for creating copy engines with custom configuration.
///
/// # Example
///
/// ```rust
/// use blockwise::CopierBuilder;
///
/// let copier = CopierBuilder::new().page_size(8192).build();
/// assert_eq!(copier.page_size(), 8192);
/// ```
#[derive(Debug, Clone)]
pub struct CopierBuilder {
    config: CopierConfig,
}

impl CopierBuilder {
    /// Create a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CopierConfig::default(),
        }
    }

    /// Set the page size for comparison and I/O.
    ///
    /// Must be a power of 2 between 512 and 65536.
    ///
    /// # Panics
    ///
    /// Panics if the page size is invalid.
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        assert!(
            size.is_power_of_two() && (512..=65536).contains(&size),
            "Page size must be power of 2, 512-65536"
        );
        self.config.page_size = size;
        self
    }

    /// Build the copy engine.
    #[must_use]
    pub fn build(self) -> Copier {
        Copier {
            config: self.config,
        }
    }
}

impl Default for CopierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write-sparing copy engine.
///
/// `Copier` holds configuration only. Each [`copy`](Copier::copy) call is
/// self-contained: it owns both file handles for its duration and releases
/// them on every exit path, success or failure.
#[derive(Debug, Clone)]
pub struct Copier {
    config: CopierConfig,
}

impl Copier {
    /// Create a new copy engine with the default page size.
    #[must_use]
    pub fn new() -> Self {
        CopierBuilder::new().build()
    }

    /// Create a copy engine with a custom page size.
    ///
    /// # Panics
    ///
    /// Panics if the page size is invalid.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        CopierBuilder::new().page_size(page_size).build()
    }

    /// Get the configured page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Copy `source` over `dest`, rewriting only the pages that differ.
    ///
    /// The destination is created if absent and resized to the source length
    /// before the scan, so trailing bytes never survive and a missing tail
    /// reads back as zeros. Each page decision is reported through `trace`.
    ///
    /// Concurrent calls against different destinations are independent;
    /// concurrent writers to one destination are unsynchronized and produce
    /// undefined interleaving.
    ///
    /// # Errors
    ///
    /// Returns the first I/O failure, classified by phase. The scan stops
    /// there: no partial stats, no retry, and no rollback of pages already
    /// written.
    pub fn copy<L: TraceSink>(
        &self,
        trace: &mut L,
        source: &Path,
        dest: &Path,
    ) -> Result<CopyStats> {
        let mut src = File::open(source).map_err(|e| CopyError::Open {
            path: source.to_path_buf(),
            source: e,
        })?;
        let src_len = src
            .metadata()
            .map_err(|e| CopyError::Stat {
                path: source.to_path_buf(),
                source: e,
            })?
            .len();

        let mut dst = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dest)
            .map_err(|e| CopyError::Open {
                path: dest.to_path_buf(),
                source: e,
            })?;
        let dst_len = dst
            .metadata()
            .map_err(|e| CopyError::Stat {
                path: dest.to_path_buf(),
                source: e,
            })?
            .len();

        // Reconcile length first: truncation drops any stale tail, extension
        // reads back as zeros, so every page read below is full-length.
        if dst_len != src_len {
            dst.set_len(src_len).map_err(|e| CopyError::Resize {
                path: dest.to_path_buf(),
                len: src_len,
                source: e,
            })?;
        }

        let page_size = self.config.page_size as u64;
        let mut src_page = vec![0u8; self.config.page_size];
        let mut dst_page = vec![0u8; self.config.page_size];
        let mut stats = CopyStats::default();

        let mut page = 0u64;
        let mut offset = 0u64;
        while offset < src_len {
            #[allow(clippy::cast_possible_truncation)]
            let len = page_size.min(src_len - offset) as usize;

            // An UnexpectedEof here means the file shrank mid-copy. Fatal.
            src.read_exact(&mut src_page[..len])
                .map_err(|e| CopyError::Read {
                    path: source.to_path_buf(),
                    page,
                    source: e,
                })?;
            dst.read_exact(&mut dst_page[..len])
                .map_err(|e| CopyError::Read {
                    path: dest.to_path_buf(),
                    page,
                    source: e,
                })?;

            if src_page[..len] == dst_page[..len] {
                // Identical page: issue no write so the destination's
                // physical block stays untouched.
                stats.pages_unmodified += 1;
                trace.trace(format_args!("page {page}: clean ({len} bytes)"));
            } else {
                // The sequential read advanced the cursor past this page,
                // so step back before rewriting it. After write_all the
                // cursor lands where the next read expects it.
                dst.seek(SeekFrom::Start(offset))
                    .map_err(|e| CopyError::Write {
                        path: dest.to_path_buf(),
                        page,
                        source: e,
                    })?;
                dst.write_all(&src_page[..len])
                    .map_err(|e| CopyError::Write {
                        path: dest.to_path_buf(),
                        page,
                        source: e,
                    })?;
                stats.pages_written += 1;
                trace.trace(format_args!("page {page}: rewritten ({len} bytes)"));
            }

            offset += len as u64;
            page += 1;
        }

        debug_assert_eq!(stats.total_pages(), page_count(src_len, page_size));
        Ok(stats)
    }
}

impl Default for Copier {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy `source` over `dest` with the default page size.
///
/// Convenience wrapper over [`Copier::copy`].
///
/// # Example
///
/// ```rust
/// use blockwise::{copy_blockwise, discard};
///
/// let dir = tempfile::tempdir().unwrap();
/// let src = dir.path().join("src.bin");
/// let dst = dir.path().join("dst.bin");
/// std::fs::write(&src, b"hello world").unwrap();
///
/// let stats = copy_blockwise(&mut discard, &src, &dst).unwrap();
/// assert_eq!(stats.pages_written, 1);
/// assert_eq!(std::fs::read(&dst).unwrap(), b"hello world");
/// ```
///
/// # Errors
///
/// Returns the first I/O failure, classified by phase.
pub fn copy_blockwise<L: TraceSink>(
    trace: &mut L,
    source: &Path,
    dest: &Path,
) -> Result<CopyStats> {
    Copier::new().copy(trace, source, dest)
}
