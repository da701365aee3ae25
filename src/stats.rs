//! Page accounting for copy operations.

use serde::{Deserialize, Serialize};

/// Number of whole or partial pages needed to cover `len` bytes.
///
/// Returns 0 for an empty file. The final page of a file whose length is not
/// a multiple of `page_size` still counts as one page.
///
/// # Example
///
/// ```rust
/// use blockwise::page_count;
///
/// assert_eq!(page_count(0, 4096), 0);
/// assert_eq!(page_count(4096, 4096), 1);
/// assert_eq!(page_count(4097, 4096), 2);
/// ```
#[must_use]
pub const fn page_count(len: u64, page_size: u64) -> u64 {
    len.div_ceil(page_size)
}

/// Statistics from one copy invocation.
///
/// Created fresh per call, populated during the scan, and returned by value.
/// For every successful run, `pages_written + pages_unmodified` equals
/// [`page_count`] of the source length at the configured page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyStats {
    /// Pages rewritten because their content differed, or because the
    /// destination did not yet cover that range.
    pub pages_written: u64,
    /// Pages left untouched because the destination already matched.
    pub pages_unmodified: u64,
}

impl CopyStats {
    /// Total pages examined.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.pages_written + self.pages_unmodified
    }

    /// Whether the run issued no writes at all.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.pages_written == 0
    }
}
