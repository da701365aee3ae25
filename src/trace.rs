//! Diagnostic trace sink for copy operations.
//!
//! The copier reports each page decision through a caller-supplied sink.
//! Tracing is fire-and-forget: the copier never depends on a sink's side
//! effects for correctness, and a sink must not block indefinitely since it
//! is invoked synchronously on the calling thread.

use std::fmt;

/// Sink for diagnostic trace messages.
///
/// Implemented for any `FnMut(fmt::Arguments)` closure, so most callers pass
/// a closure directly:
///
/// ```rust
/// use blockwise::TraceSink;
///
/// let mut lines = Vec::new();
/// let mut sink = |args: std::fmt::Arguments<'_>| lines.push(args.to_string());
/// sink.trace(format_args!("page {}: clean", 0));
/// assert_eq!(lines, ["page 0: clean"]);
/// ```
pub trait TraceSink {
    /// Record one preformatted message.
    fn trace(&mut self, args: fmt::Arguments<'_>);
}

impl<F> TraceSink for F
where
    F: FnMut(fmt::Arguments<'_>),
{
    fn trace(&mut self, args: fmt::Arguments<'_>) {
        self(args);
    }
}

/// A sink that drops every message.
///
/// ```rust
/// use blockwise::{copy_blockwise, discard};
/// # let dir = tempfile::tempdir().unwrap();
/// # let src = dir.path().join("src");
/// # let dst = dir.path().join("dst");
/// # std::fs::write(&src, b"data").unwrap();
/// let stats = copy_blockwise(&mut discard, &src, &dst).unwrap();
/// assert_eq!(stats.pages_written, 1);
/// ```
pub fn discard(_args: fmt::Arguments<'_>) {}
