//! Stream codecs for compressed archive containers.
//!
//! Source distributions arrive as `.tar.gz` or `.tar.bz2` files; the tar
//! layer underneath is the same, only the outer stream differs. This crate
//! wraps the codec libraries behind a single [`Compression`] enum, providing:
//!
//! - **Format detection** from the immediate file extension
//!   ([`Compression::from_path`])
//! - **Streaming** decompression via a wrapped reader
//!   ([`Compression::wrap_reader`])
//! - **In-memory** compression behind the `fixtures` feature, so tests can
//!   produce archives; the mirror itself only ever reads.

mod construct;
pub mod error;
mod ops;

/// A supported compression format. Defaults to [`None`](Self::None).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Bzip2 compression (.bz2)
    Bzip2,
    /// Gzip compression (.gz)
    Gzip,
}
