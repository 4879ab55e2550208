//! # tarrs Compression Utilities (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//!
//! ## Overview
//!
//! Provides `OutputEncoder`, the optional gzip layer between the tar builder
//! and the destination file. Both variants stream: the gzip variant compresses
//! data as it is written, so nothing is accumulated beyond `flate2`'s internal
//! buffers.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::compression::OutputEncoder;
//! use std::io::Write;
//!
//! # fn main() -> std::io::Result<()> {
//! let mut encoder = OutputEncoder::new(Vec::new(), true);
//! encoder.write_all(b"Some data to compress")?;
//! let gz_bytes: Vec<u8> = encoder.finish()?;
//! # Ok(())
//! # }
//! ```
//!
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// A writer that either passes bytes through or gzip-compresses them.
pub enum OutputEncoder<W: Write> {
    Plain(W),
    Gzip(GzEncoder<W>),
}

impl<W: Write> OutputEncoder<W> {
    /// Wraps `inner`, compressing with the default gzip level when `compress` is set.
    pub fn new(inner: W, compress: bool) -> Self {
        if compress {
            OutputEncoder::Gzip(GzEncoder::new(inner, Compression::default()))
        } else {
            OutputEncoder::Plain(inner)
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, OutputEncoder::Gzip(_))
    }

    /// Flushes everything (including the gzip trailer) and returns the inner writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            OutputEncoder::Plain(mut inner) => {
                inner.flush()?;
                Ok(inner)
            }
            OutputEncoder::Gzip(encoder) => encoder.finish(),
        }
    }
}

impl<W: Write> Write for OutputEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputEncoder::Plain(inner) => inner.write(buf),
            OutputEncoder::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputEncoder::Plain(inner) => inner.flush(),
            OutputEncoder::Gzip(encoder) => encoder.flush(),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_plain_passthrough() -> io::Result<()> {
        let mut encoder = OutputEncoder::new(Vec::new(), false);
        assert!(!encoder.is_compressed());
        encoder.write_all(b"raw bytes")?;
        assert_eq!(encoder.finish()?, b"raw bytes");
        Ok(())
    }

    #[test]
    fn test_gzip_decodes_back() -> io::Result<()> {
        let mut encoder = OutputEncoder::new(Vec::new(), true);
        assert!(encoder.is_compressed());
        encoder.write_all(b"Hello World!")?;
        let compressed = encoder.finish()?;
        // gzip magic number
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoded = String::new();
        GzDecoder::new(compressed.as_slice()).read_to_string(&mut decoded)?;
        assert_eq!(decoded, "Hello World!");
        Ok(())
    }
}
