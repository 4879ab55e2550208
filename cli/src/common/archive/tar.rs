//! # tarrs TAR Stream Writer (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! This module writes tar archives entry by entry, optionally gzip-compressed,
//! directly into any `Write` destination (normally the archive file).
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for the archive structure and the
//! `compression::OutputEncoder` for the optional gzip layer. The writer stack is:
//!
//! ```text
//! tar::Builder -> OutputEncoder (gzip | plain) -> CountingWriter -> BufWriter -> destination
//! ```
//!
//! - Each entry gets a ustar header carrying the relative name, size, mode and
//!   modification time of the source file. Names that do not fit the ustar
//!   fields fall back to the GNU long-name extension.
//! - File contents are copied through `io::copy`'s fixed-size buffer, so
//!   memory use does not depend on file or archive size.
//! - `CountingWriter` records how many bytes reached the destination.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::tar::TarStreamWriter;
//! # fn main() -> crate::core::error::Result<()> {
//! let file = std::fs::File::create("out.tgz")?;
//! let mut writer = TarStreamWriter::new(file, true);
//! writer.append_file(std::path::Path::new("src/main.rs"), "src/main.rs")?;
//! let (_file, summary) = writer.finish()?;
//! println!("{} entries, {} bytes", summary.entries, summary.bytes_written);
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::compression::OutputEncoder;
use crate::core::error::{Result, TarrsError};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tar::{Builder, Header, HeaderMode};
use tracing::debug;

/// Counts the bytes that pass through to the inner writer.
pub struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        CountingWriter { inner, count: 0 }
    }

    pub fn into_parts(self) -> (W, u64) {
        (self.inner, self.count)
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.count += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Totals reported once the archive is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TarSummary {
    pub entries: usize,
    pub bytes_written: u64,
}

/// Streams files into a tar (or tar.gz) archive.
pub struct TarStreamWriter<W: Write> {
    builder: Builder<OutputEncoder<CountingWriter<BufWriter<W>>>>,
    entries: usize,
}

impl<W: Write> TarStreamWriter<W> {
    /// Starts an archive on `dest`, gzip-wrapped when `compress` is set.
    pub fn new(dest: W, compress: bool) -> Self {
        let encoder = OutputEncoder::new(CountingWriter::new(BufWriter::new(dest)), compress);
        let mut builder = Builder::new(encoder);
        builder.mode(HeaderMode::Complete);
        TarStreamWriter {
            builder,
            entries: 0,
        }
    }

    /// Number of entries appended so far.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// # Append File (`append_file`)
    ///
    /// Appends the regular file at `source` under `entry_name` (a `/`-separated
    /// relative path). The source handle is opened here and closed before
    /// returning, whatever the outcome.
    ///
    /// ## Returns
    ///
    /// * `Result<u64>` - The size recorded in the entry header.
    ///
    /// ## Errors
    ///
    /// Returns a `TarrsError::Io` if the source cannot be opened or read, if it
    /// yields fewer bytes than its size when opened, or if writing the entry to
    /// the destination fails.
    pub fn append_file(&mut self, source: &Path, entry_name: &str) -> Result<u64> {
        let file = File::open(source)
            .map_err(|e| TarrsError::io(format!("Failed to open {}", source.display()), e))?;
        let metadata = file
            .metadata()
            .map_err(|e| TarrsError::io(format!("Failed to stat {}", source.display()), e))?;

        let mut header = Header::new_ustar();
        header.set_metadata_in_mode(&metadata, HeaderMode::Complete);
        let size = metadata.len();
        header.set_size(size);

        self.append_sized(&mut header, entry_name, file, size)?;
        debug!("Appended {} ({} bytes)", entry_name, size);
        Ok(size)
    }

    /// Appends `reader` as an entry whose header declares `size` bytes. The copy
    /// stops at `size`; a reader that ends early is an error, since the tar
    /// crate would otherwise pad the short entry and keep going.
    fn append_sized<R: Read>(
        &mut self,
        header: &mut Header,
        entry_name: &str,
        reader: R,
        size: u64,
    ) -> Result<()> {
        let mut limited = reader.take(size);
        self.builder
            .append_data(header, entry_name, &mut limited)
            .map_err(|e| {
                TarrsError::io(format!("Failed to add {} to the archive", entry_name), e)
            })?;

        let copied = size - limited.limit();
        if copied != size {
            return Err(TarrsError::io(
                format!(
                    "{} changed size while being archived ({} of {} bytes read)",
                    entry_name, copied, size
                ),
                io::Error::new(io::ErrorKind::UnexpectedEof, "source file shrank"),
            )
            .into());
        }

        self.entries += 1;
        Ok(())
    }

    /// # Finish Archive (`finish`)
    ///
    /// Writes the tar end-of-archive records, the gzip trailer if any, and
    /// flushes everything to the destination.
    ///
    /// ## Returns
    ///
    /// * `Result<(W, TarSummary)>` - The destination writer and the totals.
    pub fn finish(self) -> Result<(W, TarSummary)> {
        let entries = self.entries;
        let encoder = self
            .builder
            .into_inner()
            .map_err(|e| TarrsError::io("Failed to finalize tar archive structure", e))?;
        debug!(
            "Closing {} stream after {} entries",
            if encoder.is_compressed() { "gzip" } else { "plain" },
            entries
        );
        let counting = encoder
            .finish()
            .map_err(|e| TarrsError::io("Failed to finish gzip compression stream", e))?;
        let (buffered, bytes_written) = counting.into_parts();
        let mut dest = buffered
            .into_inner()
            .map_err(|e| TarrsError::io("Failed to flush archive", e.into_error()))?;
        dest.flush()
            .map_err(|e| TarrsError::io("Failed to flush archive", e))?;

        Ok((
            dest,
            TarSummary {
                entries,
                bytes_written,
            },
        ))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::collections::BTreeMap;
    use std::fs;
    use tar::Archive;
    use tempfile::tempdir;

    fn read_entries<R: Read>(reader: R) -> BTreeMap<String, String> {
        let mut archive = Archive::new(reader);
        let mut found = BTreeMap::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().replace('\\', "/");
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            found.insert(name, content);
        }
        found
    }

    #[test]
    fn test_plain_tar_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("hello.txt"), "Hello World!")?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("sub/inner.txt"), "inner")?;

        let mut writer = TarStreamWriter::new(Vec::new(), false);
        writer.append_file(&dir.path().join("hello.txt"), "hello.txt")?;
        writer.append_file(&dir.path().join("sub/inner.txt"), "sub/inner.txt")?;
        assert_eq!(writer.entries(), 2);
        let (bytes, summary) = writer.finish()?;

        assert_eq!(summary.entries, 2);
        assert_eq!(summary.bytes_written, bytes.len() as u64);
        let found = read_entries(bytes.as_slice());
        assert_eq!(found.len(), 2);
        assert_eq!(found["hello.txt"], "Hello World!");
        assert_eq!(found["sub/inner.txt"], "inner");
        Ok(())
    }

    #[test]
    fn test_gzip_tar_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "alpha")?;

        let mut writer = TarStreamWriter::new(Vec::new(), true);
        writer.append_file(&dir.path().join("a.txt"), "a.txt")?;
        let (bytes, summary) = writer.finish()?;

        assert_eq!(summary.bytes_written, bytes.len() as u64);
        let found = read_entries(GzDecoder::new(bytes.as_slice()));
        assert_eq!(found["a.txt"], "alpha");
        Ok(())
    }

    #[test]
    fn test_long_entry_name() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("f.txt"), "deep")?;
        let long_name = format!("{}/f.txt", "d".repeat(240));

        let mut writer = TarStreamWriter::new(Vec::new(), false);
        writer.append_file(&dir.path().join("f.txt"), &long_name)?;
        let (bytes, _) = writer.finish()?;

        let found = read_entries(bytes.as_slice());
        assert_eq!(found[&long_name], "deep");
        Ok(())
    }

    #[test]
    fn test_short_read_is_io_error() {
        let mut writer = TarStreamWriter::new(Vec::new(), false);
        let mut header = Header::new_ustar();
        header.set_size(10);
        header.set_mode(0o644);

        let err = writer
            .append_sized(&mut header, "shrunk.txt", &b"abcd"[..], 10)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::Io { .. })
        ));
        assert_eq!(
            err.to_string(),
            "shrunk.txt changed size while being archived (4 of 10 bytes read)"
        );
        assert_eq!(writer.entries(), 0);
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let mut writer = TarStreamWriter::new(Vec::new(), false);
        let err = writer
            .append_file(Path::new("/definitely/not/here.txt"), "here.txt")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TarrsError>(),
            Some(TarrsError::Io { .. })
        ));
        assert_eq!(writer.entries(), 0);
    }

    #[test]
    fn test_counting_writer() -> io::Result<()> {
        let mut counting = CountingWriter::new(Vec::new());
        counting.write_all(b"12345")?;
        let (inner, count) = counting.into_parts();
        assert_eq!(count, 5);
        assert_eq!(inner, b"12345");
        Ok(())
    }
}
