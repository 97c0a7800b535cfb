//! File backed byte sources and sinks.
//!
//! The wrappers only move whole byte ranges; every bit level decision is
//! made by [`crate::codec`]. Each wrapper owns exactly one handle and one
//! in-progress range. Handles are released when the wrapper is dropped, or
//! after [`TileWriter::close`] consumes it, never both.
//!
//! [`TileWriter`] flushes every range before reporting it written, so a
//! writer dropped without `close` has nothing left to lose in its buffer.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::codec::{decode, decode_into, encode};
use crate::{TilepackError, WidthPattern};

/// Readable side of the codec boundary.
pub trait ByteSource {
    /// Total length of the underlying stream in bytes.
    fn size(&mut self) -> Result<u64, TilepackError>;

    /// Read exactly `n` bytes from the current position.
    ///
    /// Fails with [`TilepackError::InsufficientInput`] when fewer than `n`
    /// bytes remain.
    fn read_range(&mut self, n: usize) -> Result<Vec<u8>, TilepackError>;
}

/// Writable side of the codec boundary.
pub trait ByteSink {
    /// Write all of `bytes`, returning how many were written. A short write
    /// or failed flush is an error, never a smaller count.
    fn write_range(&mut self, bytes: &[u8]) -> Result<usize, TilepackError>;

    fn flush(&mut self) -> Result<(), TilepackError>;
}

/// Decodes tiles from byte ranges of a seekable reader.
#[derive(Debug)]
pub struct TileReader<R> {
    inner: R,
    size: Option<u64>,
    last_len: usize,
}

impl TileReader<BufReader<File>> {
    /// Open `path` for binary reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TilepackError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read + Seek> TileReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            size: None,
            last_len: 0,
        }
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, TilepackError> {
        Ok(self.inner.seek(pos)?)
    }

    /// Current byte offset.
    pub fn position(&mut self) -> Result<u64, TilepackError> {
        Ok(self.inner.stream_position()?)
    }

    /// Bytes left between the current position and the end of the stream.
    pub fn remaining(&mut self) -> Result<u64, TilepackError> {
        let size = self.size()?;
        let pos = self.position()?;
        Ok(size.saturating_sub(pos))
    }

    /// Read `n` bytes and decode every whole tile they hold.
    pub fn read_tiles(
        &mut self,
        n: usize,
        pattern: &WidthPattern,
    ) -> Result<Vec<u16>, TilepackError> {
        let bytes = self.read_range(n)?;
        let values = decode(pattern, &bytes)?;
        self.last_len = values.len();
        Ok(values)
    }

    /// Like [`TileReader::read_tiles`] but decodes into `out`.
    ///
    /// `out` is sized in values, not bytes; use
    /// [`crate::decoded_length`] with `n` to find how many it must hold.
    pub fn read_tiles_into(
        &mut self,
        n: usize,
        pattern: &WidthPattern,
        out: &mut [u16],
    ) -> Result<usize, TilepackError> {
        let bytes = self.read_range(n)?;
        let count = decode_into(pattern, &bytes, out)?;
        self.last_len = count;
        Ok(count)
    }

    /// Number of values produced by the most recent decode.
    pub fn last_len(&self) -> usize {
        self.last_len
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for TileReader<R> {
    fn size(&mut self) -> Result<u64, TilepackError> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        let pos = self.inner.stream_position()?;
        let size = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(pos))?;
        self.size = Some(size);
        Ok(size)
    }

    fn read_range(&mut self, n: usize) -> Result<Vec<u8>, TilepackError> {
        let remaining = self.remaining()?;
        if n as u64 > remaining {
            return Err(TilepackError::InsufficientInput {
                needed_bits: n * 8,
                available_bits: remaining as usize * 8,
            });
        }
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf)?;
        debug!(bytes = n, "read range");
        Ok(buf)
    }
}

/// Encodes tiles and writes the packed bytes to a writer.
#[derive(Debug)]
pub struct TileWriter<W: Write> {
    inner: W,
    last_len: usize,
}

impl TileWriter<BufWriter<File>> {
    /// Create or truncate `path` for binary writing.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TilepackError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Flush buffered bytes, sync them to disk and release the handle.
    pub fn close(self) -> Result<(), TilepackError> {
        let file = self.finish()?.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }
}

impl<W: Write> TileWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, last_len: 0 }
    }

    /// Encode `values` and write exactly `encoded_length` bytes.
    pub fn write_tiles(
        &mut self,
        values: &[u16],
        pattern: &WidthPattern,
    ) -> Result<usize, TilepackError> {
        let bytes = encode(pattern, values)?;
        let written = self.write_range(&bytes)?;
        self.last_len = written;
        Ok(written)
    }

    /// Number of bytes written by the most recent encode.
    pub fn last_len(&self) -> usize {
        self.last_len
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, TilepackError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write + Seek> TileWriter<W> {
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, TilepackError> {
        Ok(self.inner.seek(pos)?)
    }

    pub fn position(&mut self) -> Result<u64, TilepackError> {
        Ok(self.inner.stream_position()?)
    }
}

impl<W: Write> ByteSink for TileWriter<W> {
    fn write_range(&mut self, bytes: &[u8]) -> Result<usize, TilepackError> {
        self.inner.write_all(bytes)?;
        self.inner.flush()?;
        debug!(bytes = bytes.len(), "wrote range");
        Ok(bytes.len())
    }

    fn flush(&mut self) -> Result<(), TilepackError> {
        Ok(self.inner.flush()?)
    }
}
