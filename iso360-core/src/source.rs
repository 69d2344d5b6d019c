//! Bounds-checked random access over a disc image or an extracted file.

use std::io::{Read, Seek, SeekFrom};

use crate::error::ReadError;

/// A seekable byte source with a fixed total length.
///
/// Every read is checked against the length captured at construction, so a
/// range that runs past the end fails with [`ReadError::TruncatedRead`]
/// instead of returning a short buffer.
#[derive(Debug)]
pub struct ByteSource<R> {
    inner: R,
    len: u64,
}

impl<R: Read + Seek> ByteSource<R> {
    /// Wrap a reader, measuring its length by seeking to the end.
    pub fn new(mut inner: R) -> Result<Self, ReadError> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self { inner, len })
    }

    /// Total length of the source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fill `buf` with the bytes starting at `offset`.
    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        let want = buf.len() as u64;
        let end = offset
            .checked_add(want)
            .ok_or_else(|| ReadError::truncated(offset, want, self.len))?;
        if end > self.len {
            return Err(ReadError::truncated(offset, want, self.len));
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ReadError::truncated(offset, want, self.len)
            } else {
                ReadError::Io(e)
            }
        })
    }

    /// Read `len` bytes at `offset` into a new buffer.
    pub fn read_vec(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, ReadError> {
        // Check before allocating: `len` often comes straight from the image.
        if offset.saturating_add(len as u64) > self.len {
            return Err(ReadError::truncated(offset, len as u64, self.len));
        }
        let mut buf = vec![0u8; len];
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Read a fixed-size array at `offset`.
    pub fn read_array<const N: usize>(&mut self, offset: u64) -> Result<[u8; N], ReadError> {
        let mut buf = [0u8; N];
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Read a little-endian u32 at `offset`.
    pub fn read_u32_le(&mut self, offset: u64) -> Result<u32, ReadError> {
        self.read_array::<4>(offset).map(u32::from_le_bytes)
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
