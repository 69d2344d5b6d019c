//! A zero-filled virtual image with a few written regions, so layouts whose
//! partitions start hundreds of megabytes in can be tested without
//! allocating them.

use std::io::{self, Read, Seek, SeekFrom};

pub(crate) struct SparseImage {
    len: u64,
    pos: u64,
    patches: Vec<(u64, Vec<u8>)>,
}

impl SparseImage {
    pub(crate) fn new(len: u64) -> Self {
        Self {
            len,
            pos: 0,
            patches: Vec::new(),
        }
    }

    /// Write `data` at `offset`. Later writes win where they overlap.
    pub(crate) fn write(&mut self, offset: u64, data: &[u8]) {
        assert!(offset + data.len() as u64 <= self.len, "patch past end");
        self.patches.push((offset, data.to_vec()));
    }
}

impl Read for SparseImage {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let start = self.pos;
        let n = (self.len.saturating_sub(start)).min(buf.len() as u64) as usize;
        let out = &mut buf[..n];
        out.fill(0);
        let end = start + n as u64;
        for (offset, data) in &self.patches {
            let p_end = offset + data.len() as u64;
            if *offset >= end || p_end <= start {
                continue;
            }
            let from = (*offset).max(start);
            let to = p_end.min(end);
            let dst = (from - start) as usize..(to - start) as usize;
            let src = (from - offset) as usize..(to - offset) as usize;
            out[dst].copy_from_slice(&data[src]);
        }
        self.pos = end;
        Ok(n)
    }
}

impl Seek for SparseImage {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let next = match pos {
            SeekFrom::Start(p) => p as i128,
            SeekFrom::End(d) => self.len as i128 + d as i128,
            SeekFrom::Current(d) => self.pos as i128 + d as i128,
        };
        if next < 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "negative seek"));
        }
        self.pos = next as u64;
        Ok(self.pos)
    }
}
