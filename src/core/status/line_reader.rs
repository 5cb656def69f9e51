//! Positioned reads over line-oriented pseudo-files.
//!
//! Everything here goes through `pread(2)` so the file cursor is never moved
//! and the same handle can be sampled at arbitrary offsets every cycle.

use std::fs::File;
use std::io::{self, ErrorKind};
use std::os::unix::fs::FileExt;

use crate::error::{Result, StatusError};

const PROBE_CHUNK: usize = 32;

/// Fill `buf` starting at `offset`, retrying partial reads.
///
/// Stops early only at end-of-file, so the returned count is smaller than
/// `buf.len()` exactly when the file ended first.
pub fn read_at_most(file: &File, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;

    while total < buf.len() {
        match file.read_at(&mut buf[total..], offset + total as u64) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(total)
}

/// Read exactly one fixed-width line at `offset` into `buf`.
///
/// A short read means the field line is not where the layout says it is,
/// which callers treat like any other read failure.
pub fn read_line_at(file: &File, offset: u64, buf: &mut [u8]) -> Result<()> {
    let got = read_at_most(file, offset, buf)?;

    if got < buf.len() {
        return Err(StatusError::ShortRead {
            offset,
            expected: buf.len(),
            got,
        });
    }

    Ok(())
}

/// Discover the width of the first line (terminator included).
///
/// Reads growing chunks from offset 0 until a `\n` shows up; the probe buffer
/// is dropped on return.
pub fn probe_line_width(file: &File) -> Result<usize> {
    let mut chunk = PROBE_CHUNK;

    loop {
        let mut probe = vec![0u8; chunk];
        let got = read_at_most(file, 0, &mut probe)?;

        if let Some(pos) = probe[..got].iter().position(|&b| b == b'\n') {
            return Ok(pos + 1);
        }

        if got < chunk {
            return Err(StatusError::setup(format!(
                "no line terminator in the first {} bytes",
                got
            )));
        }

        chunk *= 2;
    }
}

/// Read the whole file through positioned reads.
pub fn read_all_at(file: &File) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut chunk = vec![0u8; 4096];
    let mut offset = 0u64;

    loop {
        let got = read_at_most(file, offset, &mut chunk)?;
        data.extend_from_slice(&chunk[..got]);
        if got < chunk.len() {
            return Ok(data);
        }
        offset += got as u64;
    }
}
