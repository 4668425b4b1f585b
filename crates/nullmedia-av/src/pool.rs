//! Reusable buffers for peeking at file headers.
//!
//! Identification only ever looks at the first [`HEADER_WINDOW`] bytes of a
//! file. The pool keeps a free list of fixed-size buffers so that many short
//! identification calls do not allocate a fresh buffer each time.

use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

/// Largest number of bytes a header reader will peek.
pub const HEADER_WINDOW: usize = 64;

/// Idle buffers kept around; extra buffers are dropped on release.
const MAX_IDLE: usize = 256;

type Buffer = Box<[u8; HEADER_WINDOW]>;

/// A thread-safe free list of header buffers.
#[derive(Debug, Default)]
pub struct HeaderReaderPool {
    free: Mutex<Vec<Buffer>>,
}

impl HeaderReaderPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a buffer from the pool and fill it with the head of `source`.
    ///
    /// Reads until the window is full or `source` is exhausted, so sources
    /// shorter than the window yield a shorter header instead of an error.
    /// The buffer returns to the pool when the reader is dropped.
    ///
    /// This consumes up to [`HEADER_WINDOW`] bytes of `source`: pass
    /// `&mut reader` to keep it, and rewind it yourself if the bytes are
    /// needed again. [`peek_file`](Self::peek_file) opens its own handle and
    /// leaves the file untouched.
    pub fn acquire<R: Read>(&self, mut source: R) -> io::Result<HeaderReader<'_>> {
        let mut buf = self.free.lock().pop().unwrap_or_else(|| Box::new([0; HEADER_WINDOW]));

        let mut len = 0;
        while len < HEADER_WINDOW {
            match source.read(&mut buf[len..]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.release(buf);
                    return Err(e);
                }
            }
        }

        Ok(HeaderReader {
            pool: self,
            buf: Some(buf),
            len,
        })
    }

    /// Open `path` and peek at its header.
    pub fn peek_file(&self, path: &Path) -> io::Result<HeaderReader<'_>> {
        let file = File::open(path)?;
        self.acquire(file)
    }

    /// Number of buffers currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    fn release(&self, buf: Buffer) {
        let mut free = self.free.lock();
        if free.len() < MAX_IDLE {
            free.push(buf);
        }
    }
}

/// The first bytes of a source, held in a pooled buffer.
///
/// Exclusively owned by its caller until dropped or [`released`](Self::release).
#[derive(Debug)]
pub struct HeaderReader<'p> {
    pool: &'p HeaderReaderPool,
    buf: Option<Buffer>,
    len: usize,
}

impl HeaderReader<'_> {
    /// The peeked bytes; at most [`HEADER_WINDOW`] long.
    pub fn header(&self) -> &[u8] {
        match &self.buf {
            Some(buf) => &buf[..self.len],
            None => &[],
        }
    }

    /// Return the buffer to the pool now.
    pub fn release(self) {}
}

impl Deref for HeaderReader<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.header()
    }
}

impl Drop for HeaderReader<'_> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}
