//! Byte sources feeding the buffer window.
//!
//! A [`Source`] fills a caller-provided buffer and reports how many bytes it
//! wrote. Returning fewer bytes than the buffer holds (including zero) means
//! the stream has ended; the reader never calls `read` again after that.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Supplier of raw input bytes.
pub trait Source {
    /// Fill `buf` from the stream.
    ///
    /// Implementations must only return a short count at end of stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }
}

/// In-memory source over a borrowed byte slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl Source for SliceSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Adapter turning any [`io::Read`] into a [`Source`].
///
/// `io::Read` may legally return short counts mid-stream (pipes, sockets).
/// This adapter keeps reading until the buffer is full or the reader reports
/// end of stream, so short counts keep their end-of-stream meaning.
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl ReadSource<File> {
    /// Open a file for streaming.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        File::open(path).map(Self::new)
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}
