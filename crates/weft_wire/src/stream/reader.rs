use std::io::{self, Read};

use super::varint;
use crate::error::{MalformedError, Result};

/// Byte source with the stream's integer and length encodings.
///
/// Tracks how many bytes were consumed so that framed payloads can be
/// checked against their declared length.
///
/// # Examples
///
/// ```
/// use weft_wire::stream::ByteReader;
///
/// let mut input = ByteReader::new(&[0xAC, 0x02, 2, b'a', b'b'][..]);
/// assert_eq!(input.read_varint().unwrap(), 300);
/// assert_eq!(input.read_prefixed(16).unwrap(), b"ab");
/// assert_eq!(input.position(), 5);
/// ```
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    #[inline]
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub const fn position(&self) -> u64 {
        self.position
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut buf = [0; N];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    #[inline]
    pub fn read_u8(&mut self) -> io::Result<u8> {
        let [byte] = self.read_array()?;
        Ok(byte)
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let (mut acc, mut shift) = (0, 0);
        loop {
            let byte = self.read_u8()?;
            match varint::accumulate(&mut acc, &mut shift, byte) {
                Ok(true) => return Ok(acc),
                Ok(false) => {}
                Err(()) => return Err(MalformedError::VarintOverflow.into()),
            }
        }
    }

    /// Reads a varint length, rejecting anything above `limit`.
    pub fn read_len(&mut self, limit: usize) -> Result<usize> {
        let len = self.read_varint()?;
        match usize::try_from(len) {
            Ok(len) if len <= limit => Ok(len),
            _ => Err(MalformedError::LengthLimit { len, limit }.into()),
        }
    }

    /// Reads exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, a bogus length fails
    /// with an end-of-stream error instead of a huge allocation.
    pub fn read_vec(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(4096));
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        self.position += read as u64;
        if read < len {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(buf)
    }

    /// Reads a varint length, then that many bytes.
    pub fn read_prefixed(&mut self, limit: usize) -> Result<Vec<u8>> {
        let len = self.read_len(limit)?;
        Ok(self.read_vec(len)?)
    }

    /// Discards exactly `len` bytes.
    pub fn skip(&mut self, len: u64) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(len), &mut io::sink())?;
        self.position += skipped;
        if skipped < len {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        Ok(())
    }
}
