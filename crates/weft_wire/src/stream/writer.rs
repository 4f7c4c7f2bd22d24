use std::io::{self, Write};

use super::varint::{self, MAX_VARINT_LEN};

/// Byte sink with the stream's integer and length encodings.
///
/// # Examples
///
/// ```
/// use weft_wire::stream::ByteWriter;
///
/// let mut out = ByteWriter::new(Vec::new());
/// out.write_varint(300).unwrap();
/// out.write_prefixed(b"ab").unwrap();
/// assert_eq!(out.written(), 5);
/// assert_eq!(out.into_inner(), [0xAC, 0x02, 2, b'a', b'b']);
/// ```
#[derive(Debug)]
pub struct ByteWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> ByteWriter<W> {
    #[inline]
    pub const fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub const fn written(&self) -> u64 {
        self.written
    }

    #[inline]
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutable access to the sink; bytes written through it are not counted.
    #[inline]
    pub const fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    #[inline]
    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    #[inline]
    pub fn write_u8(&mut self, byte: u8) -> io::Result<()> {
        self.write_all(&[byte])
    }

    pub fn write_varint(&mut self, value: u64) -> io::Result<()> {
        let mut buf = [0; MAX_VARINT_LEN];
        let len = varint::encode(value, &mut buf);
        self.write_all(&buf[..len])
    }

    #[inline]
    pub fn write_len(&mut self, len: usize) -> io::Result<()> {
        self.write_varint(len as u64)
    }

    /// Writes a varint length followed by `bytes`.
    pub fn write_prefixed(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_len(bytes.len())?;
        self.write_all(bytes)
    }

    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
