#![forbid(unsafe_code)]

//! Sequential big-endian reading over an in-memory buffer.

use solna_core::Error;

/// Source of keystore bytes consumed front to back.
///
/// Implementors supply [`read_bytes`](ByteSource::read_bytes) and
/// [`peek_bytes`](ByteSource::peek_bytes); the typed readers are built on top.
pub trait ByteSource<'a> {
    /// Consume exactly `len` bytes.
    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error>;

    /// Look at the next `len` bytes without consuming them.
    fn peek_bytes(&self, len: usize) -> Result<&'a [u8], Error>;

    /// Current offset from the start of the buffer.
    fn position(&self) -> usize;

    /// Number of unread bytes.
    fn remaining(&self) -> usize;

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    fn peek_u32(&self) -> Result<u32, Error> {
        let bytes = self.peek_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// A `u16`-length-prefixed UTF-8 string.
    fn read_utf(&mut self) -> Result<String, Error> {
        let offset = self.position();
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Format(format!("invalid UTF-8 string at offset {offset}: {e}")))
    }

    /// A `u32`-length-prefixed byte array.
    fn read_length_prefixed(&mut self) -> Result<&'a [u8], Error> {
        let len = self.read_u32()?;
        let len = usize::try_from(len)
            .map_err(|_| Error::Format(format!("length field {len} does not fit in memory")))?;
        self.read_bytes(len)
    }
}

/// Cursor over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct StreamReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StreamReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn slice(&self, len: usize) -> Result<&'a [u8], Error> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                Error::Format(format!(
                    "truncated keystore: need {len} bytes at offset {}, {} available",
                    self.pos,
                    self.remaining()
                ))
            })?;
        Ok(&self.data[self.pos..end])
    }
}

impl<'a> ByteSource<'a> for StreamReader<'a> {
    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let bytes = self.slice(len)?;
        self.pos += len;
        Ok(bytes)
    }

    fn peek_bytes(&self, len: usize) -> Result<&'a [u8], Error> {
        self.slice(len)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}
