//! Little-endian byte writer

/// Cursor over a pre-sized byte buffer
///
/// Each write stores its value at the current position and advances it.
/// The buffer is sized up front by the caller, so writes never reallocate.
///
/// # Panics
/// Writing past the end of the buffer panics; callers size the buffer from
/// the same arithmetic that drives the writes.
#[derive(Debug)]
pub struct LeWriter<'a> {
    bytes: &'a mut [u8],
    pos: usize,
}

impl<'a> LeWriter<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    #[inline]
    fn put<const N: usize>(&mut self, data: [u8; N]) {
        self.bytes[self.pos..self.pos + N].copy_from_slice(&data);
        self.pos += N;
    }

    /// Write a four-character chunk identifier
    #[inline]
    pub fn write_tag(&mut self, tag: &[u8; 4]) {
        self.put(*tag);
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.put(value.to_le_bytes());
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) {
        self.put(value.to_le_bytes());
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.put(value.to_le_bytes());
    }

    /// Bytes written so far
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the buffer
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}
