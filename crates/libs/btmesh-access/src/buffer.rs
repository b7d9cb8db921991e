use std::fmt;

use crate::error::{CodecError, ErrorKind};

/// Growable sink that schemas encode into.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    buffer: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn write(&mut self, data: &[u8]) -> usize {
        self.buffer.extend_from_slice(data);
        data.len()
    }

    pub fn write_byte(&mut self, byte: u8) -> usize {
        self.buffer.push(byte);
        1
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    /// Drops everything written after `offset`.
    pub fn truncate(&mut self, offset: usize) {
        self.buffer.truncate(offset);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

impl fmt::Display for OutputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ 0x")?;

        for byte in &self.buffer {
            write!(f, "{:0>2x}", byte)?;
        }

        write!(f, " ]",)
    }
}

/// Read cursor over a received payload.
#[derive(Debug, Clone)]
pub struct InputBuffer<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> InputBuffer<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { offset: 0, buffer }
    }

    pub fn read_slice(&mut self, size: usize) -> Result<&'a [u8], CodecError> {
        if size > self.bytes_left() {
            return Err(ErrorKind::TruncatedInput {
                offset: self.offset,
                needed: size,
                available: self.bytes_left(),
            }
            .into());
        }

        let slice = &self.buffer[self.offset..self.offset + size];

        self.offset += size;

        Ok(slice)
    }

    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        let slice = self.read_slice(1)?;

        Ok(slice[0])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);

        Ok(buf)
    }

    pub fn bytes_left(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.buffer[self.offset..]
    }

    /// Moves the cursor back to a previously observed offset.
    pub(crate) fn rewind(&mut self, offset: usize) {
        self.offset = offset.min(self.buffer.len());
    }
}

impl fmt::Display for InputBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ 0x")?;

        for byte in self.remaining() {
            write!(f, "{:0>2x}", byte)?;
        }

        write!(f, " ]",)
    }
}
