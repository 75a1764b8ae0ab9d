//! Versioned little-endian byte layout shared by all serialisable types.
//!
//! Every encoded object starts with a fixed class-name/version tag. Readers
//! consume exactly as many bytes as the expected tag and compare them before
//! decoding anything else.
//!
//! ```text
//! [tag bytes][payload...]
//! container = [len: u64 LE][len * f64 LE]
//! ```

use crate::error::InterpolationError;

/// Layout revision appended to every class tag.
pub const FORMAT_VERSION: u32 = 1;

/// Build the tag for a class name, e.g. `LinearInterpolator_V1`.
pub fn version_tag(class_name: &str) -> String {
    format!("{}_V{}", class_name, FORMAT_VERSION)
}

/// Append-only byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the raw tag bytes (no length prefix).
    pub fn write_tag(&mut self, tag: &str) {
        self.buf.extend_from_slice(tag.as_bytes());
    }

    /// Write one byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a u64 in little-endian order.
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write an f64 in little-endian order.
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a length-prefixed container of f64 values.
    pub fn write_f64_slice(&mut self, values: &[f64]) {
        self.write_u64(values.len() as u64);
        for &v in values {
            self.write_f64(v);
        }
    }

    /// Consume the writer and return the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over an encoded buffer.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes not consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], InterpolationError> {
        if self.remaining() < n {
            return Err(InterpolationError::decode(format!(
                "buffer truncated: need {} bytes at offset {}, {} available",
                n,
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read and verify a class tag.
    ///
    /// A short buffer is reported as a version mismatch as well: whatever was
    /// written there is not the expected class.
    pub fn read_tag(&mut self, expected: &str) -> Result<(), InterpolationError> {
        let n = expected.len().min(self.remaining());
        let raw = self.take(n)?;
        let found = String::from_utf8_lossy(raw);
        if n != expected.len() || found != expected {
            return Err(InterpolationError::VersionMismatch {
                expected: expected.to_string(),
                found: found.into_owned(),
            });
        }
        Ok(())
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8, InterpolationError> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, InterpolationError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(raw))
    }

    /// Read a little-endian f64.
    pub fn read_f64(&mut self) -> Result<f64, InterpolationError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.take(8)?);
        Ok(f64::from_le_bytes(raw))
    }

    /// Read a container length and check it fits in the remaining buffer.
    pub fn read_len(&mut self, bytes_per_item: usize) -> Result<usize, InterpolationError> {
        let len = self.read_u64()?;
        let len = usize::try_from(len)
            .map_err(|_| InterpolationError::decode(format!("container length {} too large", len)))?;
        if len.saturating_mul(bytes_per_item) > self.remaining() {
            return Err(InterpolationError::decode(format!(
                "container of {} items does not fit in remaining {} bytes",
                len,
                self.remaining()
            )));
        }
        Ok(len)
    }

    /// Read a length-prefixed container of f64 values.
    pub fn read_f64_vec(&mut self) -> Result<Vec<f64>, InterpolationError> {
        let len = self.read_len(8)?;
        (0..len).map(|_| self.read_f64()).collect()
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> Result<(), InterpolationError> {
        if self.remaining() != 0 {
            return Err(InterpolationError::decode(format!(
                "{} trailing bytes after decoded object",
                self.remaining()
            )));
        }
        Ok(())
    }
}
