use crate::error::{Error, Result};
use crate::structs::Vector3;

/// Little-endian byte cursor over a single lump's content.
///
/// The container hands each content reader a cursor over exactly that
/// lump's bytes; all multi-byte values in the format are little-endian.
pub struct LumpReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LumpReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        self.pos += n;
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        if self.remaining() < 1 {
            return Err(Error::UnexpectedEof);
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.read_bytes(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_vector3(&mut self) -> Result<Vector3> {
        Ok(Vector3 {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
        })
    }

    /// Read a record count declared as a 4-byte signed integer.
    /// Negative counts are rejected before any allocation happens.
    pub fn read_count(&mut self) -> Result<usize> {
        let v = self.read_i32()?;
        usize::try_from(v).map_err(|_| Error::NegativeCount(v))
    }

    /// Read `n` bytes holding a NUL-padded string, decoding up to the
    /// first NUL byte (lossy UTF-8).
    pub fn read_string_fixed(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(n);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Read all remaining bytes verbatim.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        let mut reader = LumpReader::new(&data);

        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16().unwrap(), 0x0302);
        assert_eq!(reader.read_u32().unwrap(), 0x07060504);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_short_read_fails() {
        let data = [0x01, 0x02];
        let mut reader = LumpReader::new(&data);
        assert!(matches!(reader.read_u32(), Err(Error::UnexpectedEof)));
        // position untouched by the failed read
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_string_fixed() {
        let data = b"a.mdl\0\0\0";
        let mut reader = LumpReader::new(data);
        assert_eq!(reader.read_string_fixed(8).unwrap(), "a.mdl");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_count_rejects_negative() {
        let data = (-3i32).to_le_bytes();
        let mut reader = LumpReader::new(&data);
        assert!(matches!(reader.read_count(), Err(Error::NegativeCount(-3))));
    }

    #[test]
    fn test_read_remaining() {
        let data = [1, 2, 3, 4];
        let mut reader = LumpReader::new(&data);
        reader.read_u8().unwrap();
        assert_eq!(reader.read_remaining(), &[2, 3, 4]);
        assert!(reader.is_empty());
    }
}
