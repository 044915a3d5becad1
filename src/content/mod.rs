//! Content readers: stateless or lightly parametrized decoders that turn
//! one lump's byte cursor into structured data.
//!
//! Every reader also defines an *empty* value; when a lump fails to
//! decode, the orchestrator logs the error and stores that empty value so
//! one bad lump does not abort the others.

pub mod entity;
pub mod occlusion;
pub mod static_prop;

pub use entity::{EntitiesReader, Entity};
pub use occlusion::{OcclusionData, OcclusionReader};
pub use static_prop::{StaticPropData, StaticPropsReader};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::reader::LumpReader;
use crate::structs::LevelFlags;

/// Decoder for one lump's content.
pub trait ContentReader {
    type Output;

    fn read(&self, r: &mut LumpReader) -> Result<Self::Output>;

    /// Fallback value stored when `read` fails.
    fn empty(&self) -> Self::Output;
}

/// One concrete fixed-size binary layout for a record kind: a byte size
/// plus a decode routine that must consume exactly that many bytes.
pub trait RecordVariant: Copy {
    type Record;

    fn size(&self) -> usize;

    fn decode(&self, r: &mut LumpReader) -> Result<Self::Record>;
}

/// How many records a packet reader decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketCount {
    /// Consume until exhausted: floor(remaining / record size) records,
    /// discarding any trailing remainder.
    Fill,
    /// Exactly this many records.
    Exact(usize),
}

/// Decodes an array of fixed-size records using a variant descriptor.
#[derive(Debug, Clone, Copy)]
pub struct PacketsReader<V> {
    variant: V,
    count: PacketCount,
}

impl<V: RecordVariant> PacketsReader<V> {
    pub fn fill(variant: V) -> Self {
        Self {
            variant,
            count: PacketCount::Fill,
        }
    }

    pub fn exact(variant: V, count: usize) -> Self {
        Self {
            variant,
            count: PacketCount::Exact(count),
        }
    }
}

impl<V: RecordVariant> ContentReader for PacketsReader<V> {
    type Output = Vec<V::Record>;

    fn read(&self, r: &mut LumpReader) -> Result<Vec<V::Record>> {
        let size = self.variant.size();
        let count = match self.count {
            PacketCount::Fill => r.remaining() / size,
            PacketCount::Exact(n) => n,
        };

        // reject corrupt counts before attempting any allocation
        let need = count
            .checked_mul(size)
            .ok_or(Error::InconsistentCount {
                count,
                record_size: size,
                remaining: r.remaining(),
            })?;
        if need > r.remaining() {
            return Err(Error::InconsistentCount {
                count,
                record_size: size,
                remaining: r.remaining(),
            });
        }

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let start = r.position();
            let record = self.variant.decode(r)?;
            let consumed = r.position() - start;
            if consumed != size {
                return Err(Error::RecordSizeMismatch {
                    expected: size,
                    consumed,
                });
            }
            records.push(record);
        }

        debug!(count = records.len(), size, "packets read");
        Ok(records)
    }

    fn empty(&self) -> Vec<V::Record> {
        Vec::new()
    }
}

/// 4-byte signed integer index list.
#[derive(Debug, Clone, Copy)]
pub struct I32PacketsReader {
    count: PacketCount,
}

impl I32PacketsReader {
    pub fn fill() -> Self {
        Self {
            count: PacketCount::Fill,
        }
    }

    pub fn exact(count: usize) -> Self {
        Self {
            count: PacketCount::Exact(count),
        }
    }
}

impl ContentReader for I32PacketsReader {
    type Output = Vec<i32>;

    fn read(&self, r: &mut LumpReader) -> Result<Vec<i32>> {
        let count = match self.count {
            PacketCount::Fill => r.remaining() / 4,
            PacketCount::Exact(n) => n,
        };
        if count.checked_mul(4).map_or(true, |need| need > r.remaining()) {
            return Err(Error::InconsistentCount {
                count,
                record_size: 4,
                remaining: r.remaining(),
            });
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(r.read_i32()?);
        }
        Ok(values)
    }

    fn empty(&self) -> Vec<i32> {
        Vec::new()
    }
}

/// 2-byte unsigned integer index list, widened to i32.
#[derive(Debug, Clone, Copy)]
pub struct U16PacketsReader {
    count: PacketCount,
}

impl U16PacketsReader {
    pub fn fill() -> Self {
        Self {
            count: PacketCount::Fill,
        }
    }

    pub fn exact(count: usize) -> Self {
        Self {
            count: PacketCount::Exact(count),
        }
    }
}

impl ContentReader for U16PacketsReader {
    type Output = Vec<i32>;

    fn read(&self, r: &mut LumpReader) -> Result<Vec<i32>> {
        let count = match self.count {
            PacketCount::Fill => r.remaining() / 2,
            PacketCount::Exact(n) => n,
        };
        if count.checked_mul(2).map_or(true, |need| need > r.remaining()) {
            return Err(Error::InconsistentCount {
                count,
                record_size: 2,
                remaining: r.remaining(),
            });
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(i32::from(r.read_u16()?));
        }
        Ok(values)
    }

    fn empty(&self) -> Vec<i32> {
        Vec::new()
    }
}

/// Returns all remaining bytes verbatim.
#[derive(Debug, Clone, Copy)]
pub struct BytesReader;

impl ContentReader for BytesReader {
    type Output = Vec<u8>;

    fn read(&self, r: &mut LumpReader) -> Result<Vec<u8>> {
        Ok(r.read_remaining().to_vec())
    }

    fn empty(&self) -> Vec<u8> {
        Vec::new()
    }
}

/// Interprets a single u32 as the map-wide flag set.
#[derive(Debug, Clone, Copy)]
pub struct FlagsReader;

impl ContentReader for FlagsReader {
    type Output = LevelFlags;

    fn read(&self, r: &mut LumpReader) -> Result<LevelFlags> {
        let flags = LevelFlags::from_bits_truncate(r.read_u32()?);
        if !r.is_empty() {
            warn!(remaining = r.remaining(), "bytes left after flags lump");
        }
        debug!(?flags, "map flags");
        Ok(flags)
    }

    fn empty(&self) -> LevelFlags {
        LevelFlags::empty()
    }
}
