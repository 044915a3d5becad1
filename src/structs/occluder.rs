//! Occluder records, read from the nested occlusion lump.

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccluderData {
    pub flags: i32,
    pub first_poly: i32,
    pub poly_count: i32,
    pub mins: Vector3,
    pub maxs: Vector3,
    /// Only present at lump sub-version >= 1.
    pub area: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccluderDataVariant {
    /// 36 bytes.
    V0,
    /// Trailing area field (40 bytes).
    V1,
}

impl RecordVariant for OccluderDataVariant {
    type Record = OccluderData;

    fn size(&self) -> usize {
        match self {
            Self::V0 => 36,
            Self::V1 => 40,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<OccluderData> {
        Ok(OccluderData {
            flags: r.read_i32()?,
            first_poly: r.read_i32()?,
            poly_count: r.read_i32()?,
            mins: Vector3::read(r)?,
            maxs: Vector3::read(r)?,
            area: match self {
                Self::V0 => None,
                Self::V1 => Some(r.read_i32()?),
            },
        })
    }
}

/// Occluder polygon (12 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccluderPolyData {
    pub first_vertex_index: i32,
    pub vertex_count: i32,
    pub plane_num: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccluderPolyDataLayout;

impl RecordVariant for OccluderPolyDataLayout {
    type Record = OccluderPolyData;

    fn size(&self) -> usize {
        12
    }

    fn decode(&self, r: &mut LumpReader) -> Result<OccluderPolyData> {
        Ok(OccluderPolyData {
            first_vertex_index: r.read_i32()?,
            vertex_count: r.read_i32()?,
            plane_num: r.read_i32()?,
        })
    }
}
