//! Occlusion lump decoder: three count-prefixed arrays read sequentially
//! from one cursor. No cross-array validation is performed beyond each
//! array's own byte-length bookkeeping.

use super::{ContentReader, I32PacketsReader, PacketsReader};
use crate::error::Result;
use crate::reader::LumpReader;
use crate::structs::occluder::OccluderPolyDataLayout;
use crate::structs::{OccluderData, OccluderDataVariant, OccluderPolyData};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OcclusionData {
    pub occluders: Vec<OccluderData>,
    pub polys: Vec<OccluderPolyData>,
    pub vertex_indices: Vec<i32>,
}

#[derive(Debug, Clone, Copy)]
pub struct OcclusionReader {
    pub variant: OccluderDataVariant,
}

impl OcclusionReader {
    pub fn new(variant: OccluderDataVariant) -> Self {
        Self { variant }
    }
}

impl ContentReader for OcclusionReader {
    type Output = OcclusionData;

    fn read(&self, r: &mut LumpReader) -> Result<OcclusionData> {
        let count = r.read_count()?;
        let occluders = PacketsReader::exact(self.variant, count).read(r)?;

        let count = r.read_count()?;
        let polys = PacketsReader::exact(OccluderPolyDataLayout, count).read(r)?;

        let count = r.read_count()?;
        let vertex_indices = I32PacketsReader::exact(count).read(r)?;

        Ok(OcclusionData {
            occluders,
            polys,
            vertex_indices,
        })
    }

    fn empty(&self) -> OcclusionData {
        OcclusionData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn push_i32(data: &mut Vec<u8>, v: i32) {
        data.extend_from_slice(&v.to_le_bytes());
    }

    #[test]
    fn test_decode_v1_lump() {
        let mut data = Vec::new();
        push_i32(&mut data, 1); // occluder count
        data.extend_from_slice(&vec![0u8; 36]);
        push_i32(&mut data, 7); // area (v1 tail)
        push_i32(&mut data, 2); // poly count
        data.extend_from_slice(&vec![0u8; 24]);
        push_i32(&mut data, 3); // vertex index count
        for v in [10, 11, 12] {
            push_i32(&mut data, v);
        }

        let occlusion = OcclusionReader::new(OccluderDataVariant::V1)
            .read(&mut LumpReader::new(&data))
            .unwrap();
        assert_eq!(occlusion.occluders.len(), 1);
        assert_eq!(occlusion.occluders[0].area, Some(7));
        assert_eq!(occlusion.polys.len(), 2);
        assert_eq!(occlusion.vertex_indices, vec![10, 11, 12]);
    }

    #[test]
    fn test_corrupt_count_fails_fast() {
        let mut data = Vec::new();
        push_i32(&mut data, i32::MAX); // claims far more occluders than fit
        data.extend_from_slice(&[0u8; 40]);

        let result = OcclusionReader::new(OccluderDataVariant::V0).read(&mut LumpReader::new(&data));
        assert!(matches!(result, Err(Error::InconsistentCount { .. })));
    }
}
