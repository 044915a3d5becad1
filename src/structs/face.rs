//! Face records. The face layout changed more often than any other record
//! kind: the HL2 betas (format versions 17/18) prepend average light
//! colors, Vampire: Bloodlines exports an extended beta layout, and
//! Vindictus widens the index fields.

use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Face {
    pub plane_num: u32,
    pub side: u8,
    pub on_node: u8,
    pub first_edge: i32,
    pub num_edges: i32,
    pub tex_info: i32,
    pub disp_info: i32,
    pub surface_fog_volume_id: i32,
    pub styles: [u8; 4],
    pub light_ofs: i32,
    pub area: f32,
    pub lightmap_mins: [i32; 2],
    pub lightmap_size: [i32; 2],
    pub orig_face: i32,
    pub num_prims: u32,
    pub first_prim: u32,
    pub smoothing_groups: u32,
    /// Per-style average light colors, present in the beta layouts only.
    pub avg_light_colors: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceVariant {
    /// Release layout (56 bytes).
    V1,
    /// Format version 17 beta layout (104 bytes).
    Bsp17,
    /// Format version 18 beta layout (72 bytes).
    Bsp18,
    /// Vampire: Bloodlines export (104 bytes).
    Vtmb,
    /// Vindictus, lump sub-version != 2 (72 bytes).
    VindictusV1,
    /// Vindictus, lump sub-version 2 (76 bytes).
    VindictusV2,
}

impl FaceVariant {
    fn decode_core(r: &mut LumpReader) -> Result<Face> {
        Ok(Face {
            plane_num: u32::from(r.read_u16()?),
            side: r.read_u8()?,
            on_node: r.read_u8()?,
            first_edge: r.read_i32()?,
            num_edges: i32::from(r.read_i16()?),
            tex_info: i32::from(r.read_i16()?),
            disp_info: i32::from(r.read_i16()?),
            surface_fog_volume_id: i32::from(r.read_i16()?),
            styles: [r.read_u8()?, r.read_u8()?, r.read_u8()?, r.read_u8()?],
            light_ofs: r.read_i32()?,
            area: r.read_f32()?,
            lightmap_mins: [r.read_i32()?, r.read_i32()?],
            lightmap_size: [r.read_i32()?, r.read_i32()?],
            orig_face: r.read_i32()?,
            num_prims: u32::from(r.read_u16()?),
            first_prim: u32::from(r.read_u16()?),
            smoothing_groups: r.read_u32()?,
            avg_light_colors: Vec::new(),
        })
    }

    fn decode_beta(r: &mut LumpReader, colors: usize, trailing: usize) -> Result<Face> {
        let mut avg_light_colors = Vec::with_capacity(colors);
        for _ in 0..colors {
            avg_light_colors.push(r.read_i32()?);
        }
        let mut face = Self::decode_core(r)?;
        face.avg_light_colors = avg_light_colors;
        // day/night lightstyle data dropped by the release format
        r.skip(trailing)?;
        Ok(face)
    }

    fn decode_vindictus(r: &mut LumpReader, trailing_unknown: bool) -> Result<Face> {
        let plane_num = r.read_i32()? as u32;
        let side = r.read_u8()?;
        let on_node = r.read_u8()?;
        r.skip(2)?; // alignment padding
        let face = Face {
            plane_num,
            side,
            on_node,
            first_edge: r.read_i32()?,
            num_edges: r.read_i32()?,
            tex_info: r.read_i32()?,
            disp_info: r.read_i32()?,
            surface_fog_volume_id: r.read_i32()?,
            styles: [r.read_u8()?, r.read_u8()?, r.read_u8()?, r.read_u8()?],
            light_ofs: r.read_i32()?,
            area: r.read_f32()?,
            lightmap_mins: [r.read_i32()?, r.read_i32()?],
            lightmap_size: [r.read_i32()?, r.read_i32()?],
            orig_face: r.read_i32()?,
            num_prims: r.read_i32()? as u32,
            first_prim: r.read_i32()? as u32,
            smoothing_groups: r.read_u32()?,
            avg_light_colors: Vec::new(),
        };
        if trailing_unknown {
            r.skip(4)?;
        }
        Ok(face)
    }
}

impl RecordVariant for FaceVariant {
    type Record = Face;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 56,
            Self::Bsp18 => 72,
            Self::Bsp17 | Self::Vtmb => 104,
            Self::VindictusV1 => 72,
            Self::VindictusV2 => 76,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Face> {
        match self {
            Self::V1 => Self::decode_core(r),
            Self::Bsp18 => Self::decode_beta(r, 4, 0),
            Self::Bsp17 | Self::Vtmb => Self::decode_beta(r, 8, 16),
            Self::VindictusV1 => Self::decode_vindictus(r, false),
            Self::VindictusV2 => Self::decode_vindictus(r, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_variant_sizes_consumed_exactly() {
        for variant in [
            FaceVariant::V1,
            FaceVariant::Bsp17,
            FaceVariant::Bsp18,
            FaceVariant::Vtmb,
            FaceVariant::VindictusV1,
            FaceVariant::VindictusV2,
        ] {
            let data = vec![0u8; variant.size()];
            let mut r = LumpReader::new(&data);
            variant.decode(&mut r).unwrap();
            assert!(r.is_empty(), "{variant:?} must consume its declared size");
        }
    }

    #[test]
    fn test_beta_face_keeps_light_colors() {
        let mut data = vec![0u8; FaceVariant::Bsp18.size()];
        data[0..4].copy_from_slice(&7i32.to_le_bytes());
        let mut r = LumpReader::new(&data);
        let face = FaceVariant::Bsp18.decode(&mut r).unwrap();
        assert_eq!(face.avg_light_colors, vec![7, 0, 0, 0]);
    }
}
