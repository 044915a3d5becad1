//! Displacement surface records.
//!
//! The neighbor linkage block in the middle of a displacement info record
//! is kept as opaque bytes: its internal structure varies per branch and
//! nothing downstream of the decoder consumes it. The surrounding scalar
//! fields and the allowed-verts tail are what the variant sizes key off.

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

#[derive(Debug, Clone, PartialEq)]
pub struct DispInfo {
    pub start_position: Vector3,
    pub disp_vert_start: i32,
    pub disp_tri_start: i32,
    pub power: i32,
    pub min_tess: i32,
    pub smoothing_angle: f32,
    pub contents: i32,
    pub map_face: u32,
    pub lightmap_alpha_start: i32,
    pub lightmap_sample_position_start: i32,
    pub neighbors: Vec<u8>,
    pub allowed_verts: [u32; 10],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispInfoVariant {
    /// Release layout (176 bytes).
    V1,
    /// HL2 format version 17 beta (172 bytes).
    Bsp17,
    /// Dota 2 Beta, format version 22 (180 bytes).
    Bsp22,
    /// Dota 2 Beta, format version >= 23 (184 bytes).
    Bsp23,
    /// Widened fields and larger neighbor block (232 bytes).
    Vindictus,
}

impl DispInfoVariant {
    /// Byte length of the opaque neighbor block for this layout.
    fn neighbor_len(&self) -> usize {
        match self {
            Self::V1 => 90,
            Self::Bsp17 => 86,
            Self::Bsp22 => 94,
            Self::Bsp23 => 98,
            Self::Vindictus => 144,
        }
    }
}

impl RecordVariant for DispInfoVariant {
    type Record = DispInfo;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 176,
            Self::Bsp17 => 172,
            Self::Bsp22 => 180,
            Self::Bsp23 => 184,
            Self::Vindictus => 232,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<DispInfo> {
        let start_position = Vector3::read(r)?;
        let disp_vert_start = r.read_i32()?;
        let disp_tri_start = r.read_i32()?;
        let power = r.read_i32()?;
        let min_tess = r.read_i32()?;
        let smoothing_angle = r.read_f32()?;
        let contents = r.read_i32()?;
        let map_face = match self {
            Self::Vindictus => r.read_i32()? as u32,
            _ => u32::from(r.read_u16()?),
        };
        let lightmap_alpha_start = r.read_i32()?;
        let lightmap_sample_position_start = r.read_i32()?;
        let neighbors = r.read_bytes(self.neighbor_len())?.to_vec();
        let mut allowed_verts = [0u32; 10];
        for v in &mut allowed_verts {
            *v = r.read_u32()?;
        }
        Ok(DispInfo {
            start_position,
            disp_vert_start,
            disp_tri_start,
            power,
            min_tess,
            smoothing_angle,
            contents,
            map_face,
            lightmap_alpha_start,
            lightmap_sample_position_start,
            neighbors,
            allowed_verts,
        })
    }
}

/// Displacement vertex (20 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispVert {
    pub vector: Vector3,
    pub dist: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispVertLayout;

impl RecordVariant for DispVertLayout {
    type Record = DispVert;

    fn size(&self) -> usize {
        20
    }

    fn decode(&self, r: &mut LumpReader) -> Result<DispVert> {
        Ok(DispVert {
            vector: Vector3::read(r)?,
            dist: r.read_f32()?,
            alpha: r.read_f32()?,
        })
    }
}

/// Displacement triangle tags (2 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispTri {
    pub tags: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispTriLayout;

impl RecordVariant for DispTriLayout {
    type Record = DispTri;

    fn size(&self) -> usize {
        2
    }

    fn decode(&self, r: &mut LumpReader) -> Result<DispTri> {
        Ok(DispTri {
            tags: r.read_u16()?,
        })
    }
}

/// Multi-blend displacement paint data (40 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispMultiBlend {
    pub flags: u32,
    pub multiblend: [f32; 4],
    pub alphablend: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispMultiBlendLayout;

impl RecordVariant for DispMultiBlendLayout {
    type Record = DispMultiBlend;

    fn size(&self) -> usize {
        40
    }

    fn decode(&self, r: &mut LumpReader) -> Result<DispMultiBlend> {
        let flags = r.read_u32()?;
        let mut multiblend = [0f32; 4];
        for v in &mut multiblend {
            *v = r.read_f32()?;
        }
        let mut alphablend = [0f32; 4];
        for v in &mut alphablend {
            *v = r.read_f32()?;
        }
        r.skip(4)?; // alignment padding
        Ok(DispMultiBlend {
            flags,
            multiblend,
            alphablend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispinfo_variants_consume_declared_size() {
        for variant in [
            DispInfoVariant::V1,
            DispInfoVariant::Bsp17,
            DispInfoVariant::Bsp22,
            DispInfoVariant::Bsp23,
            DispInfoVariant::Vindictus,
        ] {
            let data = vec![0u8; variant.size()];
            let mut r = LumpReader::new(&data);
            variant.decode(&mut r).unwrap();
            assert!(r.is_empty(), "{variant:?} must consume its declared size");
        }
    }
}
