//! Overlay ("decal") records plus areaportals.

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

/// Number of face references embedded in an overlay record.
pub const OVERLAY_FACE_COUNT: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: i32,
    pub tex_info: i32,
    pub face_count_and_render_order: u32,
    pub faces: [i32; OVERLAY_FACE_COUNT],
    pub u: [f32; 2],
    pub v: [f32; 2],
    pub uv_points: [Vector3; 4],
    pub origin: Vector3,
    pub basis_normal: Vector3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVariant {
    /// Release layout (352 bytes).
    V1,
    /// Widened texinfo and face count (356 bytes).
    Vindictus,
    /// Trailing unknown i32 (356 bytes).
    Dota2,
}

impl RecordVariant for OverlayVariant {
    type Record = Overlay;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 352,
            Self::Vindictus | Self::Dota2 => 356,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Overlay> {
        let id = r.read_i32()?;
        let (tex_info, face_count_and_render_order) = match self {
            Self::Vindictus => (r.read_i32()?, r.read_i32()? as u32),
            _ => (i32::from(r.read_i16()?), u32::from(r.read_u16()?)),
        };
        let mut faces = [0i32; OVERLAY_FACE_COUNT];
        for f in &mut faces {
            *f = r.read_i32()?;
        }
        let overlay = Overlay {
            id,
            tex_info,
            face_count_and_render_order,
            faces,
            u: [r.read_f32()?, r.read_f32()?],
            v: [r.read_f32()?, r.read_f32()?],
            uv_points: [
                Vector3::read(r)?,
                Vector3::read(r)?,
                Vector3::read(r)?,
                Vector3::read(r)?,
            ],
            origin: Vector3::read(r)?,
            basis_normal: Vector3::read(r)?,
        };
        if matches!(self, Self::Dota2) {
            r.skip(4)?;
        }
        Ok(overlay)
    }
}

/// Overlay fade distances (8 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFade {
    pub fade_dist_min_sq: f32,
    pub fade_dist_max_sq: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFadeLayout;

impl RecordVariant for OverlayFadeLayout {
    type Record = OverlayFade;

    fn size(&self) -> usize {
        8
    }

    fn decode(&self, r: &mut LumpReader) -> Result<OverlayFade> {
        Ok(OverlayFade {
            fade_dist_min_sq: r.read_f32()?,
            fade_dist_max_sq: r.read_f32()?,
        })
    }
}

/// Overlay CPU/GPU level limits (4 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySystemLevel {
    pub min_cpu_level: u8,
    pub max_cpu_level: u8,
    pub min_gpu_level: u8,
    pub max_gpu_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySystemLevelLayout;

impl RecordVariant for OverlaySystemLevelLayout {
    type Record = OverlaySystemLevel;

    fn size(&self) -> usize {
        4
    }

    fn decode(&self, r: &mut LumpReader) -> Result<OverlaySystemLevel> {
        Ok(OverlaySystemLevel {
            min_cpu_level: r.read_u8()?,
            max_cpu_level: r.read_u8()?,
            min_gpu_level: r.read_u8()?,
            max_gpu_level: r.read_u8()?,
        })
    }
}

/// Areaportal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areaportal {
    pub portal_key: u32,
    pub other_area: u32,
    pub first_clip_portal_vert: u32,
    pub clip_portal_verts: u32,
    pub plane_num: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaportalVariant {
    /// u16 fields (12 bytes).
    V1,
    /// i32 fields (20 bytes).
    Vindictus,
}

impl RecordVariant for AreaportalVariant {
    type Record = Areaportal;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 12,
            Self::Vindictus => 20,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Areaportal> {
        match self {
            Self::V1 => Ok(Areaportal {
                portal_key: u32::from(r.read_u16()?),
                other_area: u32::from(r.read_u16()?),
                first_clip_portal_vert: u32::from(r.read_u16()?),
                clip_portal_verts: u32::from(r.read_u16()?),
                plane_num: r.read_i32()?,
            }),
            Self::Vindictus => Ok(Areaportal {
                portal_key: r.read_i32()? as u32,
                other_area: r.read_i32()? as u32,
                first_clip_portal_vert: r.read_i32()? as u32,
                clip_portal_verts: r.read_i32()? as u32,
                plane_num: r.read_i32()?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_variants_consume_declared_size() {
        for variant in [
            OverlayVariant::V1,
            OverlayVariant::Vindictus,
            OverlayVariant::Dota2,
        ] {
            let data = vec![0u8; variant.size()];
            let mut r = LumpReader::new(&data);
            variant.decode(&mut r).unwrap();
            assert!(r.is_empty(), "{variant:?} must consume its declared size");
        }
    }
}
