//! Basic geometry records: planes, vertices, edges, brushes, brush sides,
//! cubemap samples and primitives.

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

/// Splitting plane (20 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3,
    pub dist: f32,
    pub axis_type: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout;

impl RecordVariant for PlaneLayout {
    type Record = Plane;

    fn size(&self) -> usize {
        20
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Plane> {
        Ok(Plane {
            normal: Vector3::read(r)?,
            dist: r.read_f32()?,
            axis_type: r.read_i32()?,
        })
    }
}

/// Map vertex (12 bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: Vector3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout;

impl RecordVariant for VertexLayout {
    type Record = Vertex;

    fn size(&self) -> usize {
        12
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Vertex> {
        Ok(Vertex {
            point: Vector3::read(r)?,
        })
    }
}

/// Edge between two vertices. Indices are stored widened; Vindictus
/// writes them as 32-bit from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub v: [i32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeVariant {
    /// Two u16 vertex indices (4 bytes).
    V1,
    /// Two i32 vertex indices (8 bytes).
    Vindictus,
}

impl RecordVariant for EdgeVariant {
    type Record = Edge;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 4,
            Self::Vindictus => 8,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Edge> {
        let v = match self {
            Self::V1 => [i32::from(r.read_u16()?), i32::from(r.read_u16()?)],
            Self::Vindictus => [r.read_i32()?, r.read_i32()?],
        };
        Ok(Edge { v })
    }
}

/// Convex brush (12 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub first_side: i32,
    pub num_sides: i32,
    pub contents: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushLayout;

impl RecordVariant for BrushLayout {
    type Record = Brush;

    fn size(&self) -> usize {
        12
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Brush> {
        Ok(Brush {
            first_side: r.read_i32()?,
            num_sides: r.read_i32()?,
            contents: r.read_i32()?,
        })
    }
}

/// One bounding side of a brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSide {
    pub plane_num: u32,
    pub tex_info: i32,
    pub disp_info: i32,
    pub bevel: bool,
    pub thin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushSideVariant {
    /// plane u16, texinfo i16, dispinfo i16, bevel i16 (8 bytes).
    V1,
    /// Same size as V1 but bevel split into bevel/thin bytes; files with
    /// format version >= 21 use it while still reporting sub-version 0.
    V2,
    /// Widened 32-bit fields (16 bytes).
    Vindictus,
}

impl RecordVariant for BrushSideVariant {
    type Record = BrushSide;

    fn size(&self) -> usize {
        match self {
            Self::V1 | Self::V2 => 8,
            Self::Vindictus => 16,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<BrushSide> {
        match self {
            Self::V1 => Ok(BrushSide {
                plane_num: u32::from(r.read_u16()?),
                tex_info: i32::from(r.read_i16()?),
                disp_info: i32::from(r.read_i16()?),
                bevel: r.read_i16()? != 0,
                thin: false,
            }),
            Self::V2 => Ok(BrushSide {
                plane_num: u32::from(r.read_u16()?),
                tex_info: i32::from(r.read_i16()?),
                disp_info: i32::from(r.read_i16()?),
                bevel: r.read_u8()? != 0,
                thin: r.read_u8()? != 0,
            }),
            Self::Vindictus => Ok(BrushSide {
                plane_num: r.read_i32()? as u32,
                tex_info: r.read_i32()?,
                disp_info: r.read_i32()?,
                bevel: r.read_i32()? != 0,
                thin: false,
            }),
        }
    }
}

/// Cubemap sample position (16 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cubemap {
    pub origin: [i32; 3],
    pub size: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubemapLayout;

impl RecordVariant for CubemapLayout {
    type Record = Cubemap;

    fn size(&self) -> usize {
        16
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Cubemap> {
        Ok(Cubemap {
            origin: [r.read_i32()?, r.read_i32()?, r.read_i32()?],
            size: r.read_i32()?,
        })
    }
}

/// Non-polygonal primitive ("t-junction patch", 10 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub prim_type: u16,
    pub first_index: u16,
    pub index_count: u16,
    pub first_vert: u16,
    pub vert_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveLayout;

impl RecordVariant for PrimitiveLayout {
    type Record = Primitive;

    fn size(&self) -> usize {
        10
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Primitive> {
        Ok(Primitive {
            prim_type: r.read_u16()?,
            first_index: r.read_u16()?,
            index_count: r.read_u16()?,
            first_vert: r.read_u16()?,
            vert_count: r.read_u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentReader, PacketsReader};

    #[test]
    fn test_plane_decode() {
        let mut data = Vec::new();
        for f in [0.0f32, 0.0, 1.0, 64.0] {
            data.extend_from_slice(&f.to_le_bytes());
        }
        data.extend_from_slice(&2i32.to_le_bytes());

        let planes = PacketsReader::fill(PlaneLayout)
            .read(&mut LumpReader::new(&data))
            .unwrap();
        assert_eq!(planes.len(), 1);
        assert_eq!(planes[0].normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(planes[0].dist, 64.0);
        assert_eq!(planes[0].axis_type, 2);
    }

    #[test]
    fn test_edge_variants() {
        let data = [1u8, 0, 2, 0];
        let mut r = LumpReader::new(&data);
        assert_eq!(EdgeVariant::V1.decode(&mut r).unwrap(), Edge { v: [1, 2] });

        let mut data = Vec::new();
        data.extend_from_slice(&70000i32.to_le_bytes());
        data.extend_from_slice(&70001i32.to_le_bytes());
        let mut r = LumpReader::new(&data);
        assert_eq!(
            EdgeVariant::Vindictus.decode(&mut r).unwrap(),
            Edge { v: [70000, 70001] }
        );
    }

    #[test]
    fn test_brush_side_v2_thin() {
        let data = [5, 0, 1, 0, 0xFF, 0xFF, 0, 1];
        let mut r = LumpReader::new(&data);
        let side = BrushSideVariant::V2.decode(&mut r).unwrap();
        assert_eq!(side.plane_num, 5);
        assert_eq!(side.tex_info, 1);
        assert_eq!(side.disp_info, -1);
        assert!(!side.bevel);
        assert!(side.thin);
    }
}
