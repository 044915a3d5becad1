//! Brush models and the BSP tree records (nodes, leaves).

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

/// Brush model (48 bytes; Dark Messiah appends an unknown i32).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Model {
    pub mins: Vector3,
    pub maxs: Vector3,
    pub origin: Vector3,
    pub head_node: i32,
    pub first_face: i32,
    pub num_faces: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    V1,
    DarkMessiah,
}

impl RecordVariant for ModelVariant {
    type Record = Model;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 48,
            Self::DarkMessiah => 52,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Model> {
        let model = Model {
            mins: Vector3::read(r)?,
            maxs: Vector3::read(r)?,
            origin: Vector3::read(r)?,
            head_node: r.read_i32()?,
            first_face: r.read_i32()?,
            num_faces: r.read_i32()?,
        };
        if matches!(self, Self::DarkMessiah) {
            r.skip(4)?;
        }
        Ok(model)
    }
}

/// Inner BSP tree node. Fields stored widened to i32 so both layouts
/// share one struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub plane_num: i32,
    pub children: [i32; 2],
    pub mins: [i32; 3],
    pub maxs: [i32; 3],
    pub first_face: u32,
    pub num_faces: u32,
    pub area: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeVariant {
    /// i16 bounds and u16 face range (32 bytes).
    V1,
    /// All 32-bit (48 bytes).
    Vindictus,
}

impl RecordVariant for NodeVariant {
    type Record = Node;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 32,
            Self::Vindictus => 48,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Node> {
        match self {
            Self::V1 => {
                let node = Node {
                    plane_num: r.read_i32()?,
                    children: [r.read_i32()?, r.read_i32()?],
                    mins: [
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                    ],
                    maxs: [
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                    ],
                    first_face: u32::from(r.read_u16()?),
                    num_faces: u32::from(r.read_u16()?),
                    area: i32::from(r.read_i16()?),
                };
                r.skip(2)?; // alignment padding
                Ok(node)
            }
            Self::Vindictus => Ok(Node {
                plane_num: r.read_i32()?,
                children: [r.read_i32()?, r.read_i32()?],
                mins: [r.read_i32()?, r.read_i32()?, r.read_i32()?],
                maxs: [r.read_i32()?, r.read_i32()?, r.read_i32()?],
                first_face: r.read_i32()? as u32,
                num_faces: r.read_i32()? as u32,
                area: r.read_i32()?,
            }),
        }
    }
}

/// BSP tree leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub contents: i32,
    pub cluster: i32,
    /// Packed area (9 bits) and flags (7 bits).
    pub area_flags: i32,
    pub mins: [i32; 3],
    pub maxs: [i32; 3],
    pub first_leaf_face: u32,
    pub num_leaf_faces: u32,
    pub first_leaf_brush: u32,
    pub num_leaf_brushes: u32,
    pub leaf_water_data_id: i32,
    /// Compressed ambient light cube, present in the initial HL2 layout
    /// only (format version 19 with lump sub-version 0).
    pub ambient_lighting: Option<[u8; 24]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafVariant {
    /// Initial HL2 layout with embedded ambient lighting (56 bytes).
    V0,
    /// Standard layout (32 bytes).
    V1,
    /// All 32-bit (56 bytes).
    Vindictus,
}

impl RecordVariant for LeafVariant {
    type Record = Leaf;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 32,
            Self::V0 | Self::Vindictus => 56,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<Leaf> {
        match self {
            Self::V0 | Self::V1 => {
                let mut leaf = Leaf {
                    contents: r.read_i32()?,
                    cluster: i32::from(r.read_i16()?),
                    area_flags: i32::from(r.read_i16()?),
                    mins: [
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                    ],
                    maxs: [
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                        i32::from(r.read_i16()?),
                    ],
                    first_leaf_face: u32::from(r.read_u16()?),
                    num_leaf_faces: u32::from(r.read_u16()?),
                    first_leaf_brush: u32::from(r.read_u16()?),
                    num_leaf_brushes: u32::from(r.read_u16()?),
                    leaf_water_data_id: i32::from(r.read_i16()?),
                    ambient_lighting: None,
                };
                if matches!(self, Self::V0) {
                    let mut cube = [0u8; 24];
                    cube.copy_from_slice(r.read_bytes(24)?);
                    leaf.ambient_lighting = Some(cube);
                }
                r.skip(2)?; // alignment padding
                Ok(leaf)
            }
            Self::Vindictus => Ok(Leaf {
                contents: r.read_i32()?,
                cluster: r.read_i32()?,
                area_flags: r.read_i32()?,
                mins: [r.read_i32()?, r.read_i32()?, r.read_i32()?],
                maxs: [r.read_i32()?, r.read_i32()?, r.read_i32()?],
                first_leaf_face: r.read_i32()? as u32,
                num_leaf_faces: r.read_i32()? as u32,
                first_leaf_brush: r.read_i32()? as u32,
                num_leaf_brushes: r.read_i32()? as u32,
                leaf_water_data_id: r.read_i32()?,
                ambient_lighting: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_variant_sizes_consumed_exactly() {
        for size in [
            (NodeVariant::V1.size(), 32),
            (NodeVariant::Vindictus.size(), 48),
            (LeafVariant::V0.size(), 56),
            (LeafVariant::V1.size(), 32),
            (LeafVariant::Vindictus.size(), 56),
        ] {
            assert_eq!(size.0, size.1);
        }

        for variant in [LeafVariant::V0, LeafVariant::V1, LeafVariant::Vindictus] {
            let data = vec![0u8; variant.size()];
            let mut r = LumpReader::new(&data);
            variant.decode(&mut r).unwrap();
            assert!(r.is_empty());
        }
    }

    #[test]
    fn test_leaf_v0_keeps_ambient_cube() {
        let data = vec![0xABu8; LeafVariant::V0.size()];
        let mut r = LumpReader::new(&data);
        let leaf = LeafVariant::V0.decode(&mut r).unwrap();
        assert_eq!(leaf.ambient_lighting, Some([0xAB; 24]));
    }
}
