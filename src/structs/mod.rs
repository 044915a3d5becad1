//! Decoded record types and their per-variant binary layouts.
//!
//! Each family keeps one owned struct plus a variant enum implementing
//! [`RecordVariant`](crate::content::RecordVariant); the enum carries the
//! fixed byte size of each released layout and a decode routine that
//! consumes exactly that many bytes.

pub mod disp;
pub mod face;
pub mod flags;
pub mod geom;
pub mod model;
pub mod occluder;
pub mod overlay;
pub mod static_prop;
pub mod texture;

pub use disp::{
    DispInfo, DispInfoVariant, DispMultiBlend, DispMultiBlendLayout, DispTri, DispTriLayout,
    DispVert, DispVertLayout,
};
pub use face::{Face, FaceVariant};
pub use flags::LevelFlags;
pub use geom::{
    Brush, BrushLayout, BrushSide, BrushSideVariant, Cubemap, CubemapLayout, Edge, EdgeVariant,
    Plane, PlaneLayout, Primitive, PrimitiveLayout, Vertex, VertexLayout,
};
pub use model::{Leaf, LeafVariant, Model, ModelVariant, Node, NodeVariant};
pub use occluder::{OccluderData, OccluderDataVariant, OccluderPolyData, OccluderPolyDataLayout};
pub use overlay::{
    Areaportal, AreaportalVariant, Overlay, OverlayFade, OverlayFadeLayout, OverlaySystemLevel,
    OverlaySystemLevelLayout, OverlayVariant,
};
pub use static_prop::{StaticProp, StaticPropVariant};
pub use texture::{TexData, TexDataLayout, TexInfo, TexInfoVariant};

use crate::error::Result;
use crate::reader::LumpReader;

/// Three-component float vector, the base geometric type of the format.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn read(r: &mut LumpReader) -> Result<Self> {
        r.read_vector3()
    }
}
