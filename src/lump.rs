//! Lump identifiers and the container-side interface.
//!
//! The physical container format (header parsing, lump offsets,
//! decompression) lives outside this crate; decoders only see a
//! [`LumpSource`] that hands out fully materialized lump bytes.

use indexmap::IndexMap;

/// The 64 lump slots of the map header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LumpType {
    Entities = 0,
    Planes = 1,
    TexData = 2,
    Vertexes = 3,
    Visibility = 4,
    Nodes = 5,
    TexInfo = 6,
    Faces = 7,
    Lighting = 8,
    Occlusion = 9,
    Leafs = 10,
    FaceIds = 11,
    Edges = 12,
    SurfEdges = 13,
    Models = 14,
    WorldLights = 15,
    LeafFaces = 16,
    LeafBrushes = 17,
    Brushes = 18,
    BrushSides = 19,
    Areas = 20,
    AreaPortals = 21,
    PropCollisions = 22,
    PropHulls = 23,
    PropHullVerts = 24,
    PropTriangles = 25,
    DispInfo = 26,
    OriginalFaces = 27,
    PhysDisp = 28,
    PhysCollide = 29,
    VertNormals = 30,
    VertNormalIndices = 31,
    DispLightmapAlphas = 32,
    DispVerts = 33,
    DispLightmapSamplePositions = 34,
    GameLump = 35,
    LeafWaterData = 36,
    Primitives = 37,
    PrimVerts = 38,
    PrimIndices = 39,
    PakFile = 40,
    ClipPortalVerts = 41,
    Cubemaps = 42,
    TexDataStringData = 43,
    TexDataStringTable = 44,
    Overlays = 45,
    LeafMinDistToWater = 46,
    FaceMacroTextureInfo = 47,
    DispTris = 48,
    PropBlob = 49,
    WaterOverlays = 50,
    LeafAmbientIndexHdr = 51,
    LeafAmbientIndex = 52,
    LightingHdr = 53,
    WorldLightsHdr = 54,
    LeafAmbientLightingHdr = 55,
    LeafAmbientLighting = 56,
    XzipPakFile = 57,
    FacesHdr = 58,
    MapFlags = 59,
    OverlayFades = 60,
    OverlaySystemLevels = 61,
    PhysLevel = 62,
    DispMultiBlend = 63,
}

/// Declared metadata of one lump, as found in the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LumpInfo {
    /// Lump-local version integer, distinct from the overall format version.
    pub sub_version: u32,
    pub byte_len: usize,
}

/// Container collaborator supplying lump bytes and file-level metadata.
///
/// Game lumps are named sub-sections nested inside the generic game data
/// lump, used for engine-extension data such as static props ("sprp").
pub trait LumpSource {
    /// File name, fed to the title identification heuristic.
    fn name(&self) -> &str;

    /// Overall file format version.
    fn format_version(&self) -> u32;

    fn lump(&self, kind: LumpType) -> Option<LumpInfo>;

    fn lump_data(&self, kind: LumpType) -> Option<&[u8]>;

    fn game_lump(&self, id: &str) -> Option<LumpInfo>;

    fn game_lump_data(&self, id: &str) -> Option<&[u8]>;
}

/// In-memory [`LumpSource`], the reference container for decoding lumps
/// that have already been located and uncompressed.
#[derive(Debug, Default)]
pub struct MemBspFile {
    name: String,
    format_version: u32,
    lumps: IndexMap<LumpType, (u32, Vec<u8>)>,
    game_lumps: IndexMap<String, (u32, Vec<u8>)>,
}

impl MemBspFile {
    pub fn new(name: impl Into<String>, format_version: u32) -> Self {
        Self {
            name: name.into(),
            format_version,
            lumps: IndexMap::new(),
            game_lumps: IndexMap::new(),
        }
    }

    pub fn with_lump(mut self, kind: LumpType, sub_version: u32, data: Vec<u8>) -> Self {
        self.lumps.insert(kind, (sub_version, data));
        self
    }

    pub fn with_game_lump(mut self, id: impl Into<String>, sub_version: u32, data: Vec<u8>) -> Self {
        self.game_lumps.insert(id.into(), (sub_version, data));
        self
    }
}

impl LumpSource for MemBspFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn format_version(&self) -> u32 {
        self.format_version
    }

    fn lump(&self, kind: LumpType) -> Option<LumpInfo> {
        self.lumps.get(&kind).map(|(v, d)| LumpInfo {
            sub_version: *v,
            byte_len: d.len(),
        })
    }

    fn lump_data(&self, kind: LumpType) -> Option<&[u8]> {
        self.lumps.get(&kind).map(|(_, d)| d.as_slice())
    }

    fn game_lump(&self, id: &str) -> Option<LumpInfo> {
        self.game_lumps.get(id).map(|(v, d)| LumpInfo {
            sub_version: *v,
            byte_len: d.len(),
        })
    }

    fn game_lump_data(&self, id: &str) -> Option<&[u8]> {
        self.game_lumps.get(id).map(|(_, d)| d.as_slice())
    }
}
