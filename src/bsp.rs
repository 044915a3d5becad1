//! Lump orchestrator: owns the decoded-data aggregate, exposes one
//! idempotent load operation per logical lump and applies failure
//! isolation so one bad lump does not abort the others.

use tracing::{debug, error};

use crate::content::{
    BytesReader, ContentReader, EntitiesReader, Entity, FlagsReader, I32PacketsReader,
    OcclusionData, OcclusionReader, PacketsReader, StaticPropData, StaticPropsReader,
    U16PacketsReader,
};
use crate::lump::{LumpSource, LumpType};
use crate::structs::disp::{DispMultiBlendLayout, DispTriLayout, DispVertLayout};
use crate::structs::geom::{BrushLayout, CubemapLayout, PlaneLayout, PrimitiveLayout, VertexLayout};
use crate::structs::overlay::{OverlayFadeLayout, OverlaySystemLevelLayout};
use crate::structs::texture::TexDataLayout;
use crate::structs::{
    Areaportal, Brush, BrushSide, Cubemap, DispInfo, DispMultiBlend, DispTri, DispVert, Edge,
    Face, Leaf, LevelFlags, Model, Node, Overlay, OverlayFade, OverlaySystemLevel, Plane,
    Primitive, TexData, TexInfo, Vertex,
};
use crate::title::{TitleId, TitleResolver};
use crate::variant::{
    self, occluder_variant, IndexWidth, ResolveCtx,
};

/// Load state of one aggregate field.
///
/// A field is either never attempted, or the attempt completed — possibly
/// to the reader's empty value on failure. "Legitimately empty" and "not
/// attempted" are distinct states so repeat loads stay no-ops.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LumpState<T> {
    #[default]
    Unset,
    /// Decode failed; holds the reader's empty fallback value.
    Failed(T),
    Loaded(T),
}

impl<T> LumpState<T> {
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Failed(value) | Self::Loaded(value) => Some(value),
        }
    }
}

/// The decoded-data aggregate, populated monotonically field-by-field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BspData {
    pub entities: LumpState<Vec<Entity>>,
    pub planes: LumpState<Vec<Plane>>,
    pub vertices: LumpState<Vec<Vertex>>,
    pub edges: LumpState<Vec<Edge>>,
    pub surf_edges: LumpState<Vec<i32>>,
    pub faces: LumpState<Vec<Face>>,
    pub orig_faces: LumpState<Vec<Face>>,
    pub hdr_faces: LumpState<Vec<Face>>,
    pub models: LumpState<Vec<Model>>,
    pub brushes: LumpState<Vec<Brush>>,
    pub brush_sides: LumpState<Vec<BrushSide>>,
    pub nodes: LumpState<Vec<Node>>,
    pub leaves: LumpState<Vec<Leaf>>,
    pub leaf_faces: LumpState<Vec<i32>>,
    pub leaf_brushes: LumpState<Vec<i32>>,
    pub tex_infos: LumpState<Vec<TexInfo>>,
    pub tex_datas: LumpState<Vec<TexData>>,
    pub tex_names: LumpState<Vec<String>>,
    pub static_props: LumpState<StaticPropData>,
    pub cubemaps: LumpState<Vec<Cubemap>>,
    pub clip_portal_verts: LumpState<Vec<Vertex>>,
    pub areaportals: LumpState<Vec<Areaportal>>,
    pub overlays: LumpState<Vec<Overlay>>,
    pub overlay_fades: LumpState<Vec<OverlayFade>>,
    pub overlay_system_levels: LumpState<Vec<OverlaySystemLevel>>,
    pub disp_infos: LumpState<Vec<DispInfo>>,
    pub disp_verts: LumpState<Vec<DispVert>>,
    pub disp_tris: LumpState<Vec<DispTri>>,
    pub disp_multi_blends: LumpState<Vec<DispMultiBlend>>,
    pub occlusion: LumpState<OcclusionData>,
    pub map_flags: LumpState<LevelFlags>,
    pub prims: LumpState<Vec<Primitive>>,
    pub prim_indices: LumpState<Vec<i32>>,
    pub prim_verts: LumpState<Vec<Vertex>>,
}

/// All-purpose lump reader for one decoding session.
///
/// Loaders may be invoked in any order and repeatedly (idempotent no-op on
/// repeat), but not concurrently against the same aggregate: each performs
/// an unsynchronized check-then-set on a shared field.
pub struct BspReader<S, R> {
    source: S,
    resolver: R,
    title: TitleId,
    data: BspData,
}

impl<S: LumpSource, R: TitleResolver> BspReader<S, R> {
    pub fn new(source: S, resolver: R) -> Self {
        Self {
            source,
            resolver,
            title: TitleId::UNKNOWN,
            data: BspData::default(),
        }
    }

    /// Start the session with an already-identified title, skipping the
    /// entity-based heuristic.
    pub fn with_title(source: S, resolver: R, title: TitleId) -> Self {
        Self {
            source,
            resolver,
            title,
            data: BspData::default(),
        }
    }

    pub fn title(&self) -> TitleId {
        self.title
    }

    pub fn data(&self) -> &BspData {
        &self.data
    }

    pub fn into_data(self) -> BspData {
        self.data
    }

    /// Loads all supported lumps. Entities go first since title
    /// identification depends on them; string-table lumps are resolved
    /// inside their dependent loaders.
    pub fn load_all(&mut self) {
        self.load_entities();
        self.load_vertices();
        self.load_edges();
        self.load_faces();
        self.load_original_faces();
        self.load_models();
        self.load_surf_edges();
        self.load_occlusion();
        self.load_tex_infos();
        self.load_tex_datas();
        self.load_static_props();
        self.load_cubemaps();
        self.load_planes();
        self.load_brushes();
        self.load_brush_sides();
        self.load_areaportals();
        self.load_clip_portal_verts();
        self.load_disp_infos();
        self.load_disp_verts();
        self.load_disp_tris();
        self.load_disp_multi_blends();
        self.load_nodes();
        self.load_leaves();
        self.load_leaf_faces();
        self.load_leaf_brushes();
        self.load_overlays();
        self.load_prims();
        self.load_prim_indices();
        self.load_prim_verts();
        self.load_flags();
    }

    fn ctx(&self, kind: LumpType) -> ResolveCtx {
        ResolveCtx {
            title: self.title,
            bsp_version: self.source.format_version(),
            lump_version: self
                .source
                .lump(kind)
                .map(|info| info.sub_version)
                .unwrap_or(0),
        }
    }

    /// Decode one lump, substituting the reader's empty value on failure
    /// so the rest of the load sequence can proceed.
    fn read_lump<C: ContentReader>(&self, kind: LumpType, reader: &C) -> LumpState<C::Output> {
        let bytes = self.source.lump_data(kind).unwrap_or(&[]);
        let mut cursor = crate::reader::LumpReader::new(bytes);
        match reader.read(&mut cursor) {
            Ok(value) => LumpState::Loaded(value),
            Err(e) => {
                error!(lump = ?kind, error = %e, "error reading lump");
                LumpState::Failed(reader.empty())
            }
        }
    }

    fn read_game_lump<C: ContentReader>(&self, id: &str, reader: &C) -> LumpState<C::Output> {
        let bytes = self.source.game_lump_data(id).unwrap_or(&[]);
        let mut cursor = crate::reader::LumpReader::new(bytes);
        match reader.read(&mut cursor) {
            Ok(value) => LumpState::Loaded(value),
            Err(e) => {
                error!(game_lump = id, error = %e, "error reading game lump");
                LumpState::Failed(reader.empty())
            }
        }
    }

    pub fn load_entities(&mut self) {
        if self.data.entities.is_set() {
            return;
        }

        // format version 17 exports write escaped quotes in entity values
        let reader = EntitiesReader::new(self.source.format_version() == 17);
        let entities = self.read_lump(LumpType::Entities, &reader);

        // resolve the title exactly once, now that class names are known
        if self.title.is_unknown() {
            let classes = entities
                .get()
                .map(|entities| {
                    entities
                        .iter()
                        .map(|e| e.class_name().to_owned())
                        .collect::<ahash::AHashSet<_>>()
                })
                .unwrap_or_default();
            self.title = self.resolver.identify(
                self.source.name(),
                self.source.format_version(),
                &classes,
            );
            debug!(title = ?self.title, "title identified");
        }

        self.data.entities = entities;
    }

    pub fn load_planes(&mut self) {
        if self.data.planes.is_set() {
            return;
        }
        self.data.planes = self.read_lump(LumpType::Planes, &PacketsReader::fill(PlaneLayout));
    }

    pub fn load_vertices(&mut self) {
        if self.data.vertices.is_set() {
            return;
        }
        self.data.vertices = self.read_lump(LumpType::Vertexes, &PacketsReader::fill(VertexLayout));
    }

    pub fn load_edges(&mut self) {
        if self.data.edges.is_set() {
            return;
        }
        let variant = variant::edge_variant(&self.ctx(LumpType::Edges));
        self.data.edges = self.read_lump(LumpType::Edges, &PacketsReader::fill(variant));
    }

    pub fn load_surf_edges(&mut self) {
        if self.data.surf_edges.is_set() {
            return;
        }
        self.data.surf_edges = self.read_lump(LumpType::SurfEdges, &I32PacketsReader::fill());
    }

    pub fn load_faces(&mut self) {
        if self.data.faces.is_set() {
            return;
        }
        let variant = variant::face_variant(&self.ctx(LumpType::Faces));
        self.data.faces = self.read_lump(LumpType::Faces, &PacketsReader::fill(variant));
        self.data.hdr_faces = self.read_lump(LumpType::FacesHdr, &PacketsReader::fill(variant));
    }

    pub fn load_original_faces(&mut self) {
        if self.data.orig_faces.is_set() {
            return;
        }
        let variant = variant::face_variant(&self.ctx(LumpType::OriginalFaces));
        self.data.orig_faces =
            self.read_lump(LumpType::OriginalFaces, &PacketsReader::fill(variant));
    }

    pub fn load_models(&mut self) {
        if self.data.models.is_set() {
            return;
        }
        let variant = variant::model_variant(&self.ctx(LumpType::Models));
        self.data.models = self.read_lump(LumpType::Models, &PacketsReader::fill(variant));
    }

    pub fn load_brushes(&mut self) {
        if self.data.brushes.is_set() {
            return;
        }
        self.data.brushes = self.read_lump(LumpType::Brushes, &PacketsReader::fill(BrushLayout));
    }

    pub fn load_brush_sides(&mut self) {
        if self.data.brush_sides.is_set() {
            return;
        }
        let variant = variant::brush_side_variant(&self.ctx(LumpType::BrushSides));
        self.data.brush_sides =
            self.read_lump(LumpType::BrushSides, &PacketsReader::fill(variant));
    }

    pub fn load_nodes(&mut self) {
        if self.data.nodes.is_set() {
            return;
        }
        let variant = variant::node_variant(&self.ctx(LumpType::Nodes));
        self.data.nodes = self.read_lump(LumpType::Nodes, &PacketsReader::fill(variant));
    }

    pub fn load_leaves(&mut self) {
        if self.data.leaves.is_set() {
            return;
        }
        let variant = variant::leaf_variant(&self.ctx(LumpType::Leafs));
        self.data.leaves = self.read_lump(LumpType::Leafs, &PacketsReader::fill(variant));
    }

    pub fn load_leaf_faces(&mut self) {
        if self.data.leaf_faces.is_set() {
            return;
        }
        self.data.leaf_faces = self.read_index_lump(LumpType::LeafFaces);
    }

    pub fn load_leaf_brushes(&mut self) {
        if self.data.leaf_brushes.is_set() {
            return;
        }
        self.data.leaf_brushes = self.read_index_lump(LumpType::LeafBrushes);
    }

    fn read_index_lump(&self, kind: LumpType) -> LumpState<Vec<i32>> {
        match variant::leaf_index_width(&self.ctx(kind)) {
            IndexWidth::I32 => self.read_lump(kind, &I32PacketsReader::fill()),
            IndexWidth::U16 => self.read_lump(kind, &U16PacketsReader::fill()),
        }
    }

    pub fn load_tex_infos(&mut self) {
        if self.data.tex_infos.is_set() {
            return;
        }
        let variant = variant::tex_info_variant(&self.ctx(LumpType::TexInfo));
        self.data.tex_infos = self.read_lump(LumpType::TexInfo, &PacketsReader::fill(variant));
    }

    pub fn load_tex_datas(&mut self) {
        if self.data.tex_datas.is_set() {
            return;
        }
        self.data.tex_datas = self.read_lump(LumpType::TexData, &PacketsReader::fill(TexDataLayout));
        self.load_tex_names();
    }

    fn load_tex_names(&mut self) {
        let offsets = self.read_lump(LumpType::TexDataStringTable, &I32PacketsReader::fill());
        let blob = self.read_lump(LumpType::TexDataStringData, &BytesReader);

        let failed =
            matches!(offsets, LumpState::Failed(_)) || matches!(blob, LumpState::Failed(_));
        let names = resolve_texture_names(
            offsets.get().map(Vec::as_slice).unwrap_or(&[]),
            blob.get().map(Vec::as_slice).unwrap_or(&[]),
        );
        self.data.tex_names = if failed {
            LumpState::Failed(names)
        } else {
            LumpState::Loaded(names)
        };
    }

    pub fn load_static_props(&mut self) {
        if self.data.static_props.is_set() {
            return;
        }

        debug!("loading static props");
        let Some(info) = self.source.game_lump("sprp") else {
            // static prop lump not available
            self.data.static_props = LumpState::Loaded(StaticPropData::default());
            return;
        };

        let reader = StaticPropsReader::new(self.title, info.sub_version);
        self.data.static_props = self.read_game_lump("sprp", &reader);
    }

    pub fn load_cubemaps(&mut self) {
        if self.data.cubemaps.is_set() {
            return;
        }
        self.data.cubemaps = self.read_lump(LumpType::Cubemaps, &PacketsReader::fill(CubemapLayout));
    }

    pub fn load_clip_portal_verts(&mut self) {
        if self.data.clip_portal_verts.is_set() {
            return;
        }
        self.data.clip_portal_verts =
            self.read_lump(LumpType::ClipPortalVerts, &PacketsReader::fill(VertexLayout));
    }

    pub fn load_areaportals(&mut self) {
        if self.data.areaportals.is_set() {
            return;
        }
        let variant = variant::areaportal_variant(&self.ctx(LumpType::AreaPortals));
        self.data.areaportals =
            self.read_lump(LumpType::AreaPortals, &PacketsReader::fill(variant));
    }

    pub fn load_overlays(&mut self) {
        if self.data.overlays.is_set() {
            return;
        }
        let variant = variant::overlay_variant(&self.ctx(LumpType::Overlays));
        self.data.overlays = self.read_lump(LumpType::Overlays, &PacketsReader::fill(variant));

        // fade distances and CPU/GPU levels ride along with the overlays
        self.data.overlay_fades =
            self.read_lump(LumpType::OverlayFades, &PacketsReader::fill(OverlayFadeLayout));
        self.data.overlay_system_levels = self.read_lump(
            LumpType::OverlaySystemLevels,
            &PacketsReader::fill(OverlaySystemLevelLayout),
        );
    }

    pub fn load_disp_infos(&mut self) {
        if self.data.disp_infos.is_set() {
            return;
        }
        let variant = variant::disp_info_variant(&self.ctx(LumpType::DispInfo));
        self.data.disp_infos = self.read_lump(LumpType::DispInfo, &PacketsReader::fill(variant));
    }

    pub fn load_disp_verts(&mut self) {
        if self.data.disp_verts.is_set() {
            return;
        }
        self.data.disp_verts =
            self.read_lump(LumpType::DispVerts, &PacketsReader::fill(DispVertLayout));
    }

    pub fn load_disp_tris(&mut self) {
        if self.data.disp_tris.is_set() {
            return;
        }
        self.data.disp_tris =
            self.read_lump(LumpType::DispTris, &PacketsReader::fill(DispTriLayout));
    }

    pub fn load_disp_multi_blends(&mut self) {
        if self.data.disp_multi_blends.is_set() {
            return;
        }
        self.data.disp_multi_blends = self.read_lump(
            LumpType::DispMultiBlend,
            &PacketsReader::fill(DispMultiBlendLayout),
        );
    }

    pub fn load_occlusion(&mut self) {
        if self.data.occlusion.is_set() {
            return;
        }
        let sub_version = self
            .source
            .lump(LumpType::Occlusion)
            .map(|info| info.sub_version)
            .unwrap_or(0);
        let variant = occluder_variant(self.title, sub_version);
        self.data.occlusion = self.read_lump(LumpType::Occlusion, &OcclusionReader::new(variant));
    }

    pub fn load_flags(&mut self) {
        if self.data.map_flags.is_set() {
            return;
        }
        // a missing flags lump legitimately decodes to the empty set only
        // when the lump exists; absent means old format without it
        self.data.map_flags = match self.source.lump_data(LumpType::MapFlags) {
            Some(_) => self.read_lump(LumpType::MapFlags, &FlagsReader),
            None => LumpState::Loaded(LevelFlags::empty()),
        };
    }

    pub fn load_prims(&mut self) {
        if self.data.prims.is_set() {
            return;
        }
        self.data.prims =
            self.read_lump(LumpType::Primitives, &PacketsReader::fill(PrimitiveLayout));
    }

    pub fn load_prim_indices(&mut self) {
        if self.data.prim_indices.is_set() {
            return;
        }
        self.data.prim_indices = self.read_lump(LumpType::PrimIndices, &U16PacketsReader::fill());
    }

    pub fn load_prim_verts(&mut self) {
        if self.data.prim_verts.is_set() {
            return;
        }
        self.data.prim_verts =
            self.read_lump(LumpType::PrimVerts, &PacketsReader::fill(VertexLayout));
    }
}

/// Resolve texture names from the offset table and the raw string blob:
/// for each byte offset, scan forward to the next NUL terminator without
/// running past the blob's end.
fn resolve_texture_names(offsets: &[i32], blob: &[u8]) -> Vec<String> {
    offsets
        .iter()
        .map(|&offset| {
            let start = usize::try_from(offset).unwrap_or(blob.len()).min(blob.len());
            let end = blob[start..]
                .iter()
                .position(|&b| b == 0)
                .map(|p| start + p)
                .unwrap_or(blob.len());
            String::from_utf8_lossy(&blob[start..end]).into_owned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lump::MemBspFile;
    use crate::title::NullTitleResolver;
    use ahash::AHashSet;

    fn reader(file: MemBspFile) -> BspReader<MemBspFile, NullTitleResolver> {
        BspReader::new(file, NullTitleResolver)
    }

    #[test]
    fn test_load_is_idempotent() {
        let file = MemBspFile::new("test.bsp", 20)
            .with_lump(LumpType::Planes, 0, vec![0u8; 40])
            .with_lump(LumpType::Vertexes, 0, vec![0u8; 24]);
        let mut bsp = reader(file);

        bsp.load_all();
        let first = bsp.data().clone();
        bsp.load_all();
        bsp.load_planes();
        assert_eq!(bsp.data(), &first);
        assert_eq!(bsp.data().planes.get().unwrap().len(), 2);
    }

    #[test]
    fn test_failure_isolation() {
        // occlusion lump truncated mid-array, planes intact
        let mut occlusion = Vec::new();
        occlusion.extend_from_slice(&100i32.to_le_bytes());
        occlusion.extend_from_slice(&[0u8; 8]);

        let file = MemBspFile::new("test.bsp", 20)
            .with_lump(LumpType::Occlusion, 1, occlusion)
            .with_lump(LumpType::Planes, 0, vec![0u8; 60]);
        let mut bsp = reader(file);
        bsp.load_all();

        assert_eq!(bsp.data().planes.get().unwrap().len(), 3);
        assert!(matches!(bsp.data().occlusion, LumpState::Failed(_)));
        assert_eq!(bsp.data().occlusion.get(), Some(&OcclusionData::default()));
    }

    #[test]
    fn test_texture_name_resolution() {
        let mut table = Vec::new();
        table.extend_from_slice(&0i32.to_le_bytes());
        table.extend_from_slice(&4i32.to_le_bytes());

        let file = MemBspFile::new("test.bsp", 20)
            .with_lump(LumpType::TexData, 0, Vec::new())
            .with_lump(LumpType::TexDataStringTable, 0, table)
            .with_lump(LumpType::TexDataStringData, 0, b"abc\0xy\0".to_vec());
        let mut bsp = reader(file);
        bsp.load_tex_datas();

        assert_eq!(
            bsp.data().tex_names.get().unwrap(),
            &vec!["abc".to_string(), "xy".to_string()]
        );
    }

    #[test]
    fn test_texture_name_offset_past_blob_end() {
        assert_eq!(
            resolve_texture_names(&[0, 100, -4], b"abc\0"),
            vec!["abc".to_string(), String::new(), String::new()]
        );
        // unterminated tail stops at the blob end
        assert_eq!(resolve_texture_names(&[4], b"abc\0xy"), vec!["xy".to_string()]);
    }

    #[test]
    fn test_missing_static_prop_lump_is_empty() {
        let mut bsp = reader(MemBspFile::new("test.bsp", 20));
        bsp.load_static_props();
        assert_eq!(
            bsp.data().static_props.get(),
            Some(&StaticPropData::default())
        );
    }

    #[test]
    fn test_static_prop_scenario() {
        let mut lump = Vec::new();
        lump.extend_from_slice(&2i32.to_le_bytes());
        for name in ["a.mdl", "b.mdl"] {
            let mut block = [0u8; 128];
            block[..name.len()].copy_from_slice(name.as_bytes());
            lump.extend_from_slice(&block);
        }
        lump.extend_from_slice(&0i32.to_le_bytes()); // leaves
        lump.extend_from_slice(&1i32.to_le_bytes()); // props
        lump.extend_from_slice(&vec![0u8; 60]); // one v5 record

        let file = MemBspFile::new("test.bsp", 20).with_game_lump("sprp", 5, lump);
        let mut bsp = reader(file);
        bsp.load_static_props();

        let props = bsp.data().static_props.get().unwrap();
        assert_eq!(props.dict, vec!["a.mdl", "b.mdl"]);
        assert!(props.leaves.is_empty());
        assert_eq!(props.props.len(), 1);
    }

    #[test]
    fn test_flags_lump() {
        let file =
            MemBspFile::new("test.bsp", 21).with_lump(LumpType::MapFlags, 0, 5u32.to_le_bytes().to_vec());
        let mut bsp = reader(file);
        bsp.load_flags();
        assert_eq!(
            bsp.data().map_flags.get().copied().unwrap(),
            LevelFlags::BAKED_STATIC_PROP_LIGHTING_NONHDR | LevelFlags::LIGHTSTYLES_WITH_CSM
        );
    }

    struct FixedResolver(TitleId);

    impl TitleResolver for FixedResolver {
        fn identify(&self, _: &str, _: u32, classes: &AHashSet<String>) -> TitleId {
            if classes.contains("worldspawn") {
                self.0
            } else {
                TitleId::UNKNOWN
            }
        }
    }

    #[test]
    fn test_entity_load_resolves_title_once() {
        let text = b"{ \"classname\" \"worldspawn\" }\0".to_vec();
        let file = MemBspFile::new("test.bsp", 20).with_lump(LumpType::Entities, 0, text);
        let mut bsp = BspReader::new(file, FixedResolver(TitleId::VINDICTUS));

        assert!(bsp.title().is_unknown());
        bsp.load_entities();
        assert_eq!(bsp.title(), TitleId::VINDICTUS);
        assert_eq!(bsp.data().entities.get().unwrap().len(), 1);

        // loaders resolving after identification pick Vindictus layouts
        let mut edges = Vec::new();
        for v in [7i32, 9i32] {
            edges.extend_from_slice(&v.to_le_bytes());
        }
        let file = MemBspFile::new("test.bsp", 20)
            .with_lump(LumpType::Entities, 0, b"{ \"classname\" \"worldspawn\" }\0".to_vec())
            .with_lump(LumpType::Edges, 0, edges);
        let mut bsp = BspReader::new(file, FixedResolver(TitleId::VINDICTUS));
        bsp.load_entities();
        bsp.load_edges();
        let edges = bsp.data().edges.get().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].v, [7, 9]);
    }

    #[test]
    fn test_preset_title_skips_heuristic() {
        let file = MemBspFile::new("test.bsp", 20);
        let mut bsp =
            BspReader::with_title(file, FixedResolver(TitleId::VINDICTUS), TitleId::HALF_LIFE_2);
        bsp.load_entities();
        assert_eq!(bsp.title(), TitleId::HALF_LIFE_2);
    }

    #[test]
    fn test_contagion_occlusion_version_override() {
        // 0 occluders, 0 polys, 0 vertex indices under sub-version 0,
        // decoded with the v1 record layout because of the title override
        let mut lump = Vec::new();
        for _ in 0..3 {
            lump.extend_from_slice(&0i32.to_le_bytes());
        }
        let file = MemBspFile::new("test.bsp", 21).with_lump(LumpType::Occlusion, 0, lump);
        let mut bsp =
            BspReader::with_title(file, NullTitleResolver, TitleId::CONTAGION);
        bsp.load_occlusion();
        assert!(matches!(bsp.data().occlusion, LumpState::Loaded(_)));
    }

    #[test]
    fn test_missing_lumps_load_empty() {
        let mut bsp = reader(MemBspFile::new("empty.bsp", 20));
        bsp.load_all();
        assert_eq!(bsp.data().planes.get(), Some(&Vec::new()));
        assert_eq!(bsp.data().entities.get(), Some(&Vec::new()));
        assert!(bsp.data().map_flags.get().unwrap().is_empty());
    }
}
