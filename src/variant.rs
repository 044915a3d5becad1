//! Variant resolution policy.
//!
//! Pure decision logic mapping (title, file format version, lump
//! sub-version) to a concrete record layout. Each record kind has an
//! ordered rule table: title-specific overrides come before generic
//! format-version rules, which come before the default. Resolution never
//! fails; an unmatched combination falls through to the default, which
//! may later fail at decode time if its size is wrong for the data.

use tracing::warn;

use crate::content::RecordVariant;
use crate::structs::{
    AreaportalVariant, BrushSideVariant, DispInfoVariant, EdgeVariant, FaceVariant, LeafVariant,
    ModelVariant, NodeVariant, OccluderDataVariant, OverlayVariant, StaticPropVariant,
    TexInfoVariant,
};
use crate::title::TitleId;

/// The three version signals a resolution rule may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveCtx {
    pub title: TitleId,
    pub bsp_version: u32,
    pub lump_version: u32,
}

/// One ordered rule: if `when` matches, use `variant`.
pub struct Rule<V> {
    pub when: fn(&ResolveCtx) -> bool,
    pub variant: V,
}

/// First matching rule wins; otherwise the default applies.
pub fn resolve<V: Copy>(rules: &[Rule<V>], default: V, ctx: &ResolveCtx) -> V {
    rules
        .iter()
        .find(|rule| (rule.when)(ctx))
        .map(|rule| rule.variant)
        .unwrap_or(default)
}

const BRUSH_SIDE_RULES: &[Rule<BrushSideVariant>] = &[
    Rule {
        when: |c| c.title == TitleId::VINDICTUS,
        variant: BrushSideVariant::Vindictus,
    },
    // layout changed silently at format version 21 without a sub-version
    // bump; Left 4 Dead 2 kept the old one
    Rule {
        when: |c| c.bsp_version >= 21 && c.title != TitleId::LEFT_4_DEAD_2,
        variant: BrushSideVariant::V2,
    },
];

pub fn brush_side_variant(ctx: &ResolveCtx) -> BrushSideVariant {
    resolve(BRUSH_SIDE_RULES, BrushSideVariant::V1, ctx)
}

const EDGE_RULES: &[Rule<EdgeVariant>] = &[Rule {
    when: |c| c.title == TitleId::VINDICTUS,
    variant: EdgeVariant::Vindictus,
}];

pub fn edge_variant(ctx: &ResolveCtx) -> EdgeVariant {
    resolve(EDGE_RULES, EdgeVariant::V1, ctx)
}

const FACE_RULES: &[Rule<FaceVariant>] = &[
    Rule {
        when: |c| c.title == TitleId::VAMPIRE_BLOODLINES,
        variant: FaceVariant::Vtmb,
    },
    Rule {
        when: |c| c.title == TitleId::VINDICTUS && c.lump_version == 2,
        variant: FaceVariant::VindictusV2,
    },
    Rule {
        when: |c| c.title == TitleId::VINDICTUS,
        variant: FaceVariant::VindictusV1,
    },
    Rule {
        when: |c| c.bsp_version == 17,
        variant: FaceVariant::Bsp17,
    },
    Rule {
        when: |c| c.bsp_version == 18,
        variant: FaceVariant::Bsp18,
    },
];

pub fn face_variant(ctx: &ResolveCtx) -> FaceVariant {
    resolve(FACE_RULES, FaceVariant::V1, ctx)
}

const MODEL_RULES: &[Rule<ModelVariant>] = &[Rule {
    when: |c| c.title == TitleId::DARK_MESSIAH,
    variant: ModelVariant::DarkMessiah,
}];

pub fn model_variant(ctx: &ResolveCtx) -> ModelVariant {
    resolve(MODEL_RULES, ModelVariant::V1, ctx)
}

const TEX_INFO_RULES: &[Rule<TexInfoVariant>] = &[Rule {
    when: |c| c.title == TitleId::DARK_MESSIAH,
    variant: TexInfoVariant::DarkMessiah,
}];

pub fn tex_info_variant(ctx: &ResolveCtx) -> TexInfoVariant {
    resolve(TEX_INFO_RULES, TexInfoVariant::V1, ctx)
}

const NODE_RULES: &[Rule<NodeVariant>] = &[Rule {
    when: |c| c.title == TitleId::VINDICTUS,
    variant: NodeVariant::Vindictus,
}];

pub fn node_variant(ctx: &ResolveCtx) -> NodeVariant {
    resolve(NODE_RULES, NodeVariant::V1, ctx)
}

const LEAF_RULES: &[Rule<LeafVariant>] = &[
    Rule {
        when: |c| c.title == TitleId::VINDICTUS,
        variant: LeafVariant::Vindictus,
    },
    // ambient lighting was embedded in the initial HL2 maps only
    Rule {
        when: |c| c.lump_version == 0 && c.bsp_version == 19,
        variant: LeafVariant::V0,
    },
];

pub fn leaf_variant(ctx: &ResolveCtx) -> LeafVariant {
    resolve(LEAF_RULES, LeafVariant::V1, ctx)
}

/// Width of the leaf-face / leaf-brush index lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U16,
    I32,
}

const LEAF_INDEX_RULES: &[Rule<IndexWidth>] = &[Rule {
    when: |c| c.title == TitleId::VINDICTUS,
    variant: IndexWidth::I32,
}];

pub fn leaf_index_width(ctx: &ResolveCtx) -> IndexWidth {
    resolve(LEAF_INDEX_RULES, IndexWidth::U16, ctx)
}

const AREAPORTAL_RULES: &[Rule<AreaportalVariant>] = &[Rule {
    when: |c| c.title == TitleId::VINDICTUS,
    variant: AreaportalVariant::Vindictus,
}];

pub fn areaportal_variant(ctx: &ResolveCtx) -> AreaportalVariant {
    resolve(AREAPORTAL_RULES, AreaportalVariant::V1, ctx)
}

const OVERLAY_RULES: &[Rule<OverlayVariant>] = &[
    Rule {
        when: |c| c.title == TitleId::VINDICTUS,
        variant: OverlayVariant::Vindictus,
    },
    Rule {
        when: |c| c.title == TitleId::DOTA_2_BETA,
        variant: OverlayVariant::Dota2,
    },
];

pub fn overlay_variant(ctx: &ResolveCtx) -> OverlayVariant {
    resolve(OVERLAY_RULES, OverlayVariant::V1, ctx)
}

const DISP_INFO_RULES: &[Rule<DispInfoVariant>] = &[
    Rule {
        when: |c| c.title == TitleId::VINDICTUS,
        variant: DispInfoVariant::Vindictus,
    },
    Rule {
        when: |c| c.title == TitleId::HALF_LIFE_2 && c.bsp_version == 17,
        variant: DispInfoVariant::Bsp17,
    },
    Rule {
        when: |c| c.title == TitleId::DOTA_2_BETA && c.bsp_version == 22,
        variant: DispInfoVariant::Bsp22,
    },
    Rule {
        when: |c| c.title == TitleId::DOTA_2_BETA && c.bsp_version >= 23,
        variant: DispInfoVariant::Bsp23,
    },
];

pub fn disp_info_variant(ctx: &ResolveCtx) -> DispInfoVariant {
    resolve(DISP_INFO_RULES, DispInfoVariant::V1, ctx)
}

/// Occluder metadata layout. Contagion maps report lump sub-version 0 but
/// actually use 1.
pub fn occluder_variant(title: TitleId, mut sub_version: u32) -> OccluderDataVariant {
    if title == TitleId::CONTAGION && sub_version == 0 {
        warn!("occlusion sub-version 0 overridden to 1 for Contagion");
        sub_version = 1;
    }
    if sub_version > 0 {
        OccluderDataVariant::V1
    } else {
        OccluderDataVariant::V0
    }
}

/// Outcome of the layered static-prop resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPropResolution {
    Known(StaticPropVariant),
    /// No layout could be proven correct for the measured record size.
    /// Decode with the oldest known layout and treat the surplus as
    /// opaque padding after each record; fields beyond the fallback
    /// layout are unrecoverable.
    Fallback { padding: usize },
}

impl StaticPropResolution {
    pub fn variant(&self) -> StaticPropVariant {
        match self {
            Self::Known(v) => *v,
            Self::Fallback { .. } => StaticPropVariant::V4,
        }
    }

    pub fn padding(&self) -> usize {
        match self {
            Self::Known(_) => 0,
            Self::Fallback { padding } => *padding,
        }
    }
}

/// Title+measured-size exact matches. This layer exists because several
/// titles report the same sub-version number for structurally different
/// layouts.
fn static_prop_sized_override(
    title: TitleId,
    sub_version: u32,
    measured_size: usize,
) -> Option<StaticPropVariant> {
    match title {
        TitleId::THE_SHIP if measured_size == 188 => Some(StaticPropVariant::V5Ship),
        TitleId::BLOODY_GOOD_TIME if measured_size == 192 => {
            Some(StaticPropVariant::V6BloodyGoodTime)
        }
        TitleId::ZENO_CLASH if measured_size == 68 => Some(StaticPropVariant::V7ZenoClash),
        TitleId::DARK_MESSIAH if measured_size == 136 => Some(StaticPropVariant::V6DarkMessiah),
        TitleId::DEAR_ESTHER if measured_size == 76 => Some(StaticPropVariant::V9DearEsther),
        // newer Vindictus maps report v6 for a structure identical to V5
        // (and v7 for a V6 structure) because of the extra scaling table
        TitleId::VINDICTUS if sub_version == 6 && measured_size == 60 => {
            Some(StaticPropVariant::V6Vindictus)
        }
        TitleId::VINDICTUS if sub_version == 7 && measured_size == 64 => {
            Some(StaticPropVariant::V7Vindictus)
        }
        // old L4D maps use a v7 that is incompatible with the newer
        // Source 2013 v7
        TitleId::LEFT_4_DEAD if sub_version == 7 && measured_size == 68 => {
            Some(StaticPropVariant::V7)
        }
        // TF2 briefly shipped a v7 that later became v10 everywhere
        TitleId::TEAM_FORTRESS_2 if sub_version == 7 && measured_size == 72 => {
            Some(StaticPropVariant::V10)
        }
        TitleId::COUNTER_STRIKE_GO if sub_version == 10 => Some(StaticPropVariant::V10Csgo),
        TitleId::COUNTER_STRIKE_GO if sub_version == 11 => Some(StaticPropVariant::V11Csgo),
        TitleId::BLACK_MESA if sub_version == 10 && measured_size == 72 => {
            Some(StaticPropVariant::V10)
        }
        TitleId::BLACK_MESA if sub_version == 11 && measured_size == 76 => {
            Some(StaticPropVariant::V11Lite)
        }
        TitleId::BLACK_MESA if sub_version == 11 && measured_size == 80 => {
            Some(StaticPropVariant::V11)
        }
        // Insurgency branched off the CS:GO engine
        TitleId::INSURGENCY if sub_version == 10 && measured_size == 76 => {
            Some(StaticPropVariant::V10Csgo)
        }
        // lite v11 shows up in games other than Black Mesa (or when the
        // title wasn't detected)
        _ if sub_version == 11 && measured_size == 76 => Some(StaticPropVariant::V11Lite),
        _ => None,
    }
}

/// Default family lookup by sub-version number, with an explicit
/// not-found case.
fn static_prop_by_version(sub_version: u32) -> Option<StaticPropVariant> {
    match sub_version {
        4 => Some(StaticPropVariant::V4),
        5 => Some(StaticPropVariant::V5),
        6 => Some(StaticPropVariant::V6),
        7 => Some(StaticPropVariant::V7),
        8 => Some(StaticPropVariant::V8),
        9 => Some(StaticPropVariant::V9),
        10 => Some(StaticPropVariant::V10),
        11 => Some(StaticPropVariant::V11),
        _ => {
            warn!(sub_version, "no static prop layout for this sub-version");
            None
        }
    }
}

/// Layered static-prop resolution keyed additionally by the measured
/// record size (total remaining bytes / record count).
pub fn resolve_static_prop(
    title: TitleId,
    sub_version: u32,
    measured_size: usize,
) -> StaticPropResolution {
    let candidate = static_prop_sized_override(title, sub_version, measured_size)
        .or_else(|| static_prop_by_version(sub_version));

    // a candidate whose declared size disagrees with the measured size is
    // discarded rather than trusted
    let candidate = candidate.filter(|variant| {
        if variant.size() == measured_size {
            true
        } else {
            warn!(
                expected = variant.size(),
                measured = measured_size,
                ?variant,
                "static prop size mismatch, discarding candidate"
            );
            false
        }
    });

    match candidate {
        Some(variant) => StaticPropResolution::Known(variant),
        None => {
            warn!(measured_size, "falling back to static prop v4");
            StaticPropResolution::Fallback {
                padding: measured_size.saturating_sub(StaticPropVariant::V4.size()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(title: TitleId, bsp_version: u32, lump_version: u32) -> ResolveCtx {
        ResolveCtx {
            title,
            bsp_version,
            lump_version,
        }
    }

    #[test]
    fn test_brush_side_rules() {
        assert_eq!(
            brush_side_variant(&ctx(TitleId::VINDICTUS, 20, 0)),
            BrushSideVariant::Vindictus
        );
        assert_eq!(
            brush_side_variant(&ctx(TitleId::UNKNOWN, 21, 0)),
            BrushSideVariant::V2
        );
        assert_eq!(
            brush_side_variant(&ctx(TitleId::LEFT_4_DEAD_2, 21, 0)),
            BrushSideVariant::V1
        );
        assert_eq!(
            brush_side_variant(&ctx(TitleId::UNKNOWN, 20, 0)),
            BrushSideVariant::V1
        );
    }

    #[test]
    fn test_face_rules() {
        assert_eq!(
            face_variant(&ctx(TitleId::VAMPIRE_BLOODLINES, 17, 0)),
            FaceVariant::Vtmb
        );
        assert_eq!(
            face_variant(&ctx(TitleId::VINDICTUS, 20, 2)),
            FaceVariant::VindictusV2
        );
        assert_eq!(
            face_variant(&ctx(TitleId::VINDICTUS, 20, 1)),
            FaceVariant::VindictusV1
        );
        assert_eq!(face_variant(&ctx(TitleId::UNKNOWN, 17, 0)), FaceVariant::Bsp17);
        assert_eq!(face_variant(&ctx(TitleId::UNKNOWN, 18, 0)), FaceVariant::Bsp18);
        assert_eq!(face_variant(&ctx(TitleId::UNKNOWN, 20, 0)), FaceVariant::V1);
    }

    #[test]
    fn test_disp_info_rules() {
        assert_eq!(
            disp_info_variant(&ctx(TitleId::HALF_LIFE_2, 17, 0)),
            DispInfoVariant::Bsp17
        );
        assert_eq!(
            disp_info_variant(&ctx(TitleId::HALF_LIFE_2, 19, 0)),
            DispInfoVariant::V1
        );
        assert_eq!(
            disp_info_variant(&ctx(TitleId::DOTA_2_BETA, 22, 0)),
            DispInfoVariant::Bsp22
        );
        assert_eq!(
            disp_info_variant(&ctx(TitleId::DOTA_2_BETA, 23, 0)),
            DispInfoVariant::Bsp23
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = ctx(TitleId::VINDICTUS, 20, 2);
        for _ in 0..3 {
            assert_eq!(face_variant(&a), FaceVariant::VindictusV2);
            assert_eq!(leaf_variant(&a), LeafVariant::Vindictus);
        }
    }

    #[test]
    fn test_occluder_contagion_override() {
        assert_eq!(
            occluder_variant(TitleId::CONTAGION, 0),
            OccluderDataVariant::V1
        );
        assert_eq!(occluder_variant(TitleId::UNKNOWN, 0), OccluderDataVariant::V0);
        assert_eq!(occluder_variant(TitleId::UNKNOWN, 1), OccluderDataVariant::V1);
    }

    #[test]
    fn test_static_prop_sized_overrides() {
        assert_eq!(
            resolve_static_prop(TitleId::THE_SHIP, 5, 188),
            StaticPropResolution::Known(StaticPropVariant::V5Ship)
        );
        assert_eq!(
            resolve_static_prop(TitleId::VINDICTUS, 6, 60),
            StaticPropResolution::Known(StaticPropVariant::V6Vindictus)
        );
        assert_eq!(
            resolve_static_prop(TitleId::TEAM_FORTRESS_2, 7, 72),
            StaticPropResolution::Known(StaticPropVariant::V10)
        );
        // generic v7 still resolves through the version family
        assert_eq!(
            resolve_static_prop(TitleId::UNKNOWN, 7, 68),
            StaticPropResolution::Known(StaticPropVariant::V7)
        );
    }

    #[test]
    fn test_static_prop_size_mismatch_discards_candidate() {
        // v5 declares 60 bytes; a measured 61 must fall back with padding
        assert_eq!(
            resolve_static_prop(TitleId::UNKNOWN, 5, 61),
            StaticPropResolution::Fallback { padding: 5 }
        );
    }

    #[test]
    fn test_static_prop_unknown_version_falls_back() {
        assert_eq!(
            resolve_static_prop(TitleId::UNKNOWN, 13, 90),
            StaticPropResolution::Fallback { padding: 34 }
        );
    }
}
