//! Static prop records.
//!
//! Prop layouts diverged across nearly every engine branch, frequently
//! without bumping the declared sub-version, so several variants here can
//! only be told apart by the measured per-record byte size (see the
//! layered resolution in [`crate::variant`]).

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticProp {
    pub origin: Vector3,
    pub angles: Vector3,
    /// Index into the model name dictionary.
    pub prop_type: u16,
    pub first_leaf: u16,
    pub leaf_count: u16,
    pub solid: u8,
    pub flags: u8,
    pub skin: i32,
    pub fade_min_dist: f32,
    pub fade_max_dist: f32,
    pub lighting_origin: Vector3,
    pub forced_fade_scale: Option<f32>,
    pub min_dx_level: Option<u16>,
    pub max_dx_level: Option<u16>,
    pub min_cpu_level: Option<u8>,
    pub max_cpu_level: Option<u8>,
    pub min_gpu_level: Option<u8>,
    pub max_gpu_level: Option<u8>,
    pub diffuse_modulation: Option<[u8; 4]>,
    pub disable_x360: Option<bool>,
    pub flags_ex: Option<u32>,
    pub uniform_scale: Option<f32>,
    /// Per-prop scale vector patched in from the Vindictus scaling table.
    pub scale: Option<Vector3>,
    /// Embedded target name used by a few Outerlight titles.
    pub target_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPropVariant {
    /// Oldest known layout (56 bytes); also the lossy fallback.
    V4,
    /// V4 + forced fade scale (60 bytes).
    V5,
    /// V5 + DirectX level limits (64 bytes).
    V6,
    /// V6 + diffuse modulation (68 bytes); also the old Left 4 Dead v7.
    V7,
    /// Zeno Clash v7: V6 + unknown i32 (68 bytes).
    V7ZenoClash,
    /// V5 + CPU/GPU levels + diffuse modulation (68 bytes).
    V8,
    /// V8 + Xbox 360 disable flag (72 bytes).
    V9,
    /// Dear Esther v9: V8 + 8 unknown bytes (76 bytes).
    V9DearEsther,
    /// Source 2013 / TF2 layout: V6 + unknown + extra flags (72 bytes).
    V10,
    /// CS:GO and Insurgency v10: V9 + extra flags (76 bytes).
    V10Csgo,
    /// Black Mesa "lite" v11: V10 + uniform scale (76 bytes).
    V11Lite,
    /// Black Mesa full v11 (80 bytes).
    V11,
    /// CS:GO v11 with uniform prop scaling (80 bytes).
    V11Csgo,
    /// The Ship: V5 + embedded 128-byte target name (188 bytes).
    V5Ship,
    /// Bloody Good Time: V6 + embedded target name (192 bytes).
    V6BloodyGoodTime,
    /// Dark Messiah: V6 + 72 unknown bytes (136 bytes).
    V6DarkMessiah,
    /// Vindictus sprp v6, structurally a V5 record (60 bytes).
    V6Vindictus,
    /// Vindictus sprp v7, structurally a V6 record (64 bytes).
    V7Vindictus,
}

impl StaticPropVariant {
    /// Whether records of this variant accept a scale vector from the
    /// separate Vindictus scaling table.
    pub fn supports_scaling(&self) -> bool {
        matches!(self, Self::V6Vindictus | Self::V7Vindictus)
    }

    fn decode_core(r: &mut LumpReader) -> Result<StaticProp> {
        Ok(StaticProp {
            origin: Vector3::read(r)?,
            angles: Vector3::read(r)?,
            prop_type: r.read_u16()?,
            first_leaf: r.read_u16()?,
            leaf_count: r.read_u16()?,
            solid: r.read_u8()?,
            flags: r.read_u8()?,
            skin: r.read_i32()?,
            fade_min_dist: r.read_f32()?,
            fade_max_dist: r.read_f32()?,
            lighting_origin: Vector3::read(r)?,
            ..StaticProp::default()
        })
    }

    fn read_dx_levels(p: &mut StaticProp, r: &mut LumpReader) -> Result<()> {
        p.min_dx_level = Some(r.read_u16()?);
        p.max_dx_level = Some(r.read_u16()?);
        Ok(())
    }

    fn read_system_levels(p: &mut StaticProp, r: &mut LumpReader) -> Result<()> {
        p.min_cpu_level = Some(r.read_u8()?);
        p.max_cpu_level = Some(r.read_u8()?);
        p.min_gpu_level = Some(r.read_u8()?);
        p.max_gpu_level = Some(r.read_u8()?);
        Ok(())
    }

    fn read_diffuse(p: &mut StaticProp, r: &mut LumpReader) -> Result<()> {
        let bytes = r.read_bytes(4)?;
        p.diffuse_modulation = Some([bytes[0], bytes[1], bytes[2], bytes[3]]);
        Ok(())
    }
}

impl RecordVariant for StaticPropVariant {
    type Record = StaticProp;

    fn size(&self) -> usize {
        match self {
            Self::V4 => 56,
            Self::V5 | Self::V6Vindictus => 60,
            Self::V6 | Self::V7Vindictus => 64,
            Self::V7 | Self::V7ZenoClash | Self::V8 => 68,
            Self::V9 | Self::V10 => 72,
            Self::V9DearEsther | Self::V10Csgo | Self::V11Lite => 76,
            Self::V11 | Self::V11Csgo => 80,
            Self::V6DarkMessiah => 136,
            Self::V5Ship => 188,
            Self::V6BloodyGoodTime => 192,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<StaticProp> {
        let mut p = Self::decode_core(r)?;
        if !matches!(self, Self::V4) {
            p.forced_fade_scale = Some(r.read_f32()?);
        }
        match self {
            Self::V4 | Self::V5 | Self::V6Vindictus => {}
            Self::V6 | Self::V7Vindictus => {
                Self::read_dx_levels(&mut p, r)?;
            }
            Self::V7 => {
                Self::read_dx_levels(&mut p, r)?;
                Self::read_diffuse(&mut p, r)?;
            }
            Self::V7ZenoClash => {
                Self::read_dx_levels(&mut p, r)?;
                r.skip(4)?;
            }
            Self::V8 => {
                Self::read_system_levels(&mut p, r)?;
                Self::read_diffuse(&mut p, r)?;
            }
            Self::V9 => {
                Self::read_system_levels(&mut p, r)?;
                Self::read_diffuse(&mut p, r)?;
                p.disable_x360 = Some(r.read_i32()? != 0);
            }
            Self::V9DearEsther => {
                Self::read_system_levels(&mut p, r)?;
                Self::read_diffuse(&mut p, r)?;
                r.skip(8)?;
            }
            Self::V10 => {
                Self::read_dx_levels(&mut p, r)?;
                r.skip(4)?;
                p.flags_ex = Some(r.read_u32()?);
            }
            Self::V10Csgo => {
                Self::read_system_levels(&mut p, r)?;
                Self::read_diffuse(&mut p, r)?;
                p.disable_x360 = Some(r.read_i32()? != 0);
                p.flags_ex = Some(r.read_u32()?);
            }
            Self::V11Lite => {
                Self::read_dx_levels(&mut p, r)?;
                r.skip(4)?;
                p.flags_ex = Some(r.read_u32()?);
                p.uniform_scale = Some(r.read_f32()?);
            }
            Self::V11 | Self::V11Csgo => {
                Self::read_system_levels(&mut p, r)?;
                Self::read_diffuse(&mut p, r)?;
                p.disable_x360 = Some(r.read_i32()? != 0);
                p.flags_ex = Some(r.read_u32()?);
                p.uniform_scale = Some(r.read_f32()?);
            }
            Self::V6DarkMessiah => {
                Self::read_dx_levels(&mut p, r)?;
                r.skip(72)?;
            }
            Self::V5Ship => {
                p.target_name = Some(r.read_string_fixed(128)?);
            }
            Self::V6BloodyGoodTime => {
                Self::read_dx_levels(&mut p, r)?;
                p.target_name = Some(r.read_string_fixed(128)?);
            }
        }
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[StaticPropVariant] = &[
        StaticPropVariant::V4,
        StaticPropVariant::V5,
        StaticPropVariant::V6,
        StaticPropVariant::V7,
        StaticPropVariant::V7ZenoClash,
        StaticPropVariant::V8,
        StaticPropVariant::V9,
        StaticPropVariant::V9DearEsther,
        StaticPropVariant::V10,
        StaticPropVariant::V10Csgo,
        StaticPropVariant::V11Lite,
        StaticPropVariant::V11,
        StaticPropVariant::V11Csgo,
        StaticPropVariant::V5Ship,
        StaticPropVariant::V6BloodyGoodTime,
        StaticPropVariant::V6DarkMessiah,
        StaticPropVariant::V6Vindictus,
        StaticPropVariant::V7Vindictus,
    ];

    #[test]
    fn test_all_variants_consume_declared_size() {
        for variant in ALL {
            let data = vec![0u8; variant.size()];
            let mut r = LumpReader::new(&data);
            variant.decode(&mut r).unwrap();
            assert!(r.is_empty(), "{variant:?} must consume its declared size");
        }
    }

    #[test]
    fn test_only_vindictus_variants_take_scaling() {
        for variant in ALL {
            let expected = matches!(
                variant,
                StaticPropVariant::V6Vindictus | StaticPropVariant::V7Vindictus
            );
            assert_eq!(variant.supports_scaling(), expected);
        }
    }
}
