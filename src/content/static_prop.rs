//! Static prop game-lump decoder.
//!
//! The "sprp" game lump is a self-contained sub-format: a 128-byte-string
//! model dictionary, a leaf association list, an optional scaling table
//! (Vindictus) and the prop record array, all sharing one cursor. The
//! record layout cannot be resolved from the declared sub-version alone;
//! the per-record byte size measured from the remaining lump length is
//! part of the key (see [`crate::variant::resolve_static_prop`]).

use ahash::AHashMap;
use tracing::debug;

use super::{ContentReader, RecordVariant};
use crate::error::{Error, Result};
use crate::reader::LumpReader;
use crate::structs::{StaticProp, Vector3};
use crate::title::TitleId;
use crate::variant::resolve_static_prop;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticPropData {
    /// Model name dictionary; prop records index into it.
    pub dict: Vec<String>,
    /// Leaf association list (leaf indices, u16 in the file).
    pub leaves: Vec<u16>,
    pub props: Vec<StaticProp>,
}

#[derive(Debug, Clone, Copy)]
pub struct StaticPropsReader {
    pub title: TitleId,
    pub sub_version: u32,
}

impl StaticPropsReader {
    pub fn new(title: TitleId, sub_version: u32) -> Self {
        Self { title, sub_version }
    }

    fn read_dict(r: &mut LumpReader) -> Result<Vec<String>> {
        let count = r.read_count()?;
        if count.checked_mul(128).map_or(true, |need| need > r.remaining()) {
            return Err(Error::InconsistentCount {
                count,
                record_size: 128,
                remaining: r.remaining(),
            });
        }
        let mut dict = Vec::with_capacity(count);
        for _ in 0..count {
            dict.push(r.read_string_fixed(128)?);
        }
        Ok(dict)
    }

    fn read_leaves(r: &mut LumpReader) -> Result<Vec<u16>> {
        let count = r.read_count()?;
        if count.checked_mul(2).map_or(true, |need| need > r.remaining()) {
            return Err(Error::InconsistentCount {
                count,
                record_size: 2,
                remaining: r.remaining(),
            });
        }
        let mut leaves = Vec::with_capacity(count);
        for _ in 0..count {
            leaves.push(r.read_u16()?);
        }
        Ok(leaves)
    }

    fn read_scaling(r: &mut LumpReader) -> Result<AHashMap<i32, Vector3>> {
        let count = r.read_count()?;
        if count.checked_mul(16).map_or(true, |need| need > r.remaining()) {
            return Err(Error::InconsistentCount {
                count,
                record_size: 16,
                remaining: r.remaining(),
            });
        }
        let mut scaling = AHashMap::with_capacity(count);
        for _ in 0..count {
            scaling.insert(r.read_i32()?, Vector3::read(r)?);
        }
        Ok(scaling)
    }
}

impl ContentReader for StaticPropsReader {
    type Output = StaticPropData;

    fn read(&self, r: &mut LumpReader) -> Result<StaticPropData> {
        let dict = Self::read_dict(r)?;

        // Zeno Clash stores extra model path strings after the dictionary
        if self.title == TitleId::ZENO_CLASH {
            let extra = r.read_count()?;
            let skip = extra.checked_mul(128).ok_or(Error::InconsistentCount {
                count: extra,
                record_size: 128,
                remaining: r.remaining(),
            })?;
            r.skip(skip)?;
        }

        let leaves = Self::read_leaves(r)?;

        let scaling = if self.title == TitleId::VINDICTUS && self.sub_version > 5 {
            Self::read_scaling(r)?
        } else {
            AHashMap::new()
        };

        let count = r.read_count()?;
        if count == 0 {
            return Ok(StaticPropData {
                dict,
                leaves,
                props: Vec::new(),
            });
        }

        let measured_size = r.remaining() / count;
        if measured_size == 0 {
            return Err(Error::InconsistentCount {
                count,
                record_size: measured_size,
                remaining: r.remaining(),
            });
        }

        let resolution = resolve_static_prop(self.title, self.sub_version, measured_size);
        let variant = resolution.variant();
        let padding = resolution.padding();
        debug!(?variant, padding, count, measured_size, "static prop layout");

        let mut props = Vec::with_capacity(count);
        for _ in 0..count {
            let start = r.position();
            let prop = variant.decode(r)?;
            let consumed = r.position() - start;
            if consumed != variant.size() {
                return Err(Error::RecordSizeMismatch {
                    expected: variant.size(),
                    consumed,
                });
            }
            r.skip(padding)?;
            props.push(prop);
        }

        // the one sanctioned post-hoc mutation: attach scale vectors onto
        // records whose variant carries a scaling attribute; other
        // variants silently drop them
        if variant.supports_scaling() {
            for (index, scale) in scaling {
                if let Some(prop) = usize::try_from(index)
                    .ok()
                    .and_then(|i| props.get_mut(i))
                {
                    prop.scale = Some(scale);
                }
            }
        }

        Ok(StaticPropData {
            dict,
            leaves,
            props,
        })
    }

    fn empty(&self) -> StaticPropData {
        StaticPropData::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::StaticPropVariant;

    fn push_i32(data: &mut Vec<u8>, v: i32) {
        data.extend_from_slice(&v.to_le_bytes());
    }

    fn push_name(data: &mut Vec<u8>, name: &str) {
        let mut block = [0u8; 128];
        block[..name.len()].copy_from_slice(name.as_bytes());
        data.extend_from_slice(&block);
    }

    #[test]
    fn test_dict_leaves_and_one_prop() {
        let mut data = Vec::new();
        push_i32(&mut data, 2);
        push_name(&mut data, "a.mdl");
        push_name(&mut data, "b.mdl");
        push_i32(&mut data, 0); // no leaves
        push_i32(&mut data, 1); // one prop
        data.extend_from_slice(&vec![0u8; StaticPropVariant::V5.size()]);

        let reader = StaticPropsReader::new(TitleId::UNKNOWN, 5);
        let result = reader.read(&mut LumpReader::new(&data)).unwrap();
        assert_eq!(result.dict, vec!["a.mdl", "b.mdl"]);
        assert!(result.leaves.is_empty());
        assert_eq!(result.props.len(), 1);
    }

    #[test]
    fn test_zero_props_short_circuits() {
        let mut data = Vec::new();
        push_i32(&mut data, 0); // dict
        push_i32(&mut data, 1); // one leaf
        data.extend_from_slice(&42u16.to_le_bytes());
        push_i32(&mut data, 0); // props

        let reader = StaticPropsReader::new(TitleId::UNKNOWN, 6);
        let result = reader.read(&mut LumpReader::new(&data)).unwrap();
        assert_eq!(result.leaves, vec![42]);
        assert!(result.props.is_empty());
    }

    #[test]
    fn test_unknown_size_falls_back_with_padding() {
        // 3 records of 90 bytes: no layout matches, so each record decodes
        // as v4 (56 bytes) plus 34 padding bytes
        let mut data = Vec::new();
        push_i32(&mut data, 0);
        push_i32(&mut data, 0);
        push_i32(&mut data, 3);
        data.extend_from_slice(&vec![0u8; 3 * 90]);

        let reader = StaticPropsReader::new(TitleId::UNKNOWN, 12);
        let result = reader.read(&mut LumpReader::new(&data)).unwrap();
        assert_eq!(result.props.len(), 3);
    }

    #[test]
    fn test_vindictus_scaling_patch() {
        let mut data = Vec::new();
        push_i32(&mut data, 0); // dict
        push_i32(&mut data, 0); // leaves
        push_i32(&mut data, 1); // scaling entries
        push_i32(&mut data, 1); // applies to prop index 1
        for f in [2.0f32, 2.0, 2.0] {
            data.extend_from_slice(&f.to_le_bytes());
        }
        push_i32(&mut data, 2); // two props, v6 structure reported as v7
        data.extend_from_slice(&vec![0u8; 2 * StaticPropVariant::V7Vindictus.size()]);

        let reader = StaticPropsReader::new(TitleId::VINDICTUS, 7);
        let result = reader.read(&mut LumpReader::new(&data)).unwrap();
        assert_eq!(result.props.len(), 2);
        assert_eq!(result.props[0].scale, None);
        assert_eq!(result.props[1].scale, Some(Vector3::new(2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_corrupt_dict_count_fails_fast() {
        let mut data = Vec::new();
        push_i32(&mut data, i32::MAX);

        let reader = StaticPropsReader::new(TitleId::UNKNOWN, 5);
        let result = reader.read(&mut LumpReader::new(&data));
        assert!(matches!(result, Err(Error::InconsistentCount { .. })));
    }
}
