//! Texture projection and material reference records.

use super::Vector3;
use crate::content::RecordVariant;
use crate::error::Result;
use crate::reader::LumpReader;

/// Texture projection info (72 bytes; Dark Messiah appends 24 unknown
/// bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexInfo {
    pub texture_vecs: [[f32; 4]; 2],
    pub lightmap_vecs: [[f32; 4]; 2],
    pub flags: u32,
    pub tex_data: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexInfoVariant {
    V1,
    DarkMessiah,
}

impl RecordVariant for TexInfoVariant {
    type Record = TexInfo;

    fn size(&self) -> usize {
        match self {
            Self::V1 => 72,
            Self::DarkMessiah => 96,
        }
    }

    fn decode(&self, r: &mut LumpReader) -> Result<TexInfo> {
        let mut read_vec4 = |r: &mut LumpReader| -> Result<[f32; 4]> {
            Ok([r.read_f32()?, r.read_f32()?, r.read_f32()?, r.read_f32()?])
        };
        let info = TexInfo {
            texture_vecs: [read_vec4(r)?, read_vec4(r)?],
            lightmap_vecs: [read_vec4(r)?, read_vec4(r)?],
            flags: r.read_u32()?,
            tex_data: r.read_i32()?,
        };
        if matches!(self, Self::DarkMessiah) {
            r.skip(24)?;
        }
        Ok(info)
    }
}

/// Material dimensions and reflectivity (32 bytes). The actual material
/// name is resolved through the string table lumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexData {
    pub reflectivity: Vector3,
    pub name_string_table_id: i32,
    pub width: i32,
    pub height: i32,
    pub view_width: i32,
    pub view_height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexDataLayout;

impl RecordVariant for TexDataLayout {
    type Record = TexData;

    fn size(&self) -> usize {
        32
    }

    fn decode(&self, r: &mut LumpReader) -> Result<TexData> {
        Ok(TexData {
            reflectivity: Vector3::read(r)?,
            name_string_table_id: r.read_i32()?,
            width: r.read_i32()?,
            height: r.read_i32()?,
            view_width: r.read_i32()?,
            view_height: r.read_i32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texinfo_consumes_declared_size() {
        for variant in [TexInfoVariant::V1, TexInfoVariant::DarkMessiah] {
            let data = vec![0u8; variant.size()];
            let mut r = LumpReader::new(&data);
            variant.decode(&mut r).unwrap();
            assert!(r.is_empty());
        }
    }
}
