//! Entity lump text parser.
//!
//! The entity lump is the one non-binary lump: a sequence of
//! brace-delimited blocks of quoted key/value pairs, usually terminated
//! by a NUL byte:
//!
//! ```text
//! {
//! "classname" "worldspawn"
//! "skyname" "sky_day01_01"
//! }
//! ```

use super::ContentReader;
use crate::error::{Error, Result};
use crate::reader::LumpReader;

/// One decoded entity: its key/value pairs in file order. Duplicate keys
/// are legal (e.g. multiple "output" connections) and preserved.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    pub key_values: Vec<(String, String)>,
}

impl Entity {
    pub fn class_name(&self) -> &str {
        self.value("classname").unwrap_or("")
    }

    /// First value stored under `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.key_values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parses entity blocks until the lump is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct EntitiesReader {
    /// Honour backslash-escaped quotes inside values. Needed for the
    /// Vampire: Bloodlines export, which writes `\"` in entity values.
    pub allow_escapes: bool,
}

impl EntitiesReader {
    pub fn new(allow_escapes: bool) -> Self {
        Self { allow_escapes }
    }

    fn parse_quoted(&self, data: &[u8], mut pos: usize) -> Result<(String, usize)> {
        debug_assert_eq!(data[pos], b'"');
        pos += 1;
        let mut out = Vec::new();
        while pos < data.len() {
            match data[pos] {
                b'\\' if self.allow_escapes
                    && matches!(data.get(pos + 1), Some(b'"') | Some(b'\\')) =>
                {
                    out.push(data[pos + 1]);
                    pos += 2;
                }
                b'"' => {
                    return Ok((String::from_utf8_lossy(&out).into_owned(), pos + 1));
                }
                b => {
                    out.push(b);
                    pos += 1;
                }
            }
        }
        Err(Error::EntityParse("unterminated string".into()))
    }
}

fn skip_whitespace(data: &[u8], mut pos: usize) -> usize {
    while pos < data.len() && matches!(data[pos], b' ' | b'\t' | b'\r' | b'\n' | 0) {
        pos += 1;
    }
    pos
}

impl ContentReader for EntitiesReader {
    type Output = Vec<Entity>;

    fn read(&self, r: &mut LumpReader) -> Result<Vec<Entity>> {
        let data = r.read_remaining();
        let mut entities = Vec::new();
        let mut pos = 0;

        loop {
            pos = skip_whitespace(data, pos);
            if pos >= data.len() {
                break;
            }
            if data[pos] != b'{' {
                return Err(Error::EntityParse(format!(
                    "expected '{{' at byte {pos}, found {:#04x}",
                    data[pos]
                )));
            }
            pos += 1;

            let mut entity = Entity::default();
            loop {
                pos = skip_whitespace(data, pos);
                match data.get(pos) {
                    Some(b'}') => {
                        pos += 1;
                        break;
                    }
                    Some(b'"') => {
                        let (key, next) = self.parse_quoted(data, pos)?;
                        pos = skip_whitespace(data, next);
                        match data.get(pos) {
                            Some(b'"') => {
                                let (value, next) = self.parse_quoted(data, pos)?;
                                pos = next;
                                entity.key_values.push((key, value));
                            }
                            _ => {
                                return Err(Error::EntityParse(format!(
                                    "key {key:?} has no value"
                                )))
                            }
                        }
                    }
                    Some(b) => {
                        return Err(Error::EntityParse(format!(
                            "unexpected byte {b:#04x} in entity block"
                        )))
                    }
                    None => return Err(Error::EntityParse("unterminated entity block".into())),
                }
            }
            entities.push(entity);
        }

        Ok(entities)
    }

    fn empty(&self) -> Vec<Entity> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, allow_escapes: bool) -> Result<Vec<Entity>> {
        EntitiesReader::new(allow_escapes).read(&mut LumpReader::new(text.as_bytes()))
    }

    #[test]
    fn test_parse_two_entities() {
        let text = "{\n\"classname\" \"worldspawn\"\n\"skyname\" \"sky_day01_01\"\n}\n{\n\"classname\" \"info_player_start\"\n}\n\0";
        let entities = parse(text, false).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].class_name(), "worldspawn");
        assert_eq!(entities[0].value("skyname"), Some("sky_day01_01"));
        assert_eq!(entities[1].class_name(), "info_player_start");
    }

    #[test]
    fn test_escaped_quotes_only_when_enabled() {
        let text = r#"{ "message" "say \"hi\"" }"#;
        let entities = parse(text, true).unwrap();
        assert_eq!(entities[0].value("message"), Some(r#"say "hi""#));

        // without escape support, the backslash terminates differently and
        // the block no longer parses
        assert!(parse(text, false).is_err());
    }

    #[test]
    fn test_duplicate_keys_preserved() {
        let text = "{ \"output\" \"a\" \"output\" \"b\" }";
        let entities = parse(text, false).unwrap();
        assert_eq!(entities[0].key_values.len(), 2);
        assert_eq!(entities[0].value("output"), Some("a"));
    }

    #[test]
    fn test_unterminated_block_fails() {
        assert!(matches!(
            parse("{ \"classname\" \"worldspawn\"", false),
            Err(Error::EntityParse(_))
        ));
    }

    #[test]
    fn test_empty_lump_yields_no_entities() {
        assert!(parse("\0", false).unwrap().is_empty());
        assert!(parse("", false).unwrap().is_empty());
    }
}
