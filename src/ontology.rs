use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Identifier of one ontology structure.
///
/// Ontology dumps are inconsistent about whether ids are JSON numbers
/// or numeric strings; both forms normalize to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StructureId(pub u64);

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for StructureId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = StructureId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an unsigned integer or a numeric string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<StructureId, E> {
                Ok(StructureId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<StructureId, E> {
                u64::try_from(v)
                    .map(StructureId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<StructureId, E> {
                v.parse()
                    .map(StructureId)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// One ontology record: an anatomical region with a display name, a
/// color and an optional parent.
#[derive(Debug, Clone, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub name: String,
    pub color_hex_triplet: String,
    #[serde(default)]
    pub parent_structure_id: Option<StructureId>,
}

/// Reads an ontology file: a JSON array of structure records. Unknown
/// fields in the records are ignored.
pub fn load(path: &Path) -> Result<Vec<Structure>, Error> {
    let data = std::fs::read(path)?;

    Ok(serde_json::from_slice(&data)?)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed ontology: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_string_ids() {
        let structures: Vec<Structure> = serde_json::from_str(
            r#"[
                {"id": 997, "name": "root", "color_hex_triplet": "FFFFFF"},
                {"id": "8", "name": "Basic cell groups and regions", "color_hex_triplet": "BFDAE3", "parent_structure_id": "997"}
            ]"#,
        )
        .unwrap();

        assert_eq!(structures[0].id, StructureId(997));
        assert_eq!(structures[0].parent_structure_id, None);
        assert_eq!(structures[1].id, StructureId(8));
        assert_eq!(structures[1].parent_structure_id, Some(StructureId(997)));
    }

    #[test]
    fn null_parent_means_root() {
        let structures: Vec<Structure> = serde_json::from_str(
            r#"[{"id": 1, "name": "root", "color_hex_triplet": "FFFFFF", "parent_structure_id": null}]"#,
        )
        .unwrap();

        assert_eq!(structures[0].parent_structure_id, None);
    }

    #[test]
    fn ignores_unknown_fields() {
        let structures: Vec<Structure> = serde_json::from_str(
            r#"[{"id": 567, "name": "Cerebrum", "acronym": "CH", "graph_order": 2, "color_hex_triplet": "B0F0FF"}]"#,
        )
        .unwrap();

        assert_eq!(structures[0].name, "Cerebrum");
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let result: Result<Vec<Structure>, _> = serde_json::from_str(
            r#"[{"id": "grey", "name": "x", "color_hex_triplet": "FFFFFF"}]"#,
        );
        assert!(result.is_err());

        let result: Result<Vec<Structure>, _> =
            serde_json::from_str(r#"[{"id": -4, "name": "x", "color_hex_triplet": "FFFFFF"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(Path::new("/nonexistent/ontology.json")).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }
}
