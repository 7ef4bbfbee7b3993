//! STIX 2 bundle parser.

use crate::error::{AttackDiffError, ParseErrorKind, Result};
use crate::model::{AttackRecord, ObjectKind, Relationship, StixBundle};
use serde_json::Value;
use tracing::debug;

/// STIX type of relationship objects.
const RELATIONSHIP_TYPE: &str = "relationship";

/// Parser for `{"type": "bundle", "objects": [...]}` documents.
///
/// Objects of tracked types become [`AttackRecord`]s, relationships are kept
/// for revocation lookups, and everything else (tactics, matrices, identities,
/// marking definitions) is counted and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleParser;

impl BundleParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a bundle from JSON text.
    pub fn parse_str(&self, content: &str) -> Result<StixBundle> {
        let document: Value = serde_json::from_str(content)?;
        self.parse_value(document)
    }

    /// Parse a bundle from an already decoded JSON document.
    pub fn parse_value(&self, document: Value) -> Result<StixBundle> {
        let Value::Object(mut map) = document else {
            return Err(AttackDiffError::not_a_bundle("top-level value is not an object"));
        };

        match map.get("type").and_then(Value::as_str) {
            Some("bundle") | None => {}
            Some(other) => {
                return Err(AttackDiffError::not_a_bundle(format!(
                    "top-level type is '{other}'"
                )));
            }
        }

        let objects = match map.remove("objects") {
            Some(Value::Array(objects)) => objects,
            Some(_) => return Err(AttackDiffError::not_a_bundle("'objects' is not an array")),
            None => return Err(AttackDiffError::missing_field("objects", "bundle")),
        };

        let mut records = Vec::new();
        let mut relationships = Vec::new();
        let mut skipped = 0usize;

        for (index, object) in objects.into_iter().enumerate() {
            let stix_type = object
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            if stix_type == RELATIONSHIP_TYPE {
                let relationship: Relationship = serde_json::from_value(object)
                    .map_err(|e| invalid_object(&stix_type, index, &e))?;
                relationships.push(relationship);
            } else if ObjectKind::from_stix_type(&stix_type).is_some() {
                let record: AttackRecord = serde_json::from_value(object)
                    .map_err(|e| invalid_object(&stix_type, index, &e))?;
                records.push(record);
            } else {
                skipped += 1;
            }
        }

        debug!(
            records = records.len(),
            relationships = relationships.len(),
            skipped,
            "parsed bundle"
        );

        let mut bundle = StixBundle::new(records, relationships);
        bundle.skipped_objects = skipped;
        Ok(bundle)
    }
}

fn invalid_object(stix_type: &str, index: usize, error: &serde_json::Error) -> AttackDiffError {
    AttackDiffError::parse(
        format!("reading object #{index}"),
        ParseErrorKind::InvalidObject {
            stix_type: stix_type.to_string(),
            message: error.to_string(),
        },
    )
}
