//! STIX relationship objects.

use serde::{Deserialize, Serialize};

/// Relationship type linking a revoked object to its replacement.
pub const REVOKED_BY: &str = "revoked-by";

/// A STIX `relationship` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub id: String,
    pub relationship_type: String,
    pub source_ref: String,
    pub target_ref: String,
}

impl Relationship {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        relationship_type: impl Into<String>,
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            relationship_type: relationship_type.into(),
            source_ref: source_ref.into(),
            target_ref: target_ref.into(),
        }
    }

    /// Shorthand for a `revoked-by` relationship.
    #[must_use]
    pub fn revoked_by(
        id: impl Into<String>,
        source_ref: impl Into<String>,
        target_ref: impl Into<String>,
    ) -> Self {
        Self::new(id, REVOKED_BY, source_ref, target_ref)
    }

    #[must_use]
    pub fn is_revoked_by(&self) -> bool {
        self.relationship_type == REVOKED_BY
    }
}
