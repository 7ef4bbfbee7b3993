//! Typed ATT&CK record as found in a STIX bundle.
//!
//! Only the fields the classifier and the renderers need are modelled. Every
//! status field is optional because its *presence* carries meaning for some
//! of the classification rules.

use super::ObjectKind;
use serde::{Deserialize, Serialize};

/// Raw `x_mitre_version` value.
///
/// Releases have shipped the version both as a string (`"1.0"`) and as a
/// number. Anything else is kept verbatim so that it can be reported as
/// unparsable instead of failing the whole bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawVersion {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl std::fmt::Display for RawVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// External reference attached to a record (ATT&CK ID, URL, citations).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Kill-chain phase (tactic) a technique belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillChainPhase {
    #[serde(default)]
    pub kill_chain_name: String,
    pub phase_name: String,
}

/// A versioned, identity-bearing ATT&CK object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    /// STIX identifier, unique within one bundle
    pub id: String,
    /// STIX object type (`attack-pattern`, `malware`, ...)
    #[serde(rename = "type")]
    pub stix_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "x_mitre_version",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<RawVersion>,
    /// Last modification timestamp (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    #[serde(
        rename = "x_mitre_deprecated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub deprecated: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<ExternalReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kill_chain_phases: Vec<KillChainPhase>,
}

impl AttackRecord {
    /// Create a minimal record of the given STIX type.
    #[must_use]
    pub fn new(id: impl Into<String>, stix_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stix_type: stix_type.into(),
            name: None,
            version: None,
            modified: None,
            created: None,
            revoked: None,
            deprecated: None,
            external_references: Vec::new(),
            kill_chain_phases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(RawVersion::Text(version.into()));
        self
    }

    #[must_use]
    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    #[must_use]
    pub const fn with_revoked(mut self, revoked: bool) -> Self {
        self.revoked = Some(revoked);
        self
    }

    #[must_use]
    pub const fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = Some(deprecated);
        self
    }

    #[must_use]
    pub fn with_external_reference(mut self, reference: ExternalReference) -> Self {
        self.external_references.push(reference);
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase_name: impl Into<String>) -> Self {
        self.kill_chain_phases.push(KillChainPhase {
            kill_chain_name: "mitre-attack".to_string(),
            phase_name: phase_name.into(),
        });
        self
    }

    /// Kind of this record, if its STIX type is tracked.
    #[must_use]
    pub fn kind(&self) -> Option<ObjectKind> {
        ObjectKind::from_stix_type(&self.stix_type)
    }

    /// Name for display, falling back to the STIX id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// True when the record carries `revoked: true`.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked == Some(true)
    }

    /// True when the record carries `x_mitre_deprecated: true`.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated == Some(true)
    }

    /// True when the record carries the deprecated flag at all, whatever its value.
    #[must_use]
    pub const fn has_deprecated_flag(&self) -> bool {
        self.deprecated.is_some()
    }

    /// ATT&CK external id (`T1059`, `S0002`, ...) from the first reference.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_references
            .first()
            .and_then(|r| r.external_id.as_deref())
    }

    /// Site path of the record, built from the last two segments of the first
    /// reference URL (`techniques/T1059`).
    #[must_use]
    pub fn url_path(&self) -> Option<String> {
        let url = self.external_references.first()?.url.as_deref()?;
        let segments: Vec<&str> = url.trim_end_matches('/').split('/').collect();
        if segments.len() < 2 {
            return None;
        }
        Some(segments[segments.len() - 2..].join("/"))
    }
}
