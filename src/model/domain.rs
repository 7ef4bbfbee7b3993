//! ATT&CK domains (sub-domains sharing the same object schema).

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An ATT&CK domain. Each domain ships as its own STIX bundle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum Domain {
    #[serde(rename = "enterprise-attack")]
    #[value(name = "enterprise-attack")]
    Enterprise,
    #[serde(rename = "mobile-attack")]
    #[value(name = "mobile-attack")]
    Mobile,
    #[serde(rename = "pre-attack")]
    #[value(name = "pre-attack")]
    Pre,
}

impl Domain {
    /// All domains, in layer-file order.
    pub const ALL: [Self; 3] = [Self::Enterprise, Self::Mobile, Self::Pre];

    /// Identifier used for bundle file names (`enterprise-attack`, ...).
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise-attack",
            Self::Mobile => "mobile-attack",
            Self::Pre => "pre-attack",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::Mobile => "Mobile",
            Self::Pre => "PRE-ATT&CK",
        }
    }

    /// Domain string expected by the Navigator layer format.
    #[must_use]
    pub const fn layer_domain(&self) -> &'static str {
        match self {
            Self::Enterprise => "mitre-enterprise",
            Self::Mobile => "mitre-mobile",
            Self::Pre => "pre-attack",
        }
    }

    /// Short suffix for default layer file names.
    #[must_use]
    pub const fn file_suffix(&self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::Mobile => "Mobile",
            Self::Pre => "Pre",
        }
    }

    /// File name of this domain's bundle inside a release directory.
    #[must_use]
    pub fn bundle_file_name(&self) -> String {
        format!("{}.json", self.id())
    }

    /// Parse a domain from its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.id() == id)
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_ids() {
        assert_eq!(Domain::from_id("mobile-attack"), Some(Domain::Mobile));
        assert_eq!(Domain::from_id("ics-attack"), None);
        assert_eq!(Domain::Enterprise.bundle_file_name(), "enterprise-attack.json");
    }

    #[test]
    fn test_domain_serde_uses_ids() {
        let json = serde_json::to_string(&Domain::Pre).expect("serialize");
        assert_eq!(json, "\"pre-attack\"");
        let parsed: Domain = serde_json::from_str("\"enterprise-attack\"").expect("deserialize");
        assert_eq!(parsed, Domain::Enterprise);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Domain::Pre.label(), "PRE-ATT&CK");
        assert_eq!(Domain::Mobile.layer_domain(), "mitre-mobile");
    }
}
