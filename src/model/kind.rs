//! Object kinds tracked by the diff and their STIX type mapping.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Category of ATT&CK object compared by the diff.
///
/// Each kind maps to one or more STIX object types. Software is the only kind
/// spanning two types (`malware` and `tool`).
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
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Technique,
    Software,
    Group,
    Mitigation,
}

impl ObjectKind {
    /// All kinds in report order.
    pub const ALL: [Self; 4] = [
        Self::Technique,
        Self::Software,
        Self::Group,
        Self::Mitigation,
    ];

    /// STIX `type` values that belong to this kind.
    #[must_use]
    pub const fn stix_types(&self) -> &'static [&'static str] {
        match self {
            Self::Technique => &["attack-pattern"],
            Self::Software => &["malware", "tool"],
            Self::Group => &["intrusion-set"],
            Self::Mitigation => &["course-of-action"],
        }
    }

    /// Resolve the kind of a STIX object type, if it is one we track.
    #[must_use]
    pub fn from_stix_type(stix_type: &str) -> Option<Self> {
        match stix_type {
            "attack-pattern" => Some(Self::Technique),
            "malware" | "tool" => Some(Self::Software),
            "intrusion-set" => Some(Self::Group),
            "course-of-action" => Some(Self::Mitigation),
            _ => None,
        }
    }

    /// Lowercase singular name (`technique`, `software`, ...).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Technique => "technique",
            Self::Software => "software",
            Self::Group => "group",
            Self::Mitigation => "mitigation",
        }
    }

    /// Lowercase plural name. Software does not take an `s`.
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            Self::Technique => "techniques",
            Self::Software => "software",
            Self::Group => "groups",
            Self::Mitigation => "mitigations",
        }
    }

    /// Capitalized singular name, used in section headers.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Technique => "Technique",
            Self::Software => "Software",
            Self::Group => "Group",
            Self::Mitigation => "Mitigation",
        }
    }

    /// Capitalized plural name, used in headings.
    #[must_use]
    pub const fn plural_title(&self) -> &'static str {
        match self {
            Self::Technique => "Techniques",
            Self::Software => "Software",
            Self::Group => "Groups",
            Self::Mitigation => "Mitigations",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
