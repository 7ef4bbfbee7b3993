//! Change categories and their presentation constants.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::ObjectKind;

/// Category an identifier is assigned to by the classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Additions,
    Changes,
    MinorChanges,
    Revocations,
    Deprecations,
    Deletions,
}

impl ChangeStatus {
    /// All statuses in report order.
    pub const ALL: [Self; 6] = [
        Self::Additions,
        Self::Changes,
        Self::MinorChanges,
        Self::Revocations,
        Self::Deprecations,
        Self::Deletions,
    ];

    /// Machine key (`additions`, `minor_changes`, ...).
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Additions => "additions",
            Self::Changes => "changes",
            Self::MinorChanges => "minor_changes",
            Self::Revocations => "revocations",
            Self::Deprecations => "deprecations",
            Self::Deletions => "deletions",
        }
    }

    /// Singular form used as a layer comment.
    #[must_use]
    pub const fn singular(&self) -> &'static str {
        match self {
            Self::Additions => "addition",
            Self::Changes => "change",
            Self::MinorChanges => "minor_change",
            Self::Revocations => "revocation",
            Self::Deprecations => "deprecation",
            Self::Deletions => "deletion",
        }
    }

    /// Layer color.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::Additions => "#a1d99b",
            Self::Changes => "#fcf3a2",
            Self::MinorChanges => "#c7c4e0",
            Self::Revocations => "#ff9000",
            Self::Deprecations => "#ff6363",
            Self::Deletions => "#ff00e1",
        }
    }

    /// Explanation used in the Markdown key and in layer legends.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Additions => "objects which are present in the new data and not the old",
            Self::Changes => {
                "objects which have a newer version number in the new data compared to the old"
            }
            Self::MinorChanges => {
                "objects which have a newer last edit date in the new data than in the old, but the same version number"
            }
            Self::Revocations => "objects which are revoked in the new data but not in the old",
            Self::Deprecations => {
                "objects which are deprecated in the new data but not in the old"
            }
            Self::Deletions => "objects which are present in the old data but not the new",
        }
    }

    /// Label of this status in the Markdown key.
    #[must_use]
    pub const fn key_label(&self) -> &'static str {
        match self {
            Self::Additions => "New objects",
            Self::Changes => "Object changes",
            Self::MinorChanges => "Minor object changes",
            Self::Revocations => "Object revocations",
            Self::Deprecations => "Object deprecations",
            Self::Deletions => "Object deletions",
        }
    }

    /// Section header for one kind, e.g. `New Techniques` or `Group changes`.
    #[must_use]
    pub fn section_header(&self, kind: ObjectKind) -> String {
        match self {
            Self::Additions => format!("New {}", kind.plural_title()),
            Self::Changes => format!("{} changes", kind.title()),
            Self::MinorChanges => format!("Minor {} changes", kind.title()),
            Self::Revocations => format!("{} revocations", kind.title()),
            Self::Deprecations => format!("{} deprecations", kind.title()),
            Self::Deletions => format!("{} deletions", kind.title()),
        }
    }

    /// Whether techniques in this status are painted on Navigator layers.
    #[must_use]
    pub const fn shown_in_layers(&self) -> bool {
        !matches!(self, Self::Revocations | Self::Deprecations)
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
