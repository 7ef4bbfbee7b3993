//! Data model for ATT&CK releases.
//!
//! A release directory holds one STIX bundle per [`Domain`]. Bundles are
//! loaded into [`StixBundle`]s, and the classifier works on [`Snapshot`]s:
//! immutable id → [`AttackRecord`] maps for a single ([`ObjectKind`], domain)
//! pair.
//!
//! ```ignore
//! let bundle = parse_bundle_str(&json)?;
//! let techniques = Snapshot::from_bundle(&bundle, ObjectKind::Technique, Domain::Enterprise)?;
//! ```

mod bundle;
mod domain;
mod kind;
mod record;
mod relationship;
mod release;
mod snapshot;

pub use bundle::*;
pub use domain::*;
pub use kind::*;
pub use record::*;
pub use relationship::*;
pub use release::*;
pub use snapshot::*;
