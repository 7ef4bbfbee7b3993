//! ATT&CK Navigator layer generator.
//!
//! One layer per domain, painting every technique that was added, changed,
//! minor-changed or deleted. Revocations and deprecations are not painted.

use super::{ReportConfig, ReportError};
use crate::diff::{ChangeStatus, DiffReport};
use crate::model::{Domain, ObjectKind};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;

/// Navigator layer format version.
pub const LAYER_VERSION: &str = "2.2";

/// Background color of tactic header rows.
const TACTIC_ROW_BACKGROUND: &str = "#205b8f";

/// `T1059` or `T1059.001`.
static TECHNIQUE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T\d{4}(\.\d{3})?$").expect("static regex"));

/// A technique cell of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerTechnique {
    #[serde(rename = "techniqueID")]
    pub technique_id: String,
    pub tactic: String,
    pub enabled: bool,
    pub color: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendItem {
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFilters {
    pub stages: Vec<String>,
}

/// A Navigator layer document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorLayer {
    pub version: String,
    pub name: String,
    pub description: String,
    pub domain: String,
    pub techniques: Vec<LayerTechnique>,
    pub sorting: u8,
    pub hide_disabled: bool,
    pub legend_items: Vec<LegendItem>,
    pub show_tactic_row_background: bool,
    pub tactic_row_background: String,
    pub select_techniques_across_tactics: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<LayerFilters>,
}

/// Layer generator
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerReporter;

impl LayerReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build the layers of every domain in the report, in report order.
    ///
    /// Fails when the report does not cover techniques.
    pub fn generate_layers(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<IndexMap<Domain, NavigatorLayer>, ReportError> {
        let Some(by_domain) = report.sections.get(&ObjectKind::Technique) else {
            return Err(ReportError::ConfigError(
                "layers require the technique kind to be selected".to_string(),
            ));
        };

        let release = config.release_label();
        Ok(by_domain
            .iter()
            .map(|(&domain, diff)| {
                let mut techniques = Vec::new();
                let mut used = Vec::new();
                for (status, entries) in diff.sections() {
                    if !status.shown_in_layers() {
                        continue;
                    }
                    for entry in entries {
                        let Some(technique_id) = entry.record.external_id() else {
                            warn!(id = %entry.record.id, %domain, "technique has no ATT&CK id, not painted");
                            continue;
                        };
                        if !TECHNIQUE_ID.is_match(technique_id) {
                            warn!(id = %entry.record.id, technique_id, "unexpected technique id format");
                        }
                        for phase in &entry.record.kill_chain_phases {
                            techniques.push(LayerTechnique {
                                technique_id: technique_id.to_string(),
                                tactic: phase.phase_name.clone(),
                                enabled: true,
                                color: status.color().to_string(),
                                comment: status.singular().to_string(),
                            });
                            if !used.contains(&status) {
                                used.push(status);
                            }
                        }
                    }
                }
                (domain, build_layer(domain, &release, techniques, &used))
            })
            .collect())
    }

    /// Serialize one layer the way Navigator files are written (4-space indent).
    pub fn to_json(&self, layer: &NavigatorLayer) -> Result<String, ReportError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        layer
            .serialize(&mut serializer)
            .map_err(|e| ReportError::SerializationError(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

fn build_layer(
    domain: Domain,
    release: &str,
    techniques: Vec<LayerTechnique>,
    used: &[ChangeStatus],
) -> NavigatorLayer {
    let mut used = used.to_vec();
    used.sort();
    let legend_items = used
        .into_iter()
        .map(|status| LegendItem {
            color: status.color().to_string(),
            label: format!("{}: {}", status.key(), status.description()),
        })
        .collect();

    NavigatorLayer {
        version: LAYER_VERSION.to_string(),
        name: format!("{release} {} Updates", domain.label()),
        description: format!(
            "{} updates for the {release} release of ATT&CK",
            domain.label()
        ),
        domain: domain.layer_domain().to_string(),
        techniques,
        sorting: 0,
        hide_disabled: false,
        legend_items,
        show_tactic_row_background: true,
        tactic_row_background: TACTIC_ROW_BACKGROUND.to_string(),
        select_techniques_across_tactics: true,
        filters: (domain == Domain::Pre).then(|| LayerFilters {
            stages: vec!["prepare".to_string()],
        }),
    }
}
