// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level document overview

use std::collections::BTreeMap;

use crate::document::Document;
use crate::kind::RecordKind;

/// Key facts about a document, gathered in a single pass
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentSummary {
    pub version: String,
    pub building: String,
    pub location: String,
    /// `begin month/day - end month/day`, when a run period declares both
    pub run_period: Option<String>,
    pub zones: usize,
    pub surfaces: usize,
    pub fenestration: usize,
    /// `HVACTemplate:*` kinds and how many records each has, sorted by kind
    pub hvac_templates: BTreeMap<String, usize>,
    pub has_sqlite: bool,
    pub has_summary_reports: bool,
    pub output_variables: usize,
    pub total_records: usize,
    pub distinct_kinds: usize,
}

impl DocumentSummary {
    pub fn from_document(document: &Document) -> Self {
        let mut summary = DocumentSummary {
            total_records: document.records().len(),
            distinct_kinds: document.count_by_kind().len(),
            ..Default::default()
        };

        for record in document.records() {
            match record.record_kind() {
                RecordKind::Zone => summary.zones += 1,
                RecordKind::BuildingSurface => summary.surfaces += 1,
                RecordKind::FenestrationSurface => summary.fenestration += 1,
                RecordKind::GlobalGeometryRules => {}
                RecordKind::Other => {
                    let has_fields = !record.fields.is_empty();
                    if record.is_kind("Version") && has_fields {
                        summary.version = record.name().to_string();
                    } else if record.is_kind("Building") && has_fields {
                        summary.building = record.name().to_string();
                    } else if record.is_kind("Site:Location") && has_fields {
                        summary.location = record.name().to_string();
                    } else if record.is_kind("RunPeriod") && record.fields.len() >= 6 {
                        // Name, begin month, begin day, begin year, end month, end day
                        summary.run_period = Some(format!(
                            "{}/{} - {}/{}",
                            record.field(1),
                            record.field(2),
                            record.field(4),
                            record.field(5)
                        ));
                    } else if record.kind_starts_with("HVACTemplate:") {
                        *summary.hvac_templates.entry(record.kind.clone()).or_insert(0) += 1;
                    } else if record.is_kind("Output:SQLite") {
                        summary.has_sqlite = true;
                    } else if record.is_kind("Output:Table:SummaryReports") {
                        summary.has_summary_reports = true;
                    } else if record.is_kind("Output:Variable") {
                        summary.output_variables += 1;
                    }
                }
            }
        }

        summary
    }

    /// Whether the simulation needs template expansion before it can run
    #[inline]
    pub fn needs_template_expansion(&self) -> bool {
        !self.hvac_templates.is_empty()
    }
}
