// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema-free consistency checks
//!
//! Cross-reference and structure checks that need no data dictionary:
//! version, unterminated records, dangling names and duplicates. Field
//! types and legal values are not checked.

use nom::{
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map_res, opt},
    sequence::{pair, preceded},
    IResult,
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::document::Document;
use crate::kind::RecordKind;
use crate::record::Record;

/// Lint settings
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// `major.minor` the document's `Version` record must match
    pub expected_version: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            expected_version: "23.2".to_string(),
        }
    }
}

/// `major.minor[.patch]` version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdfVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

fn version(input: &str) -> IResult<&str, IdfVersion> {
    let (rest, (major, (minor, patch))) = pair(
        number,
        preceded(tag("."), pair(number, opt(preceded(tag("."), number)))),
    )(input)?;
    Ok((
        rest,
        IdfVersion {
            major,
            minor,
            patch,
        },
    ))
}

impl IdfVersion {
    /// Parse `23.2`, `23.2.0`, ... ignoring anything after the numbers
    pub fn parse(text: &str) -> Option<Self> {
        version(text.trim()).ok().map(|(_, v)| v)
    }

    /// Same major and minor release
    #[inline]
    pub fn same_release(&self, other: &IdfVersion) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

impl std::fmt::Display for IdfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// One finding, tied to the line where the offending record starts
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Issue {
    pub line: Option<usize>,
    pub message: String,
}

impl Issue {
    fn at(record: &Record, message: String) -> Self {
        Self {
            line: Some(record.span.start_line),
            message,
        }
    }
}

/// Findings of [`validate`]
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    /// No errors (warnings allowed)
    #[inline]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Case-folded set of record names for a kind predicate
fn name_index<F>(records: &[Record], pred: F) -> FxHashSet<String>
where
    F: Fn(&Record) -> bool,
{
    records
        .iter()
        .filter(|r| !r.fields.is_empty() && pred(*r))
        .map(|r| r.name().to_ascii_lowercase())
        .collect()
}

fn is_material(record: &Record) -> bool {
    record.kind_starts_with("Material") || record.kind_starts_with("WindowMaterial")
}

/// Run every check over a document
pub fn validate(document: &Document, config: &LintConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    let records = document.records();

    check_version(document, config, &mut report);

    for record in document.incomplete_records() {
        report.errors.push(Issue::at(
            record,
            format!(
                "Unclosed object '{}' starting at line {}: missing ';'",
                record.kind, record.span.start_line
            ),
        ));
    }

    let zones = name_index(records, |r| r.record_kind() == RecordKind::Zone);
    let constructions = name_index(records, |r| r.is_kind("Construction"));
    let materials = name_index(records, is_material);
    let surfaces = name_index(records, |r| r.record_kind() == RecordKind::BuildingSurface);

    for record in records {
        match record.record_kind() {
            RecordKind::BuildingSurface => {
                let construction = record.field(2);
                if !construction.is_empty()
                    && !constructions.contains(&construction.to_ascii_lowercase())
                {
                    report.warnings.push(Issue::at(
                        record,
                        format!(
                            "Surface '{}' references unknown construction '{}'",
                            record.name(),
                            construction
                        ),
                    ));
                }
                let zone = record.field(3);
                if !zone.is_empty() && !zones.contains(&zone.to_ascii_lowercase()) {
                    report.warnings.push(Issue::at(
                        record,
                        format!("Surface '{}' references unknown zone '{}'", record.name(), zone),
                    ));
                }
            }
            RecordKind::FenestrationSurface => {
                let parent = record.field(3);
                if !parent.is_empty() && !surfaces.contains(&parent.to_ascii_lowercase()) {
                    report.warnings.push(Issue::at(
                        record,
                        format!(
                            "Sub-surface '{}' references unknown building surface '{}'",
                            record.name(),
                            parent
                        ),
                    ));
                }
            }
            _ if record.is_kind("Construction") => {
                for layer in record.fields.iter().skip(1) {
                    if !layer.is_empty() && !materials.contains(&layer.to_ascii_lowercase()) {
                        report.warnings.push(Issue::at(
                            record,
                            format!(
                                "Construction '{}' references unknown material '{}'",
                                record.name(),
                                layer
                            ),
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    let mut seen: FxHashMap<(String, String), usize> = FxHashMap::default();
    for record in records.iter().filter(|r| !r.fields.is_empty()) {
        let key = (record.kind.to_ascii_lowercase(), record.name().to_ascii_lowercase());
        match seen.get(&key) {
            Some(first) => report.warnings.push(Issue::at(
                record,
                format!(
                    "Duplicate {} name '{}' at lines {} and {}",
                    record.kind,
                    record.name(),
                    first,
                    record.span.start_line
                ),
            )),
            None => {
                seen.insert(key, record.span.start_line);
            }
        }
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated IDF document"
    );
    report
}

fn check_version(document: &Document, config: &LintConfig, report: &mut ValidationReport) {
    let Some(record) = document.records_of_kind("Version").next() else {
        report.errors.push(Issue {
            line: None,
            message: "Missing 'Version' object".to_string(),
        });
        return;
    };

    let declared = record.field(0);
    let matches = match (IdfVersion::parse(declared), IdfVersion::parse(&config.expected_version)) {
        (Some(found), Some(expected)) => found.same_release(&expected),
        _ => declared.starts_with(config.expected_version.as_str()),
    };

    if !matches {
        report.errors.push(Issue::at(
            record,
            format!(
                "Version mismatch: IDF has '{}', expected '{}'",
                declared, config.expected_version
            ),
        ));
    }
}
