// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record kinds interpreted by IDF-Lite
//!
//! Everything else in a document is carried as [`RecordKind::Other`] and
//! only ever round-tripped as text.

/// Header field labels of `BuildingSurface:Detailed`, in file order.
pub const BUILDING_SURFACE_FIELDS: [&str; 11] = [
    "Name",
    "Surface Type",
    "Construction Name",
    "Zone Name",
    "Space Name",
    "Outside Boundary Condition",
    "Outside Boundary Condition Object",
    "Sun Exposure",
    "Wind Exposure",
    "View Factor to Ground",
    "Number of Vertices",
];

/// Header field labels of `FenestrationSurface:Detailed`, in file order.
pub const FENESTRATION_FIELDS: [&str; 9] = [
    "Name",
    "Surface Type",
    "Construction Name",
    "Building Surface Name",
    "Outside Boundary Condition Object",
    "View Factor to Ground",
    "Frame and Divider Name",
    "Multiplier",
    "Number of Vertices",
];

/// Tagged view of a record's declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    /// `BuildingSurface:Detailed`
    BuildingSurface,
    /// `FenestrationSurface:Detailed`
    FenestrationSurface,
    /// `GlobalGeometryRules`
    GlobalGeometryRules,
    /// `Zone`
    Zone,
    /// Any kind this crate does not interpret
    Other,
}

impl RecordKind {
    /// Resolve a kind name, ignoring ASCII case
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "buildingsurface:detailed" => RecordKind::BuildingSurface,
            "fenestrationsurface:detailed" => RecordKind::FenestrationSurface,
            "globalgeometryrules" => RecordKind::GlobalGeometryRules,
            "zone" => RecordKind::Zone,
            _ => RecordKind::Other,
        }
    }

    /// Canonical spelling used when writing new records
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::BuildingSurface => "BuildingSurface:Detailed",
            RecordKind::FenestrationSurface => "FenestrationSurface:Detailed",
            RecordKind::GlobalGeometryRules => "GlobalGeometryRules",
            RecordKind::Zone => "Zone",
            RecordKind::Other => "",
        }
    }

    /// Index of the first vertex coordinate in `fields`, for vertex-bearing kinds
    pub fn vertex_start(&self) -> Option<usize> {
        match self {
            RecordKind::BuildingSurface => Some(BUILDING_SURFACE_FIELDS.len()),
            RecordKind::FenestrationSurface => Some(FENESTRATION_FIELDS.len()),
            _ => None,
        }
    }

    /// Labels of the fixed header fields preceding the vertices
    pub fn header_labels(&self) -> &'static [&'static str] {
        match self {
            RecordKind::BuildingSurface => &BUILDING_SURFACE_FIELDS,
            RecordKind::FenestrationSurface => &FENESTRATION_FIELDS,
            _ => &[],
        }
    }

    #[inline]
    pub fn has_vertices(&self) -> bool {
        self.vertex_start().is_some()
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Other => write!(f, "Other"),
            kind => write!(f, "{}", kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(
            RecordKind::from_name("BUILDINGSURFACE:DETAILED"),
            RecordKind::BuildingSurface
        );
        assert_eq!(
            RecordKind::from_name("fenestrationSurface:Detailed"),
            RecordKind::FenestrationSurface
        );
        assert_eq!(RecordKind::from_name(" zone "), RecordKind::Zone);
        assert_eq!(RecordKind::from_name("Material"), RecordKind::Other);
    }

    #[test]
    fn test_vertex_offsets() {
        assert_eq!(RecordKind::BuildingSurface.vertex_start(), Some(11));
        assert_eq!(RecordKind::FenestrationSurface.vertex_start(), Some(9));
        assert_eq!(RecordKind::Zone.vertex_start(), None);
        assert!(!RecordKind::Other.has_vertices());
    }
}
