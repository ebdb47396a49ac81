// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface model extraction
//!
//! Typed views over `BuildingSurface:Detailed` and
//! `FenestrationSurface:Detailed` records. Views borrow the document they
//! were read from and go stale once its text is rewritten.

use idf_lite_core::{parse_triple, Document, Record, RecordKind};
use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::math;

/// Vertices read from a record's coordinate fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexRun {
    pub vertices: Vec<Point3<f64>>,
    /// Fields left after the last complete numeric triple
    pub unconsumed: usize,
}

impl VertexRun {
    /// Whether every coordinate field was consumed
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.unconsumed == 0
    }
}

/// Read `(x, y, z)` triples from `fields[start..]`.
///
/// Collection stops at the first triple that is incomplete or has a
/// non-numeric member. What remains is reported in
/// [`VertexRun::unconsumed`], never as an error.
pub fn collect_vertices(fields: &[String], start: usize) -> VertexRun {
    let rest = fields.get(start..).unwrap_or(&[]);
    let mut vertices = Vec::with_capacity(rest.len() / 3);
    let mut pos = 0;

    while let Some([x, y, z]) = rest.get(pos..).and_then(parse_triple) {
        vertices.push(Point3::new(x, y, z));
        pos += 3;
    }

    VertexRun {
        vertices,
        unconsumed: rest.len() - pos,
    }
}

/// Building surface view (wall, floor, roof, ceiling)
#[derive(Debug, Clone)]
pub struct Surface<'a> {
    pub name: &'a str,
    pub surface_type: &'a str,
    pub construction: &'a str,
    pub zone: &'a str,
    pub space: &'a str,
    pub boundary_condition: &'a str,
    pub boundary_object: &'a str,
    pub sun_exposure: &'a str,
    pub wind_exposure: &'a str,
    pub vertices: Vec<Point3<f64>>,
    pub unconsumed_fields: usize,
    pub record: &'a Record,
}

impl<'a> Surface<'a> {
    /// View of a building-surface record, `None` for any other kind
    pub fn from_record(record: &'a Record) -> Option<Self> {
        if record.record_kind() != RecordKind::BuildingSurface {
            return None;
        }
        let start = RecordKind::BuildingSurface.vertex_start()?;
        let run = collect_vertices(&record.fields, start);

        Some(Self {
            name: record.field(0),
            surface_type: record.field(1),
            construction: record.field(2),
            zone: record.field(3),
            space: record.field(4),
            boundary_condition: record.field(5),
            boundary_object: record.field(6),
            sun_exposure: record.field(7),
            wind_exposure: record.field(8),
            vertices: run.vertices,
            unconsumed_fields: run.unconsumed,
            record,
        })
    }

    #[inline]
    pub fn is_type(&self, surface_type: &str) -> bool {
        self.surface_type.eq_ignore_ascii_case(surface_type)
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.is_type("Wall")
    }

    /// Outside boundary condition is `Outdoors`
    #[inline]
    pub fn is_exterior(&self) -> bool {
        self.boundary_condition.eq_ignore_ascii_case("Outdoors")
    }

    #[inline]
    pub fn area(&self) -> f64 {
        math::area(&self.vertices)
    }
}

/// Fenestration view (window, door, glass door)
#[derive(Debug, Clone)]
pub struct SubSurface<'a> {
    pub name: &'a str,
    pub surface_type: &'a str,
    pub construction: &'a str,
    /// Name of the host building surface
    pub parent_surface: &'a str,
    pub boundary_object: &'a str,
    pub vertices: Vec<Point3<f64>>,
    pub unconsumed_fields: usize,
    pub record: &'a Record,
}

impl<'a> SubSurface<'a> {
    pub fn from_record(record: &'a Record) -> Option<Self> {
        if record.record_kind() != RecordKind::FenestrationSurface {
            return None;
        }
        let start = RecordKind::FenestrationSurface.vertex_start()?;
        let run = collect_vertices(&record.fields, start);

        Some(Self {
            name: record.field(0),
            surface_type: record.field(1),
            construction: record.field(2),
            parent_surface: record.field(3),
            boundary_object: record.field(4),
            vertices: run.vertices,
            unconsumed_fields: run.unconsumed,
            record,
        })
    }

    #[inline]
    pub fn is_child_of(&self, parent: &str) -> bool {
        self.parent_surface.eq_ignore_ascii_case(parent)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        math::area(&self.vertices)
    }
}

/// Criteria for [`SurfaceSet::filter`]; empty criteria match everything
#[derive(Debug, Clone, Default)]
pub struct SurfaceFilter {
    /// Case-insensitive substring of the zone name
    pub zone: Option<String>,
    /// Case-insensitive surface type (`Wall`, `Floor`, `Roof`, ...)
    pub surface_type: Option<String>,
}

impl SurfaceFilter {
    pub fn zone(zone: impl Into<String>) -> Self {
        Self {
            zone: Some(zone.into()),
            surface_type: None,
        }
    }

    pub fn with_type(mut self, surface_type: impl Into<String>) -> Self {
        self.surface_type = Some(surface_type.into());
        self
    }

    pub fn matches(&self, surface: &Surface<'_>) -> bool {
        let zone_ok = self
            .zone
            .as_deref()
            .map_or(true, |z| zone_matches(surface.zone, z));
        let type_ok = self
            .surface_type
            .as_deref()
            .map_or(true, |t| surface.is_type(t));
        zone_ok && type_ok
    }
}

/// Case-insensitive substring match of `pattern` in a zone name
pub fn zone_matches(zone: &str, pattern: &str) -> bool {
    zone.to_lowercase().contains(&pattern.trim().to_lowercase())
}

/// Every surface and sub-surface of a document, in document order
#[derive(Debug, Clone, Default)]
pub struct SurfaceSet<'a> {
    pub surfaces: Vec<Surface<'a>>,
    pub sub_surfaces: Vec<SubSurface<'a>>,
}

impl<'a> SurfaceSet<'a> {
    pub fn from_document(document: &'a Document) -> Self {
        let mut set = SurfaceSet::default();
        for record in document.records() {
            match record.record_kind() {
                RecordKind::BuildingSurface => set.surfaces.extend(Surface::from_record(record)),
                RecordKind::FenestrationSurface => {
                    set.sub_surfaces.extend(SubSurface::from_record(record))
                }
                _ => {}
            }
        }

        tracing::debug!(
            surfaces = set.surfaces.len(),
            sub_surfaces = set.sub_surfaces.len(),
            "Extracted surface model"
        );
        set
    }

    /// Building surface by name (case-insensitive)
    pub fn surface(&self, name: &str) -> Result<&Surface<'a>> {
        self.surfaces
            .iter()
            .find(|s| s.record.has_name(name))
            .ok_or_else(|| Error::SurfaceNotFound(name.to_string()))
    }

    /// Fenestration surface by name (case-insensitive)
    pub fn sub_surface(&self, name: &str) -> Result<&SubSurface<'a>> {
        self.sub_surfaces
            .iter()
            .find(|s| s.record.has_name(name))
            .ok_or_else(|| Error::SurfaceNotFound(name.to_string()))
    }

    /// Surfaces whose zone name contains `zone` (case-insensitive)
    pub fn surfaces_in_zone(&self, zone: &str) -> Vec<&Surface<'a>> {
        self.surfaces
            .iter()
            .filter(|s| zone_matches(s.zone, zone))
            .collect()
    }

    /// Sub-surfaces hosted by the named surface
    pub fn children_of(&self, parent: &str) -> Vec<&SubSurface<'a>> {
        self.sub_surfaces
            .iter()
            .filter(|s| s.is_child_of(parent))
            .collect()
    }

    pub fn filter(&self, filter: &SurfaceFilter) -> Vec<&Surface<'a>> {
        self.surfaces.iter().filter(|s| filter.matches(s)).collect()
    }

    /// Distinct zone names referenced by building surfaces, sorted
    pub fn zone_names(&self) -> Vec<&'a str> {
        let mut zones: Vec<&'a str> = self.surfaces.iter().map(|s| s.zone).collect();
        zones.sort_unstable();
        zones.dedup();
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = "\
Zone,Office;
BuildingSurface:Detailed,
    Office_Wall-S,           !- Name
    Wall,                    !- Surface Type
    ExtWall,                 !- Construction Name
    Office,                  !- Zone Name
    ,                        !- Space Name
    Outdoors,                !- Outside Boundary Condition
    ,                        !- Outside Boundary Condition Object
    SunExposed,              !- Sun Exposure
    WindExposed,             !- Wind Exposure
    ,                        !- View Factor to Ground
    4,                       !- Number of Vertices
    0,0,3,
    0,0,0,
    10,0,0,
    10,0,3;
BuildingSurface:Detailed,Office_Floor,Floor,Slab,Office,,Ground,,NoSun,NoWind,,4,
    10,8,0, 10,0,0, 0,0,0, 0,8,0;
BuildingSurface:Detailed,Lab_Floor,Floor,Slab,Lab Zone,,Ground,,NoSun,NoWind,,4,
    10,8,0, 10,0,0, 0,0,0, 0,8,0;
FenestrationSurface:Detailed,Office_Win,Window,Glazing,OFFICE_WALL-S,,,,,4,
    2,0,2, 2,0,1, 4,0,1, 4,0,2;
";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_vertices_stops_on_non_numeric() {
        let fields = strings(&["h", "1", "2", "3", "4", "5", "x", "7", "8", "9"]);
        let run = collect_vertices(&fields, 1);
        assert_eq!(run.vertices, vec![Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(run.unconsumed, 6);
        assert!(!run.is_complete());
    }

    #[test]
    fn test_collect_vertices_drops_partial_triple() {
        let fields = strings(&["1", "2", "3", "4", "5"]);
        let run = collect_vertices(&fields, 0);
        assert_eq!(run.vertices.len(), 1);
        assert_eq!(run.unconsumed, 2);

        let run = collect_vertices(&fields, 10);
        assert!(run.vertices.is_empty());
        assert!(run.is_complete());
    }

    #[test]
    fn test_header_fields() {
        let doc = Document::parse(MODEL);
        let set = SurfaceSet::from_document(&doc);
        assert_eq!(set.surfaces.len(), 3);
        assert_eq!(set.sub_surfaces.len(), 1);

        let wall = set.surface("office_wall-s").unwrap();
        assert_eq!(wall.surface_type, "Wall");
        assert_eq!(wall.construction, "ExtWall");
        assert_eq!(wall.zone, "Office");
        assert_eq!(wall.space, "");
        assert_eq!(wall.boundary_condition, "Outdoors");
        assert_eq!(wall.vertices.len(), 4);
        assert!(wall.is_wall() && wall.is_exterior());
        assert_eq!(wall.area(), 30.0);
    }

    #[test]
    fn test_missing_header_positions_are_empty() {
        let doc = Document::parse("BuildingSurface:Detailed,Stub,Wall;\n");
        let set = SurfaceSet::from_document(&doc);
        let stub = &set.surfaces[0];
        assert_eq!(stub.zone, "");
        assert!(stub.vertices.is_empty());
        assert_eq!(stub.area(), 0.0);
    }

    #[test]
    fn test_lookups() {
        let doc = Document::parse(MODEL);
        let set = SurfaceSet::from_document(&doc);

        assert_eq!(set.surfaces_in_zone("office").len(), 2);
        assert_eq!(set.surfaces_in_zone("zone").len(), 1);
        assert_eq!(set.children_of("Office_Wall-S").len(), 1);
        assert!(matches!(set.surface("Nope"), Err(Error::SurfaceNotFound(_))));
        assert!(set.sub_surface("office_win").is_ok());

        let floors = set.filter(&SurfaceFilter::default().with_type("floor"));
        assert_eq!(floors.len(), 2);
        let office_walls = set.filter(&SurfaceFilter::zone("OFF").with_type("Wall"));
        assert_eq!(office_walls.len(), 1);

        assert_eq!(set.zone_names(), vec!["Lab Zone", "Office"]);
    }
}
