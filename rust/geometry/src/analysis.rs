// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived surface and zone quantities

use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;

use crate::math::{area, azimuth_tilt, centroid, newell_normal};
use crate::surface::{Surface, SurfaceSet};

/// Below this exterior wall area a zone's window-to-wall ratio is zero
const MIN_WALL_AREA: f64 = 0.01;

/// Area, orientation and centroid of one polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySummary {
    /// Square metres, never negative
    pub area: f64,
    /// Degrees clockwise from north, `[0, 360)`
    pub azimuth: f64,
    /// Degrees from straight up, `[0, 180]`
    pub tilt: f64,
    pub centroid: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Default for GeometrySummary {
    fn default() -> Self {
        Self {
            area: 0.0,
            azimuth: 0.0,
            tilt: 0.0,
            centroid: Point3::origin(),
            normal: Vector3::zeros(),
        }
    }
}

impl GeometrySummary {
    /// Derive from raw vertices; an empty list yields all zeros
    pub fn of(vertices: &[Point3<f64>]) -> Self {
        if vertices.is_empty() {
            return Self::default();
        }

        let normal = newell_normal(vertices);
        let (azimuth, tilt) = azimuth_tilt(&normal);

        Self {
            area: area(vertices),
            azimuth,
            tilt,
            centroid: centroid(vertices),
            normal,
        }
    }
}

/// Per-zone envelope totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSummary {
    pub zone: String,
    pub floor_area: f64,
    /// Area of walls with an `Outdoors` boundary
    pub exterior_wall_area: f64,
    /// Area of windows hosted by exterior walls (doors excluded)
    pub window_area: f64,
    pub surface_count: usize,
}

impl ZoneSummary {
    fn new(zone: &str) -> Self {
        Self {
            zone: zone.to_string(),
            ..Default::default()
        }
    }

    /// Window-to-wall ratio, zero when the zone has no meaningful wall area
    pub fn window_wall_ratio(&self) -> f64 {
        if self.exterior_wall_area < MIN_WALL_AREA {
            0.0
        } else {
            self.window_area / self.exterior_wall_area
        }
    }

    fn add(&mut self, other: &ZoneSummary) {
        self.floor_area += other.floor_area;
        self.exterior_wall_area += other.exterior_wall_area;
        self.window_area += other.window_area;
        self.surface_count += other.surface_count;
    }
}

/// Area of the windows hosted by an exterior wall
fn hosted_window_area(set: &SurfaceSet<'_>, wall: &Surface<'_>) -> f64 {
    set.children_of(wall.name)
        .iter()
        .filter(|w| w.surface_type.eq_ignore_ascii_case("Window"))
        .map(|w| w.area())
        .sum()
}

/// One summary per zone, sorted by zone name
pub fn zone_summaries(set: &SurfaceSet<'_>) -> Vec<ZoneSummary> {
    let mut zones: FxHashMap<&str, ZoneSummary> = FxHashMap::default();

    for surface in &set.surfaces {
        let entry = zones
            .entry(surface.zone)
            .or_insert_with(|| ZoneSummary::new(surface.zone));
        entry.surface_count += 1;

        if surface.is_type("Floor") {
            entry.floor_area += surface.area();
        } else if surface.is_wall() && surface.is_exterior() {
            entry.exterior_wall_area += surface.area();
            entry.window_area += hosted_window_area(set, surface);
        }
    }

    let mut summaries: Vec<ZoneSummary> = zones.into_values().collect();
    summaries.sort_by(|a, b| a.zone.cmp(&b.zone));
    summaries
}

/// Building totals over a set of zone summaries
pub fn totals(zones: &[ZoneSummary]) -> ZoneSummary {
    let mut total = ZoneSummary::new("Total");
    for zone in zones {
        total.add(zone);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use idf_lite_core::Document;

    const MODEL: &str = "\
BuildingSurface:Detailed,A_Floor,Floor,Slab,A,,Ground,,NoSun,NoWind,,4,
    10,8,0, 10,0,0, 0,0,0, 0,8,0;
BuildingSurface:Detailed,A_Wall-S,Wall,Ext,A,,Outdoors,,SunExposed,WindExposed,,4,
    0,0,3, 0,0,0, 10,0,0, 10,0,3;
BuildingSurface:Detailed,A_Wall-Int,Wall,Int,A,,Surface,B_Wall-Int,NoSun,NoWind,,4,
    10,0,3, 10,0,0, 10,8,0, 10,8,3;
FenestrationSurface:Detailed,A_Win,Window,Glz,A_Wall-S,,,,,4,
    2,0,2.5, 2,0,1, 8,0,1, 8,0,2.5;
BuildingSurface:Detailed,B_Floor,Floor,Slab,B,,Ground,,NoSun,NoWind,,4,
    5,5,0, 5,0,0, 0,0,0, 0,5,0;
";

    #[test]
    fn test_summary_of_empty_is_zero() {
        assert_eq!(GeometrySummary::of(&[]), GeometrySummary::default());
    }

    #[test]
    fn test_summary_of_roof() {
        let roof = vec![
            Point3::new(4.0, 0.0, 3.0),
            Point3::new(4.0, 2.0, 3.0),
            Point3::new(0.0, 2.0, 3.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let summary = GeometrySummary::of(&roof);
        assert_relative_eq!(summary.area, 8.0);
        assert_eq!(summary.azimuth, 0.0);
        assert_relative_eq!(summary.tilt, 0.0);
        assert_relative_eq!(summary.centroid, Point3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_zone_summaries() {
        let doc = Document::parse(MODEL);
        let set = SurfaceSet::from_document(&doc);
        let zones = zone_summaries(&set);

        assert_eq!(zones.len(), 2);
        let a = &zones[0];
        assert_eq!(a.zone, "A");
        assert_eq!(a.surface_count, 3);
        assert_relative_eq!(a.floor_area, 80.0);
        assert_relative_eq!(a.exterior_wall_area, 30.0);
        assert_relative_eq!(a.window_area, 9.0);
        assert_relative_eq!(a.window_wall_ratio(), 0.3);

        let b = &zones[1];
        assert_relative_eq!(b.floor_area, 25.0);
        assert_eq!(b.window_wall_ratio(), 0.0);

        let total = totals(&zones);
        assert_relative_eq!(total.floor_area, 105.0);
        assert_eq!(total.surface_count, 4);
    }

    #[test]
    fn test_doors_are_not_window_area() {
        let doc = Document::parse(
            "\
BuildingSurface:Detailed,W,Wall,Ext,Shop,,Outdoors,,SunExposed,WindExposed,,4,
    0,0,3, 0,0,0, 10,0,0, 10,0,3;
FenestrationSurface:Detailed,W_Door,Door,Wood,W,,,,,4,
    1,0,2, 1,0,0, 2,0,0, 2,0,2;
",
        );
        let zones = zone_summaries(&SurfaceSet::from_document(&doc));
        assert_relative_eq!(zones[0].exterior_wall_area, 30.0);
        assert_eq!(zones[0].window_area, 0.0);
        assert_eq!(zones[0].window_wall_ratio(), 0.0);
    }
}
