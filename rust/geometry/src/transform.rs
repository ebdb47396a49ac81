// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone and wall transforms
//!
//! Each transform validates its input, maps the vertices of every affected
//! surface and of every sub-surface hosted by one, and returns the new
//! vertex lists as a [`SurfaceEdits`] batch plus diagnostics. Nothing is
//! written until the outcome is applied.

use std::str::FromStr;

use idf_lite_core::{Document, FormatOptions};
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};
use crate::math::{centroid, newell_normal, normalize, EPSILON};
use crate::rewrite::{rewrite, Rewrite, SurfaceEdits};
use crate::surface::{Surface, SurfaceSet};

/// Minimum z-extent a zone must have before its height can be rescaled
pub const MIN_ZONE_HEIGHT: f64 = 0.01;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Coordinate index (`x = 0`)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "X" => Ok(Axis::X),
            "Y" => Ok(Axis::Y),
            "Z" => Ok(Axis::Z),
            _ => Err(Error::UnknownAxis(s.to_string())),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed batch of vertex edits that can be written into a document
pub trait TransformOutcome {
    fn edits(&self) -> &SurfaceEdits;

    /// Rewrite `document` with this outcome's edits
    fn apply(&self, document: &Document, options: &FormatOptions) -> Rewrite {
        rewrite(document, self.edits(), options)
    }
}

/// Result of [`scale_zone`]
#[derive(Debug, Clone)]
pub struct ScaleOutcome {
    pub edits: SurfaceEdits,
    pub axis: Axis,
    pub factor: f64,
    /// Centroid of every vertex of the zone's surfaces
    pub reference: Point3<f64>,
    pub surfaces: usize,
    pub sub_surfaces: usize,
}

/// Result of [`set_zone_height`]
#[derive(Debug, Clone)]
pub struct HeightOutcome {
    pub edits: SurfaceEdits,
    pub z_min: f64,
    pub previous_height: f64,
    pub height: f64,
    pub surfaces: usize,
    pub sub_surfaces: usize,
}

/// Result of [`move_wall`]
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub edits: SurfaceEdits,
    /// Unit outward normal of the wall
    pub normal: Vector3<f64>,
    pub offset: f64,
    pub sub_surfaces: usize,
}

impl TransformOutcome for ScaleOutcome {
    fn edits(&self) -> &SurfaceEdits {
        &self.edits
    }
}

impl TransformOutcome for HeightOutcome {
    fn edits(&self) -> &SurfaceEdits {
        &self.edits
    }
}

impl TransformOutcome for MoveOutcome {
    fn edits(&self) -> &SurfaceEdits {
        &self.edits
    }
}

/// Map the vertices of `surfaces` and their hosted sub-surfaces.
///
/// Returns the edits and the number of sub-surfaces included.
fn map_with_children<F>(
    set: &SurfaceSet<'_>,
    surfaces: &[&Surface<'_>],
    f: F,
) -> (SurfaceEdits, usize)
where
    F: Fn(&Point3<f64>) -> Point3<f64>,
{
    let mut edits = SurfaceEdits::new();
    let mut hosts: FxHashSet<String> = FxHashSet::default();

    for surface in surfaces {
        edits.insert(surface.name, surface.vertices.iter().map(&f).collect());
        hosts.insert(surface.name.to_ascii_lowercase());
    }

    let mut children = 0;
    for sub in &set.sub_surfaces {
        if hosts.contains(&sub.parent_surface.to_ascii_lowercase()) {
            edits.insert(sub.name, sub.vertices.iter().map(&f).collect());
            children += 1;
        }
    }

    (edits, children)
}

fn zone_surfaces<'s, 'a>(set: &'s SurfaceSet<'a>, zone: &str) -> Result<Vec<&'s Surface<'a>>> {
    let surfaces = set.surfaces_in_zone(zone);
    if surfaces.is_empty() {
        return Err(Error::NoMatchingSurfaces {
            zone: zone.to_string(),
        });
    }
    Ok(surfaces)
}

/// Stretch a zone along one axis about its vertex centroid.
///
/// A factor of `1` leaves every coordinate unchanged and `0` collapses the
/// zone onto the reference plane.
pub fn scale_zone(
    set: &SurfaceSet<'_>,
    zone: &str,
    axis: Axis,
    factor: f64,
) -> Result<ScaleOutcome> {
    if !factor.is_finite() {
        return Err(Error::InvalidDimension(format!("scale factor {} is not finite", factor)));
    }
    let surfaces = zone_surfaces(set, zone)?;

    let all: Vec<Point3<f64>> = surfaces
        .iter()
        .flat_map(|s| s.vertices.iter().copied())
        .collect();
    let reference = centroid(&all);
    let i = axis.index();

    let (edits, sub_surfaces) = map_with_children(set, &surfaces, |p| {
        let mut q = *p;
        q[i] = reference[i] + (p[i] - reference[i]) * factor;
        q
    });

    tracing::debug!(
        zone,
        axis = %axis,
        factor,
        surfaces = surfaces.len(),
        sub_surfaces,
        "Scaled zone"
    );
    Ok(ScaleOutcome {
        edits,
        axis,
        factor,
        reference,
        surfaces: surfaces.len(),
        sub_surfaces,
    })
}

/// Rescale a zone's z-extent to `height`, keeping its lowest point fixed
pub fn set_zone_height(set: &SurfaceSet<'_>, zone: &str, height: f64) -> Result<HeightOutcome> {
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidDimension(format!(
            "zone height must be positive, got {}",
            height
        )));
    }
    let surfaces = zone_surfaces(set, zone)?;

    let (z_min, z_max) = surfaces
        .iter()
        .flat_map(|s| s.vertices.iter().map(|p| p.z))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), z| (lo.min(z), hi.max(z)));

    let previous_height = z_max - z_min;
    // No vertices at all leaves the fold at its infinite seeds
    if !previous_height.is_finite() || previous_height < MIN_ZONE_HEIGHT {
        return Err(Error::FlatZone {
            height: if previous_height.is_finite() { previous_height } else { 0.0 },
        });
    }

    let ratio = height / previous_height;
    let (edits, sub_surfaces) = map_with_children(set, &surfaces, |p| {
        Point3::new(p.x, p.y, z_min + (p.z - z_min) * ratio)
    });

    tracing::debug!(zone, previous_height, height, surfaces = surfaces.len(), "Set zone height");
    Ok(HeightOutcome {
        edits,
        z_min,
        previous_height,
        height,
        surfaces: surfaces.len(),
        sub_surfaces,
    })
}

/// Translate a wall and its sub-surfaces along the wall's outward normal.
///
/// Positive offsets move outward. Targets that are not walls are moved
/// anyway, with a warning.
pub fn move_wall(set: &SurfaceSet<'_>, wall: &str, offset: f64) -> Result<MoveOutcome> {
    if !offset.is_finite() {
        return Err(Error::InvalidDimension(format!("offset {} is not finite", offset)));
    }
    let surface = set.surface(wall)?;
    if !surface.is_wall() {
        tracing::warn!(
            surface = surface.name,
            surface_type = surface.surface_type,
            "Moving a surface that is not a wall"
        );
    }

    let normal = normalize(&newell_normal(&surface.vertices));
    if normal.norm() < EPSILON {
        return Err(Error::DegenerateSurface(surface.name.to_string()));
    }

    let shift = normal * offset;
    let (edits, sub_surfaces) = map_with_children(set, &[surface], |p| *p + shift);

    tracing::debug!(wall = surface.name, offset, sub_surfaces, "Moved wall");
    Ok(MoveOutcome {
        edits,
        normal,
        offset,
        sub_surfaces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ROOM: &str = "\
BuildingSurface:Detailed,R_Floor,Floor,Slab,Room,,Ground,,NoSun,NoWind,,4,
    4,2,0, 4,0,0, 0,0,0, 0,2,0;
BuildingSurface:Detailed,R_Roof,Roof,Roof,Room,,Outdoors,,SunExposed,WindExposed,,4,
    4,0,3, 4,2,3, 0,2,3, 0,0,3;
BuildingSurface:Detailed,R_Wall-S,Wall,Ext,Room,,Outdoors,,SunExposed,WindExposed,,4,
    0,0,3, 0,0,0, 4,0,0, 4,0,3;
FenestrationSurface:Detailed,R_Win,Window,Glz,r_wall-s,,,,,4,
    1,0,2, 1,0,1, 3,0,1, 3,0,2;
BuildingSurface:Detailed,Other_Floor,Floor,Slab,Other,,Ground,,NoSun,NoWind,,4,
    1,1,0, 1,0,0, 0,0,0, 0,1,0;
";

    fn with_set<T>(f: impl FnOnce(&SurfaceSet<'_>) -> T) -> T {
        let doc = Document::parse(ROOM);
        let set = SurfaceSet::from_document(&doc);
        f(&set)
    }

    #[test]
    fn test_axis_parsing() {
        assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
        assert_eq!(" Z ".parse::<Axis>().unwrap(), Axis::Z);
        assert!(matches!("w".parse::<Axis>(), Err(Error::UnknownAxis(_))));
    }

    #[test]
    fn test_scale_identity() {
        with_set(|set| {
            let outcome = scale_zone(set, "room", Axis::X, 1.0).unwrap();
            assert_eq!(outcome.surfaces, 3);
            assert_eq!(outcome.sub_surfaces, 1);
            for surface in set.surfaces_in_zone("room") {
                let new = outcome.edits.get(surface.name).unwrap();
                for (a, b) in surface.vertices.iter().zip(new) {
                    assert_relative_eq!(*a, *b, epsilon = 1e-12);
                }
            }
        });
    }

    #[test]
    fn test_scale_collapse() {
        with_set(|set| {
            let outcome = scale_zone(set, "Room", Axis::Y, 0.0).unwrap();
            let y = outcome.reference.y;
            for (_, vertices) in outcome.edits.iter() {
                for p in vertices {
                    assert_relative_eq!(p.y, y, epsilon = 1e-12);
                }
            }
        });
    }

    #[test]
    fn test_scale_doubles_about_centroid() {
        with_set(|set| {
            let outcome = scale_zone(set, "Room", Axis::X, 2.0).unwrap();
            assert_relative_eq!(outcome.reference.x, 2.0);
            let floor = outcome.edits.get("R_Floor").unwrap();
            assert_relative_eq!(floor[0], Point3::new(6.0, 2.0, 0.0));
            assert_relative_eq!(floor[2], Point3::new(-2.0, 0.0, 0.0));
            let window = outcome.edits.get("R_Win").unwrap();
            assert_relative_eq!(window[0].x, 0.0);
            assert!(outcome.edits.get("Other_Floor").is_none());
        });
    }

    #[test]
    fn test_scale_unknown_zone() {
        with_set(|set| {
            let err = scale_zone(set, "Attic", Axis::X, 2.0).unwrap_err();
            assert!(matches!(err, Error::NoMatchingSurfaces { .. }));
        });
    }

    #[test]
    fn test_set_zone_height() {
        with_set(|set| {
            let outcome = set_zone_height(set, "Room", 4.5).unwrap();
            assert_relative_eq!(outcome.previous_height, 3.0);
            assert_relative_eq!(outcome.z_min, 0.0);
            let roof = outcome.edits.get("R_Roof").unwrap();
            assert!(roof.iter().all(|p| (p.z - 4.5).abs() < 1e-9));
            let window = outcome.edits.get("R_Win").unwrap();
            assert_relative_eq!(window[0].z, 3.0);
            assert_relative_eq!(window[1].z, 1.5);
        });
    }

    #[test]
    fn test_flat_zone_rejected() {
        with_set(|set| {
            assert!(matches!(
                set_zone_height(set, "Other", 3.0),
                Err(Error::FlatZone { .. })
            ));
            assert!(matches!(
                set_zone_height(set, "Room", 0.0),
                Err(Error::InvalidDimension(_))
            ));
        });
    }

    #[test]
    fn test_move_wall_outward() {
        with_set(|set| {
            let outcome = move_wall(set, "r_wall-s", 0.5).unwrap();
            assert_relative_eq!(outcome.normal, Vector3::new(0.0, -1.0, 0.0));
            assert_eq!(outcome.sub_surfaces, 1);
            let wall = outcome.edits.get("R_Wall-S").unwrap();
            assert!(wall.iter().all(|p| (p.y + 0.5).abs() < 1e-12));
            let window = outcome.edits.get("R_Win").unwrap();
            assert!(window.iter().all(|p| (p.y + 0.5).abs() < 1e-12));
            assert_eq!(outcome.edits.len(), 2);
        });
    }

    #[test]
    fn test_move_wall_errors() {
        with_set(|set| {
            assert!(matches!(move_wall(set, "Nope", 1.0), Err(Error::SurfaceNotFound(_))));
        });

        let doc = Document::parse(
            "BuildingSurface:Detailed,Line,Wall,C,Z,,Outdoors,,,,,3,0,0,0, 1,0,0, 2,0,0;\n",
        );
        let set = SurfaceSet::from_document(&doc);
        assert!(matches!(move_wall(&set, "Line", 1.0), Err(Error::DegenerateSurface(_))));
    }

    #[test]
    fn test_apply_rewrites_document() {
        let doc = Document::parse(ROOM);
        let set = SurfaceSet::from_document(&doc);
        let outcome = move_wall(&set, "R_Wall-S", 1.0).unwrap();
        let result = outcome.apply(&doc, &FormatOptions::default());
        assert_eq!(result.modified, 2);

        let updated = result.into_document();
        let moved = SurfaceSet::from_document(&updated);
        let wall = moved.surface("R_Wall-S").unwrap();
        assert_relative_eq!(wall.vertices[0], Point3::new(0.0, -1.0, 3.0));
        assert_eq!(moved.surface("R_Floor").unwrap().vertices[0], Point3::new(4.0, 2.0, 0.0));
    }
}
