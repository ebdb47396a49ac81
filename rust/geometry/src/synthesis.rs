// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface synthesis
//!
//! Generates zones, building surfaces and windows from dimensions. Vertices
//! are emitted in the `UpperLeftCorner` / `Counterclockwise` convention so
//! that every Newell normal points out of the zone.

use idf_lite_core::{
    is_plain_value, CoordinateSystem, Document, FormatOptions, GeometryRules, RecordKind,
    RecordWriter, StartingVertex, VertexEntryDirection, BUILDING_SURFACE_FIELDS,
    FENESTRATION_FIELDS,
};
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::math::length;
use crate::surface::{Surface, SurfaceSet};

/// Settings shared by every synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Convention written into the output and followed by the vertices
    pub rules: GeometryRules,
    pub wall_construction: String,
    pub floor_construction: String,
    pub roof_construction: String,
    pub format: FormatOptions,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            rules: GeometryRules::default(),
            wall_construction: "ExternalWall".to_string(),
            floor_construction: "GroundFloor".to_string(),
            roof_construction: "ExternalRoof".to_string(),
            format: FormatOptions::default(),
        }
    }
}

impl SynthesisConfig {
    /// Fail unless the vertex lists this module builds satisfy `rules`
    pub fn check_convention(&self) -> Result<()> {
        check_rules(&self.rules)
    }

    /// Fail if a construction name would break the generated records
    pub fn check_names(&self) -> Result<()> {
        check_name("wall construction", &self.wall_construction)?;
        check_name("floor construction", &self.floor_construction)?;
        check_name("roof construction", &self.roof_construction)
    }
}

fn check_rules(rules: &GeometryRules) -> Result<()> {
    if rules.starting_vertex != StartingVertex::UpperLeftCorner {
        return Err(Error::UnsupportedConvention(format!(
            "starting vertex {} (only UpperLeftCorner is generated)",
            rules.starting_vertex
        )));
    }
    if rules.entry_direction != VertexEntryDirection::Counterclockwise {
        return Err(Error::UnsupportedConvention(format!(
            "vertex entry direction {} (only Counterclockwise is generated)",
            rules.entry_direction
        )));
    }
    Ok(())
}

fn check_name(what: &str, value: &str) -> Result<()> {
    if is_plain_value(value) {
        Ok(())
    } else {
        Err(Error::InvalidName(format!(
            "{} '{}' contains ',', ';', '!' or a line break",
            what, value
        )))
    }
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDimension(format!("{} must be positive, got {}", what, value)))
    }
}

/// `Zone` record to be generated
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDraft {
    pub name: String,
    /// Direction of relative north in degrees
    pub north_axis: f64,
    pub origin: Point3<f64>,
}

impl ZoneDraft {
    pub fn to_record_text(&self, options: &FormatOptions) -> String {
        RecordWriter::new(RecordKind::Zone.as_str(), options)
            .field(self.name.as_str(), "Name")
            .number(self.north_axis, "Direction of Relative North {deg}")
            .number(self.origin.x, "X Origin {m}")
            .number(self.origin.y, "Y Origin {m}")
            .number(self.origin.z, "Z Origin {m}")
            .finish()
    }
}

/// `BuildingSurface:Detailed` record to be generated
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDraft {
    pub name: String,
    pub surface_type: String,
    pub construction: String,
    pub zone: String,
    pub space: String,
    pub boundary_condition: String,
    pub boundary_object: String,
    pub sun_exposure: String,
    pub wind_exposure: String,
    pub vertices: Vec<Point3<f64>>,
}

impl SurfaceDraft {
    fn exterior(
        name: String,
        surface_type: &str,
        construction: &str,
        zone: &ZoneDraft,
        space: &str,
        vertices: Vec<Point3<f64>>,
    ) -> Self {
        Self {
            name,
            surface_type: surface_type.to_string(),
            construction: construction.to_string(),
            zone: zone.name.clone(),
            space: space.to_string(),
            boundary_condition: "Outdoors".to_string(),
            boundary_object: String::new(),
            sun_exposure: "SunExposed".to_string(),
            wind_exposure: "WindExposed".to_string(),
            vertices,
        }
    }

    fn ground(
        name: String,
        construction: &str,
        zone: &ZoneDraft,
        space: &str,
        vertices: Vec<Point3<f64>>,
    ) -> Self {
        Self {
            boundary_condition: "Ground".to_string(),
            sun_exposure: "NoSun".to_string(),
            wind_exposure: "NoWind".to_string(),
            ..Self::exterior(name, "Floor", construction, zone, space, vertices)
        }
    }

    fn interzone(
        name: String,
        construction: &str,
        zone: &ZoneDraft,
        space: &str,
        other: String,
        vertices: Vec<Point3<f64>>,
    ) -> Self {
        Self {
            boundary_condition: "Surface".to_string(),
            boundary_object: other,
            sun_exposure: "NoSun".to_string(),
            wind_exposure: "NoWind".to_string(),
            ..Self::exterior(name, "Wall", construction, zone, space, vertices)
        }
    }

    pub fn to_record_text(&self, options: &FormatOptions) -> String {
        let values = [
            self.name.as_str(),
            self.surface_type.as_str(),
            self.construction.as_str(),
            self.zone.as_str(),
            self.space.as_str(),
            self.boundary_condition.as_str(),
            self.boundary_object.as_str(),
            self.sun_exposure.as_str(),
            self.wind_exposure.as_str(),
            "",
        ];
        let mut writer = RecordWriter::new(RecordKind::BuildingSurface.as_str(), options);
        for (value, label) in values.iter().zip(BUILDING_SURFACE_FIELDS.iter()) {
            writer = writer.field(*value, *label);
        }
        writer = writer.number(self.vertices.len() as f64, BUILDING_SURFACE_FIELDS[10]);
        for (i, v) in self.vertices.iter().enumerate() {
            writer = writer.vertex(i + 1, v.x, v.y, v.z);
        }
        writer.finish()
    }
}

/// `FenestrationSurface:Detailed` record to be generated
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDraft {
    pub name: String,
    pub surface_type: String,
    pub construction: String,
    pub parent_surface: String,
    pub vertices: Vec<Point3<f64>>,
    /// Horizontal distance of the window from the wall's left edge
    pub offset: f64,
}

impl WindowDraft {
    pub fn area(&self) -> f64 {
        crate::math::area(&self.vertices)
    }

    pub fn to_record_text(&self, options: &FormatOptions) -> String {
        let values = [
            self.name.as_str(),
            self.surface_type.as_str(),
            self.construction.as_str(),
            self.parent_surface.as_str(),
            "",
            "",
            "",
            "",
        ];
        let mut writer = RecordWriter::new(RecordKind::FenestrationSurface.as_str(), options);
        for (value, label) in values.iter().zip(FENESTRATION_FIELDS.iter()) {
            writer = writer.field(*value, *label);
        }
        writer = writer.number(self.vertices.len() as f64, FENESTRATION_FIELDS[8]);
        for (i, v) in self.vertices.iter().enumerate() {
            writer = writer.vertex(i + 1, v.x, v.y, v.z);
        }
        writer.finish()
    }
}

/// Generated convention record, zones and surfaces
#[derive(Debug, Clone)]
pub struct SynthesizedModel {
    pub rules: GeometryRules,
    pub zones: Vec<ZoneDraft>,
    pub surfaces: Vec<SurfaceDraft>,
}

impl SynthesizedModel {
    pub fn surface(&self, name: &str) -> Option<&SurfaceDraft> {
        self.surfaces.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// IDF text: one record per block, blocks separated by a blank line
    pub fn to_text(&self, options: &FormatOptions) -> String {
        let mut parts = Vec::with_capacity(1 + self.zones.len() + self.surfaces.len());
        parts.push(self.rules.to_record_text(options));
        parts.extend(self.zones.iter().map(|z| z.to_record_text(options)));
        parts.extend(self.surfaces.iter().map(|s| s.to_record_text(options)));
        parts.join(options.line_ending.as_str())
    }
}

/// `ZoneName` → `SpaceName`, otherwise `ZoneName_Space`
pub fn space_name(zone: &str) -> String {
    if zone.contains("Zone") {
        zone.replace("Zone", "Space")
    } else {
        format!("{}_Space", zone)
    }
}

/// Rectangular single-zone building
#[derive(Debug, Clone)]
pub struct BoxSpec {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub zone_name: String,
    pub origin: Point3<f64>,
    /// Direction of relative north in degrees
    pub north_axis: f64,
}

impl BoxSpec {
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
            zone_name: "Zone1".to_string(),
            origin: Point3::origin(),
            north_axis: 0.0,
        }
    }

    pub fn with_zone_name(mut self, name: impl Into<String>) -> Self {
        self.zone_name = name.into();
        self
    }

    pub fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.origin = origin;
        self
    }
}

/// Two adjoining box zones; zone 2 sits east of zone 1
#[derive(Debug, Clone)]
pub struct LShapeSpec {
    pub width1: f64,
    pub depth1: f64,
    pub width2: f64,
    pub depth2: f64,
    pub height: f64,
    pub zone_names: [String; 2],
}

impl LShapeSpec {
    pub fn new(width1: f64, depth1: f64, width2: f64, depth2: f64, height: f64) -> Self {
        Self {
            width1,
            depth1,
            width2,
            depth2,
            height,
            zone_names: ["Zone1".to_string(), "Zone2".to_string()],
        }
    }
}

/// Maps zone-local points into the coordinate frame the rules declare
fn placer(rules: &GeometryRules, origin: Point3<f64>) -> impl Fn(f64, f64, f64) -> Point3<f64> {
    let shift = match rules.coordinate_system {
        CoordinateSystem::Relative => Vector3::zeros(),
        CoordinateSystem::World | CoordinateSystem::Absolute => origin.coords,
    };
    move |x, y, z| Point3::new(x, y, z) + shift
}

/// Floor, roof and the walls whose suffixes are listed in `walls`
fn box_surfaces(
    zone: &ZoneDraft,
    prefix: &str,
    (w, d, h): (f64, f64, f64),
    walls: &[&str],
    config: &SynthesisConfig,
) -> Vec<SurfaceDraft> {
    let p = placer(&config.rules, zone.origin);
    let space = space_name(&zone.name);
    let wall = config.wall_construction.as_str();

    let mut surfaces = vec![
        SurfaceDraft::ground(
            format!("{}Floor", prefix),
            &config.floor_construction,
            zone,
            &space,
            vec![p(w, d, 0.0), p(w, 0.0, 0.0), p(0.0, 0.0, 0.0), p(0.0, d, 0.0)],
        ),
        SurfaceDraft::exterior(
            format!("{}Roof", prefix),
            "Roof",
            &config.roof_construction,
            zone,
            &space,
            vec![p(w, 0.0, h), p(w, d, h), p(0.0, d, h), p(0.0, 0.0, h)],
        ),
    ];

    for side in walls {
        let vertices = match *side {
            "S" => vec![p(0.0, 0.0, h), p(0.0, 0.0, 0.0), p(w, 0.0, 0.0), p(w, 0.0, h)],
            "N" => vec![p(w, d, h), p(w, d, 0.0), p(0.0, d, 0.0), p(0.0, d, h)],
            "E" => vec![p(w, 0.0, h), p(w, 0.0, 0.0), p(w, d, 0.0), p(w, d, h)],
            "W" => vec![p(0.0, d, h), p(0.0, d, 0.0), p(0.0, 0.0, 0.0), p(0.0, 0.0, h)],
            _ => continue,
        };
        surfaces.push(SurfaceDraft::exterior(
            format!("{}Wall-{}", prefix, side),
            "Wall",
            wall,
            zone,
            &space,
            vertices,
        ));
    }

    surfaces
}

/// Single rectangular zone with six outward-facing surfaces
pub fn box_zone(spec: &BoxSpec, config: &SynthesisConfig) -> Result<SynthesizedModel> {
    config.check_convention()?;
    config.check_names()?;
    check_positive("width", spec.width)?;
    check_positive("depth", spec.depth)?;
    check_positive("height", spec.height)?;
    if spec.zone_name.trim().is_empty() {
        return Err(Error::InvalidDimension("zone name is empty".to_string()));
    }
    check_name("zone name", &spec.zone_name)?;

    let zone = ZoneDraft {
        name: spec.zone_name.trim().to_string(),
        north_axis: spec.north_axis,
        origin: spec.origin,
    };
    let surfaces = box_surfaces(
        &zone,
        "",
        (spec.width, spec.depth, spec.height),
        &["S", "N", "E", "W"],
        config,
    );

    tracing::debug!(zone = %zone.name, surfaces = surfaces.len(), "Synthesized box zone");
    Ok(SynthesizedModel {
        rules: config.rules,
        zones: vec![zone],
        surfaces,
    })
}

/// Two-zone L-shaped building.
///
/// Zone 2 shares zone 1's east wall over `min(depth1, depth2)`. The shared
/// span becomes a pair of interzone walls that name each other, and the
/// deeper zone gets one extra exterior wall segment for the rest of that
/// side. Both zones share the south wall line and the height.
pub fn l_shape(spec: &LShapeSpec, config: &SynthesisConfig) -> Result<SynthesizedModel> {
    config.check_convention()?;
    config.check_names()?;
    check_positive("width1", spec.width1)?;
    check_positive("depth1", spec.depth1)?;
    check_positive("width2", spec.width2)?;
    check_positive("depth2", spec.depth2)?;
    check_positive("height", spec.height)?;

    let [z1_name, z2_name] = &spec.zone_names;
    let (z1_name, z2_name) = (z1_name.trim(), z2_name.trim());
    if z1_name.is_empty() || z2_name.is_empty() || z1_name.eq_ignore_ascii_case(z2_name) {
        return Err(Error::InvalidDimension(
            "L-shape needs two distinct, non-empty zone names".to_string(),
        ));
    }
    check_name("zone name", z1_name)?;
    check_name("zone name", z2_name)?;

    let (w1, d1, w2, d2, h) = (spec.width1, spec.depth1, spec.width2, spec.depth2, spec.height);
    let shared = d1.min(d2);
    let wall = config.wall_construction.as_str();

    let zone1 = ZoneDraft {
        name: z1_name.to_string(),
        north_axis: 0.0,
        origin: Point3::origin(),
    };
    let zone2 = ZoneDraft {
        name: z2_name.to_string(),
        north_axis: 0.0,
        origin: Point3::new(w1, 0.0, 0.0),
    };
    let (s1, s2) = (space_name(z1_name), space_name(z2_name));
    let east_int = format!("{}_Wall-E-Int", z1_name);
    let west_int = format!("{}_Wall-W-Int", z2_name);

    let mut surfaces = box_surfaces(
        &zone1,
        &format!("{}_", z1_name),
        (w1, d1, h),
        &["S", "N", "W"],
        config,
    );
    let p1 = placer(&config.rules, zone1.origin);
    surfaces.push(SurfaceDraft::interzone(
        east_int.clone(),
        wall,
        &zone1,
        &s1,
        west_int.clone(),
        vec![p1(w1, 0.0, h), p1(w1, 0.0, 0.0), p1(w1, shared, 0.0), p1(w1, shared, h)],
    ));
    if d1 > d2 {
        surfaces.push(SurfaceDraft::exterior(
            format!("{}_Wall-E-Ext", z1_name),
            "Wall",
            wall,
            &zone1,
            &s1,
            vec![p1(w1, shared, h), p1(w1, shared, 0.0), p1(w1, d1, 0.0), p1(w1, d1, h)],
        ));
    }

    surfaces.extend(box_surfaces(
        &zone2,
        &format!("{}_", z2_name),
        (w2, d2, h),
        &["S", "N", "E"],
        config,
    ));
    let p2 = placer(&config.rules, zone2.origin);
    surfaces.push(SurfaceDraft::interzone(
        west_int,
        wall,
        &zone2,
        &s2,
        east_int,
        vec![p2(0.0, shared, h), p2(0.0, shared, 0.0), p2(0.0, 0.0, 0.0), p2(0.0, 0.0, h)],
    ));
    if d2 > d1 {
        surfaces.push(SurfaceDraft::exterior(
            format!("{}_Wall-W-Ext", z2_name),
            "Wall",
            wall,
            &zone2,
            &s2,
            vec![p2(0.0, d2, h), p2(0.0, d2, 0.0), p2(0.0, shared, 0.0), p2(0.0, shared, h)],
        ));
    }

    tracing::debug!(
        zone1 = z1_name,
        zone2 = z2_name,
        surfaces = surfaces.len(),
        "Synthesized L-shape"
    );
    Ok(SynthesizedModel {
        rules: config.rules,
        zones: vec![zone1, zone2],
        surfaces,
    })
}

/// Horizontal position of a window on its wall
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowPlacement {
    #[default]
    Centered,
    /// Distance from the wall's left edge, seen from outside
    Offset(f64),
}

/// Window to place on a rectangular wall
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub width: f64,
    pub height: f64,
    pub sill_height: f64,
    pub construction: String,
    pub placement: WindowPlacement,
    /// Defaults to `{wall}_Window`
    pub name: Option<String>,
}

impl WindowSpec {
    pub fn new(width: f64, height: f64, sill_height: f64, construction: impl Into<String>) -> Self {
        Self {
            width,
            height,
            sill_height,
            construction: construction.into(),
            placement: WindowPlacement::Centered,
            name: None,
        }
    }

    pub fn at_offset(mut self, offset: f64) -> Self {
        self.placement = WindowPlacement::Offset(offset);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Window vertices inside a four-vertex wall.
///
/// The wall is read as upper-left, lower-left, lower-right, upper-right.
/// Its bottom edge gives the horizontal axis and its left edge the vertical
/// one, so the window keeps the wall's winding and outward normal.
pub fn window_on_wall(wall: &Surface<'_>, spec: &WindowSpec) -> Result<WindowDraft> {
    check_positive("window width", spec.width)?;
    check_positive("window height", spec.height)?;
    check_name("window construction", &spec.construction)?;
    if let Some(name) = &spec.name {
        check_name("window name", name)?;
    }
    if !spec.sill_height.is_finite() || spec.sill_height < 0.0 {
        return Err(Error::InvalidDimension(format!(
            "sill height must be non-negative, got {}",
            spec.sill_height
        )));
    }

    let &[upper_left, lower_left, lower_right, _] = wall.vertices.as_slice() else {
        return Err(Error::WallNotQuad {
            name: wall.name.to_string(),
            count: wall.vertices.len(),
        });
    };

    let u = lower_right - lower_left;
    let v = upper_left - lower_left;
    let (u_len, v_len) = (length(&u), length(&v));
    if u_len < crate::math::EPSILON || v_len < crate::math::EPSILON {
        return Err(Error::DegenerateSurface(wall.name.to_string()));
    }
    let (u_hat, v_hat) = (u / u_len, v / v_len);

    if spec.sill_height + spec.height > v_len {
        return Err(Error::WindowDoesNotFit(format!(
            "height {} + sill {} exceeds wall height {:.2}",
            spec.height, spec.sill_height, v_len
        )));
    }
    if spec.width > u_len {
        return Err(Error::WindowDoesNotFit(format!(
            "width {} exceeds wall width {:.2}",
            spec.width, u_len
        )));
    }

    let offset = match spec.placement {
        WindowPlacement::Centered => (u_len - spec.width) / 2.0,
        WindowPlacement::Offset(offset) => offset,
    };
    if !offset.is_finite() || offset < 0.0 {
        return Err(Error::WindowDoesNotFit(format!("offset {} is negative", offset)));
    }
    if offset + spec.width > u_len {
        return Err(Error::WindowDoesNotFit(format!(
            "offset {} + width {} exceeds wall width {:.2}",
            offset, spec.width, u_len
        )));
    }

    let point = |along: f64, up: f64| lower_left + u_hat * along + v_hat * up;
    let (bottom, top) = (spec.sill_height, spec.sill_height + spec.height);
    let (left, right) = (offset, offset + spec.width);

    Ok(WindowDraft {
        name: spec
            .name
            .clone()
            .unwrap_or_else(|| format!("{}_Window", wall.name)),
        surface_type: "Window".to_string(),
        construction: spec.construction.clone(),
        parent_surface: wall.name.to_string(),
        vertices: vec![
            point(left, top),
            point(left, bottom),
            point(right, bottom),
            point(right, top),
        ],
        offset,
    })
}

/// Document text with a new window appended on `wall_name`.
///
/// The document's own convention record, when present, must be one this
/// module generates. Nothing is produced on any error.
pub fn add_window(
    document: &Document,
    wall_name: &str,
    spec: &WindowSpec,
    config: &SynthesisConfig,
) -> Result<String> {
    match document.geometry_rules() {
        Some(rules) => check_rules(&rules?)?,
        None => config.check_convention()?,
    }

    let set = SurfaceSet::from_document(document);
    let wall = set.surface(wall_name)?;
    if !wall.is_wall() {
        tracing::warn!(
            surface = wall.name,
            surface_type = wall.surface_type,
            "Adding a window to a surface that is not a wall"
        );
    }

    let window = window_on_wall(wall, spec)?;
    tracing::debug!(
        wall = wall.name,
        window = %window.name,
        area = window.area(),
        offset = window.offset,
        "Placed window"
    );
    Ok(document.with_appended(&window.to_record_text(&config.format)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::unit_normal;
    use approx::assert_relative_eq;

    fn outward(model: &SynthesizedModel, name: &str) -> Vector3<f64> {
        unit_normal(&model.surface(name).unwrap().vertices)
    }

    #[test]
    fn test_space_name() {
        assert_eq!(space_name("Zone1"), "Space1");
        assert_eq!(space_name("Office"), "Office_Space");
    }

    #[test]
    fn test_box_normals_point_outward() {
        let model = box_zone(&BoxSpec::new(10.0, 8.0, 3.0), &SynthesisConfig::default()).unwrap();
        assert_eq!(model.surfaces.len(), 6);
        assert_relative_eq!(outward(&model, "Floor"), Vector3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(outward(&model, "Roof"), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(outward(&model, "Wall-S"), Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(outward(&model, "Wall-N"), Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(outward(&model, "Wall-E"), Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(outward(&model, "Wall-W"), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_box_rejects_bad_input() {
        let config = SynthesisConfig::default();
        assert!(matches!(
            box_zone(&BoxSpec::new(0.0, 8.0, 3.0), &config),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            box_zone(&BoxSpec::new(10.0, f64::NAN, 3.0), &config),
            Err(Error::InvalidDimension(_))
        ));

        let clockwise = SynthesisConfig {
            rules: GeometryRules {
                entry_direction: VertexEntryDirection::Clockwise,
                ..GeometryRules::default()
            },
            ..SynthesisConfig::default()
        };
        assert!(matches!(
            box_zone(&BoxSpec::new(10.0, 8.0, 3.0), &clockwise),
            Err(Error::UnsupportedConvention(_))
        ));
    }

    #[test]
    fn test_names_with_delimiters_rejected() {
        let config = SynthesisConfig::default();
        let spec = BoxSpec::new(4.0, 4.0, 3.0).with_zone_name("Lab!2");
        assert!(matches!(box_zone(&spec, &config), Err(Error::InvalidName(_))));

        let mut spec = LShapeSpec::new(5.0, 4.0, 5.0, 9.0, 3.0);
        spec.zone_names[1] = "East;Wing".to_string();
        assert!(matches!(l_shape(&spec, &config), Err(Error::InvalidName(_))));

        let bad_construction = SynthesisConfig {
            wall_construction: "Brick, 200mm".to_string(),
            ..SynthesisConfig::default()
        };
        let err = box_zone(&BoxSpec::new(4.0, 4.0, 3.0), &bad_construction).unwrap_err();
        assert!(matches!(err, Error::InvalidName(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_world_coordinates_apply_origin() {
        let config = SynthesisConfig {
            rules: GeometryRules {
                coordinate_system: CoordinateSystem::World,
                ..GeometryRules::default()
            },
            ..SynthesisConfig::default()
        };
        let spec = BoxSpec::new(2.0, 2.0, 2.0).with_origin(Point3::new(100.0, 50.0, 0.0));
        let model = box_zone(&spec, &config).unwrap();
        let floor = model.surface("Floor").unwrap();
        assert_relative_eq!(floor.vertices[2], Point3::new(100.0, 50.0, 0.0));

        let relative = box_zone(&spec, &SynthesisConfig::default()).unwrap();
        assert_relative_eq!(relative.surface("Floor").unwrap().vertices[2], Point3::origin());
    }

    #[test]
    fn test_l_shape_deeper_first_zone() {
        let spec = LShapeSpec::new(10.0, 12.0, 8.0, 6.0, 3.0);
        let model = l_shape(&spec, &SynthesisConfig::default()).unwrap();
        assert_eq!(model.zones.len(), 2);
        assert_relative_eq!(model.zones[1].origin, Point3::new(10.0, 0.0, 0.0));

        let inner = model.surface("Zone1_Wall-E-Int").unwrap();
        assert_eq!(inner.boundary_condition, "Surface");
        assert_eq!(inner.boundary_object, "Zone2_Wall-W-Int");
        let other = model.surface("Zone2_Wall-W-Int").unwrap();
        assert_eq!(other.boundary_object, "Zone1_Wall-E-Int");

        assert!(model.surface("Zone1_Wall-E-Ext").is_some());
        assert!(model.surface("Zone2_Wall-W-Ext").is_none());
        assert!(model.surface("Zone1_Wall-E").is_none());
        assert_eq!(model.surfaces.len(), 13);

        assert_relative_eq!(outward(&model, "Zone1_Wall-E-Int"), Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(outward(&model, "Zone1_Wall-E-Ext"), Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(outward(&model, "Zone2_Wall-W-Int"), Vector3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(crate::math::area(&inner.vertices), 18.0);
    }

    #[test]
    fn test_l_shape_deeper_second_zone() {
        let spec = LShapeSpec::new(5.0, 4.0, 5.0, 9.0, 3.0);
        let model = l_shape(&spec, &SynthesisConfig::default()).unwrap();
        assert!(model.surface("Zone1_Wall-E-Ext").is_none());
        let ext = model.surface("Zone2_Wall-W-Ext").unwrap();
        assert_relative_eq!(unit_normal(&ext.vertices), Vector3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(crate::math::area(&ext.vertices), 15.0);
    }

    #[test]
    fn test_model_text_parses() {
        let model = box_zone(&BoxSpec::new(10.0, 8.0, 3.0), &SynthesisConfig::default()).unwrap();
        let text = model.to_text(&FormatOptions::default());
        assert!(text.starts_with("GlobalGeometryRules,\n"));
        assert!(text.contains(";  !- Z Origin {m}\n\nBuildingSurface:Detailed,\n"));

        let doc = Document::parse(text);
        assert_eq!(doc.records().len(), 8);
        assert_eq!(doc.geometry_rules().unwrap().unwrap(), GeometryRules::default());
        let set = SurfaceSet::from_document(&doc);
        let floor = set.surface("Floor").unwrap();
        assert_eq!(floor.space, "Space1");
        assert_eq!(floor.boundary_condition, "Ground");
        assert_eq!(floor.vertices.len(), 4);
    }
}
