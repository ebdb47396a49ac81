// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon math on raw vertex lists
//!
//! Newell's method gives a normal whose length is twice the polygon area and
//! stays well defined for slightly non-planar and concave polygons.

use nalgebra::{Point3, Vector3};

/// Lengths and normal components below this are treated as zero
pub const EPSILON: f64 = 1e-10;

#[inline]
pub fn length(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Unit vector, or the zero vector when `v` is shorter than [`EPSILON`]
#[inline]
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len < EPSILON {
        Vector3::zeros()
    } else {
        v / len
    }
}

/// Unnormalized Newell normal; zero for fewer than three vertices
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let n = points.len();
    let mut normal = Vector3::<f64>::zeros();
    if n < 3 {
        return normal;
    }

    for i in 0..n {
        let current = &points[i];
        let next = &points[(i + 1) % n];

        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal
}

/// Unit outward normal, zero for degenerate polygons
#[inline]
pub fn unit_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    normalize(&newell_normal(points))
}

/// Polygon area, half the Newell normal length
#[inline]
pub fn area(points: &[Point3<f64>]) -> f64 {
    length(&newell_normal(points)) / 2.0
}

/// Azimuth and tilt in degrees for a normal.
///
/// Azimuth is clockwise from north (+Y) in `[0, 360)`, and `0` for
/// horizontal surfaces. Tilt is measured from straight up, in `[0, 180]`.
pub fn azimuth_tilt(normal: &Vector3<f64>) -> (f64, f64) {
    let n = normalize(normal);
    let tilt = n.z.clamp(-1.0, 1.0).acos().to_degrees();

    let azimuth = if n.x.abs() < EPSILON && n.y.abs() < EPSILON {
        0.0
    } else {
        // rem_euclid can round a tiny negative angle up to exactly 360
        let az = n.x.atan2(n.y).to_degrees().rem_euclid(360.0);
        if az >= 360.0 {
            0.0
        } else {
            az
        }
    };

    (azimuth, tilt)
}

/// Arithmetic mean of the vertices, origin for an empty list
pub fn centroid(points: &[Point3<f64>]) -> Point3<f64> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_up() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_unit_square_area_and_tilt() {
        let points = square_up();
        let normal = newell_normal(&points);
        assert_relative_eq!(normal, Vector3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(area(&points), 1.0);

        let (azimuth, tilt) = azimuth_tilt(&normal);
        assert_eq!(azimuth, 0.0);
        assert_relative_eq!(tilt, 0.0);
    }

    #[test]
    fn test_reversed_winding_faces_down() {
        let mut points = square_up();
        points.reverse();
        let (_, tilt) = azimuth_tilt(&newell_normal(&points));
        assert_relative_eq!(tilt, 180.0);
        assert_relative_eq!(area(&points), 1.0);
    }

    #[test]
    fn test_south_and_east_walls() {
        // Counterclockwise from outside, starting upper left
        let south = vec![
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 3.0),
        ];
        let (azimuth, tilt) = azimuth_tilt(&newell_normal(&south));
        assert_relative_eq!(azimuth, 180.0, epsilon = 1e-9);
        assert_relative_eq!(tilt, 90.0, epsilon = 1e-9);
        assert_relative_eq!(area(&south), 30.0);

        let east = vec![
            Point3::new(10.0, 0.0, 3.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 8.0, 0.0),
            Point3::new(10.0, 8.0, 3.0),
        ];
        let (azimuth, tilt) = azimuth_tilt(&newell_normal(&east));
        assert_relative_eq!(azimuth, 90.0, epsilon = 1e-9);
        assert_relative_eq!(tilt, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_west_wall_wraps_azimuth() {
        let west = vec![
            Point3::new(0.0, 8.0, 3.0),
            Point3::new(0.0, 8.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
        ];
        let (azimuth, _) = azimuth_tilt(&newell_normal(&west));
        assert_relative_eq!(azimuth, 270.0, epsilon = 1e-9);
    }

    #[test]
    fn test_near_north_stays_below_full_turn() {
        let (azimuth, tilt) = azimuth_tilt(&Vector3::new(-1e-17, 1.0, 0.0));
        assert!((0.0..360.0).contains(&azimuth), "azimuth {}", azimuth);
        assert_eq!(azimuth, 0.0);
        assert_relative_eq!(tilt, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(newell_normal(&[]), Vector3::zeros());
        assert_eq!(area(&[Point3::new(1.0, 2.0, 3.0), Point3::origin()]), 0.0);
        assert_eq!(normalize(&Vector3::new(1e-12, 0.0, 0.0)), Vector3::zeros());

        let collinear = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(unit_normal(&collinear), Vector3::zeros());
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), Point3::origin());
        assert_relative_eq!(centroid(&square_up()), Point3::new(0.5, 0.5, 0.0));
    }
}
