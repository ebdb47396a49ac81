// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDF-Lite Geometry Processing
//!
//! Surface geometry for IDF building models using nalgebra: Newell normals,
//! area and orientation, targeted vertex rewriting, zone transforms and
//! synthesis of new zones and windows.

pub mod analysis;
pub mod error;
pub mod math;
pub mod rewrite;
pub mod surface;
pub mod synthesis;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use analysis::{totals, zone_summaries, GeometrySummary, ZoneSummary};
pub use error::{Error, Result};
pub use math::{area, azimuth_tilt, centroid, newell_normal, normalize, unit_normal, EPSILON};
pub use rewrite::{apply_replacements, rewrite, rewrite_file, Replacement, Rewrite, SurfaceEdits};
pub use surface::{collect_vertices, SubSurface, Surface, SurfaceFilter, SurfaceSet, VertexRun};
pub use synthesis::{
    add_window, box_zone, l_shape, window_on_wall, BoxSpec, LShapeSpec, SurfaceDraft,
    SynthesisConfig, SynthesizedModel, WindowDraft, WindowPlacement, WindowSpec, ZoneDraft,
};
pub use transform::{
    move_wall, scale_zone, set_zone_height, Axis, HeightOutcome, MoveOutcome, ScaleOutcome,
    TransformOutcome,
};
