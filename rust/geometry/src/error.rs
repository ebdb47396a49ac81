// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while deriving, transforming or synthesizing geometry
///
/// Every variant except [`Error::SurfaceNotFound`] and [`Error::Core`]
/// describes an input that cannot produce valid geometry.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No surfaces found for zone matching '{zone}'")]
    NoMatchingSurfaces { zone: String },

    #[error("Zone height is {height:.4} m, too flat to rescale")]
    FlatZone { height: f64 },

    #[error("Window does not fit: {0}")]
    WindowDoesNotFit(String),

    #[error("Wall '{name}' has {count} vertices, need 4 for window placement")]
    WallNotQuad { name: String, count: usize },

    #[error("Unknown axis '{0}', expected x, y or z")]
    UnknownAxis(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Degenerate surface '{0}': zero-length normal")]
    DegenerateSurface(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Unsupported vertex convention: {0}")]
    UnsupportedConvention(String),

    #[error("Surface '{0}' not found")]
    SurfaceNotFound(String),

    #[error("Core parser error: {0}")]
    Core(#[from] idf_lite_core::Error),
}

impl Error {
    /// Whether the error describes unusable input rather than a missing record
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::SurfaceNotFound(_) | Error::Core(_))
    }
}
