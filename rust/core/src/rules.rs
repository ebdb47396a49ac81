// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global vertex convention (`GlobalGeometryRules`)
//!
//! Every vertex-bearing record in a document follows one declared convention:
//! the corner the vertex list starts from, the winding direction seen from
//! outside, and whether coordinates are zone-relative or absolute.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::record::Record;
use crate::writer::{FormatOptions, RecordWriter};

/// Corner of the polygon listed first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartingVertex {
    #[default]
    UpperLeftCorner,
    LowerLeftCorner,
    UpperRightCorner,
    LowerRightCorner,
}

/// Winding direction as seen from outside the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexEntryDirection {
    #[default]
    Counterclockwise,
    Clockwise,
}

/// Frame the coordinates are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    /// Relative to the owning zone's origin
    #[default]
    Relative,
    World,
    Absolute,
}

macro_rules! keyword_enum {
    ($ty:ty, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(Error::InvalidValue(format!("unknown {} '{}'", $what, s)))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum!(StartingVertex, "starting vertex position", {
    UpperLeftCorner => "UpperLeftCorner",
    LowerLeftCorner => "LowerLeftCorner",
    UpperRightCorner => "UpperRightCorner",
    LowerRightCorner => "LowerRightCorner",
});

keyword_enum!(VertexEntryDirection, "vertex entry direction", {
    Counterclockwise => "Counterclockwise",
    Clockwise => "Clockwise",
});

keyword_enum!(CoordinateSystem, "coordinate system", {
    Relative => "Relative",
    World => "World",
    Absolute => "Absolute",
});

/// Parsed or intended `GlobalGeometryRules`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryRules {
    pub starting_vertex: StartingVertex,
    pub entry_direction: VertexEntryDirection,
    pub coordinate_system: CoordinateSystem,
}

impl GeometryRules {
    /// Read the convention from a `GlobalGeometryRules` record.
    ///
    /// Missing trailing fields fall back to their defaults.
    pub fn from_record(record: &Record) -> Result<Self> {
        let starting_vertex = match record.field(0) {
            "" => StartingVertex::default(),
            s => s.parse()?,
        };
        let entry_direction = match record.field(1) {
            "" => VertexEntryDirection::default(),
            s => s.parse()?,
        };
        let coordinate_system = match record.field(2) {
            "" => CoordinateSystem::default(),
            s => s.parse()?,
        };

        Ok(Self {
            starting_vertex,
            entry_direction,
            coordinate_system,
        })
    }

    /// Whether coordinates are offset by the owning zone's origin
    #[inline]
    pub fn is_relative(&self) -> bool {
        self.coordinate_system == CoordinateSystem::Relative
    }

    /// Render as a `GlobalGeometryRules` record
    pub fn to_record_text(&self, options: &FormatOptions) -> String {
        RecordWriter::new("GlobalGeometryRules", options)
            .field(self.starting_vertex.as_str(), "Starting Vertex Position")
            .field(self.entry_direction.as_str(), "Vertex Entry Direction")
            .field(self.coordinate_system.as_str(), "Coordinate System")
            .finish()
    }
}
