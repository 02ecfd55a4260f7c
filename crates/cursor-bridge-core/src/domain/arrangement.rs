//! Display arrangement: where the external surface sits relative to the primary.
//!
//! The primary surface is anchored at (0, 0) and the external surface is
//! attached to one of its four edges, centred along the perpendicular axis.
//! The resulting bounding rectangle is expressed in the primary surface's
//! coordinate space, so its origin may be negative (leading/top) or lie
//! beyond the primary extent (trailing/bottom).
//!
//! An [`Arrangement`] is a value: when either surface changes size or the
//! edge changes, resolve a new one and replace the old one wholesale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Point, Rect, Size};

/// The side of the primary surface the external surface is attached to.
///
/// `Leading` and `Trailing` are the left and right sides in a left-to-right
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Leading,
    Top,
    #[default]
    Trailing,
    Bottom,
}

impl Edge {
    /// All edges, in declaration order.
    pub const ALL: [Edge; 4] = [Edge::Leading, Edge::Top, Edge::Trailing, Edge::Bottom];

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Leading => "leading",
            Edge::Top => "top",
            Edge::Trailing => "trailing",
            Edge::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name one of the four edges.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown edge '{0}': expected leading, top, trailing or bottom")]
pub struct ParseEdgeError(pub String);

impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edge::ALL
            .into_iter()
            .find(|edge| edge.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEdgeError(s.to_string()))
    }
}

/// The geometric relationship locating the external surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    /// Edge of the primary surface the external surface is attached to.
    pub edge: Edge,
    /// External surface bounds in primary coordinates.
    pub external_bounds: Rect,
}

impl Arrangement {
    /// Places an external surface of `external` size against `edge` of a
    /// primary surface of `primary` size.
    ///
    /// Pure and infallible: any pair of sizes yields an arrangement.
    pub fn resolve(primary: Size, external: Size, edge: Edge) -> Self {
        let centred_x = (primary.width - external.width) / 2.0;
        let centred_y = (primary.height - external.height) / 2.0;

        let origin = match edge {
            Edge::Leading => Point::new(-external.width, centred_y),
            Edge::Top => Point::new(centred_x, -external.height),
            Edge::Trailing => Point::new(primary.width, centred_y),
            Edge::Bottom => Point::new(centred_x, primary.height),
        };

        Self {
            edge,
            external_bounds: Rect {
                origin,
                size: external,
            },
        }
    }

    /// Origin of the external surface in primary coordinates.
    pub fn external_origin(&self) -> Point {
        self.external_bounds.origin
    }

    /// Size of the external surface.
    pub fn external_size(&self) -> Size {
        self.external_bounds.size
    }

    /// Translates a logical position into the external surface's local space.
    pub fn to_external_local(&self, logical: Point) -> Point {
        logical.relative_to(self.external_origin())
    }

    /// Translates an external-local position back into primary coordinates.
    pub fn from_external_local(&self, local: Point) -> Point {
        local.offset_by(self.external_origin())
    }
}
