//! Physics primitives of a custom stadium.
//!
//! Every primitive except [`Goal`] ends with a collision mask and a
//! collision group. All floats are big-endian `f64`.

use hbr_core::{ByteCursor, Result};
use serde::Serialize;

use super::collision::CollisionMask;
use crate::color::Color;
use crate::team::Team;

/// A 2D coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Point {
    /// Read `x` then `y`.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            x: c.read_f64_be()?,
            y: c.read_f64_be()?,
        })
    }
}

/// A segment endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    /// Position.
    #[serde(flatten)]
    pub pos: Point,
    /// Bounce coefficient.
    pub b_coef: f64,
    /// Channels this vertex collides with.
    pub c_mask: CollisionMask,
    /// Channels this vertex belongs to.
    pub c_group: CollisionMask,
}

impl Vertex {
    /// Decode one vertex.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            pos: Point::decode(c)?,
            b_coef: c.read_f64_be()?,
            c_mask: CollisionMask::decode(c)?,
            c_group: CollisionMask::decode(c)?,
        })
    }
}

/// A wall between two vertices, optionally curved.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Index of the first vertex.
    pub v0: u8,
    /// Index of the second vertex.
    pub v1: u8,
    /// Bounce coefficient.
    pub b_coef: f64,
    /// Collision mask.
    pub c_mask: CollisionMask,
    /// Collision group.
    pub c_group: CollisionMask,
    /// Curvature in degrees; `0` for a straight segment.
    pub curve: f64,
    /// Whether the segment is drawn.
    pub vis: bool,
    /// Stroke colour.
    pub color: Color,
}

impl Segment {
    /// Decode one segment.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            v0: c.read_u8()?,
            v1: c.read_u8()?,
            b_coef: c.read_f64_be()?,
            c_mask: CollisionMask::decode(c)?,
            c_group: CollisionMask::decode(c)?,
            curve: c.read_f64_be_nan_zero()?,
            vis: c.read_bool()?,
            color: Color::decode(c)?,
        })
    }
}

/// An infinite collision plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plane {
    /// Normal vector.
    pub normal: Point,
    /// Distance from the origin along the normal.
    pub dist: f64,
    /// Bounce coefficient.
    pub b_coef: f64,
    /// Collision mask.
    pub c_mask: CollisionMask,
    /// Collision group.
    pub c_group: CollisionMask,
}

impl Plane {
    /// Decode one plane.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            normal: Point::decode(c)?,
            dist: c.read_f64_be()?,
            b_coef: c.read_f64_be()?,
            c_mask: CollisionMask::decode(c)?,
            c_group: CollisionMask::decode(c)?,
        })
    }
}

/// A goal line. Carries no collision fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Goal {
    /// First post.
    pub p0: Point,
    /// Second post.
    pub p1: Point,
    /// The team that concedes when the ball crosses this line.
    pub team: Team,
}

impl Goal {
    /// Decode one goal. A non-zero team byte is red, zero is blue.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            p0: Point::decode(c)?,
            p1: Point::decode(c)?,
            team: if c.read_bool()? { Team::Red } else { Team::Blue },
        })
    }
}

/// A physical disc (ball, post or obstacle).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disc {
    /// Position.
    pub pos: Point,
    /// Velocity.
    pub speed: Point,
    /// Radius.
    pub radius: f64,
    /// Bounce coefficient.
    pub b_coef: f64,
    /// Inverse mass; `0` is immovable.
    pub inv_mass: f64,
    /// Velocity multiplier per frame.
    pub damping: f64,
    /// Fill colour.
    pub color: Color,
    /// Collision mask.
    pub c_mask: CollisionMask,
    /// Collision group.
    pub c_group: CollisionMask,
}

impl Disc {
    /// Decode one disc.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            pos: Point::decode(c)?,
            speed: Point::decode(c)?,
            radius: c.read_f64_be()?,
            b_coef: c.read_f64_be()?,
            inv_mass: c.read_f64_be()?,
            damping: c.read_f64_be()?,
            color: Color::decode(c)?,
            c_mask: CollisionMask::decode(c)?,
            c_group: CollisionMask::decode(c)?,
        })
    }
}

/// A distance constraint between two discs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Joint {
    /// Index of the first disc.
    pub d0: u8,
    /// Index of the second disc.
    pub d1: u8,
    /// Minimum distance.
    pub min_length: f64,
    /// Maximum distance.
    pub max_length: f64,
    /// Spring stiffness; infinite for a rigid joint.
    pub strength: f64,
    /// Stroke colour.
    pub color: Color,
}

impl Joint {
    /// Decode one joint.
    pub fn decode(c: &mut ByteCursor<'_>) -> Result<Self> {
        Ok(Self {
            d0: c.read_u8()?,
            d1: c.read_u8()?,
            min_length: c.read_f64_be()?,
            max_length: c.read_f64_be()?,
            strength: c.read_f64_be()?,
            color: Color::decode(c)?,
        })
    }
}

/// Read a one-byte count followed by that many items.
pub fn decode_list<T>(
    c: &mut ByteCursor<'_>,
    item: impl Fn(&mut ByteCursor<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let count = c.read_u8()?;
    (0..count).map(|_| item(c)).collect()
}
