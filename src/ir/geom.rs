//! Rectangle types for design-tool geometry.
//!
//! Bounding boxes arrive from the design tool in document-absolute
//! coordinates; constraint mapping needs them relative to the immediate
//! parent. The `TSpace` marker keeps the two frames of reference apart
//! at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker type for document-absolute coordinates.
///
/// Every raw bounding box is expressed in this space, with (0, 0) at
/// the document origin.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Canvas {}

/// Marker type for parent-relative coordinates.
///
/// Produced by [`Rect::to_local`] when mapping constraints against the
/// immediate parent bounds.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Local {}

impl fmt::Debug for Canvas {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {} // unreachable: Canvas has no variants
    }
}

impl fmt::Debug for Local {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {} // unreachable: Local has no variants
    }
}

/// An axis-aligned rectangle in XYWH form (origin + extent).
///
/// The `TSpace` parameter should be either [`Canvas`] or [`Local`],
/// ensuring that absolute and parent-relative rectangles cannot be
/// accidentally mixed.
///
/// Note: this type does NOT enforce non-negative extents. Malformed
/// boxes from upstream exports are representable on purpose; the layout
/// heuristics degrade to safe defaults rather than panic.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<TSpace> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    _space: std::marker::PhantomData<TSpace>,
}

impl<TSpace> Rect<TSpace> {
    /// Creates a new rectangle from origin and extent.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            _space: std::marker::PhantomData,
        }
    }

    /// Returns the right edge (x + width).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge (y + height).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns the area of the rectangle.
    ///
    /// May be negative if the rectangle is malformed.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if all fields are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Returns the area of the intersection with another rectangle,
    /// or 0.0 if they do not overlap.
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return 0.0;
        }
        (right - left) * (bottom - top)
    }

    /// Returns the intersection area as a fraction of the smaller
    /// rectangle's area, or 0.0 when either area is degenerate.
    pub fn overlap_of_smaller(&self, other: &Self) -> f64 {
        let smaller = self.area().min(other.area());
        if smaller <= 0.0 {
            return 0.0;
        }
        self.intersection_area(other) / smaller
    }

    /// Returns true if this rectangle covers `other` entirely, within
    /// `tolerance` pixels per edge.
    pub fn covers(&self, other: &Self, tolerance: f64) -> bool {
        self.x <= other.x + tolerance
            && self.y <= other.y + tolerance
            && self.right() >= other.right() - tolerance
            && self.bottom() >= other.bottom() - tolerance
    }

    /// Returns the smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

impl Rect<Canvas> {
    /// Re-expresses this rectangle relative to `parent`'s origin.
    pub fn to_local(&self, parent: &Rect<Canvas>) -> Rect<Local> {
        Rect::new(self.x - parent.x, self.y - parent.y, self.width, self.height)
    }
}

impl<TSpace> fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl<TSpace> Default for Rect<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Rect<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectData {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        }
        let data = RectData::deserialize(deserializer)?;
        Ok(Rect::new(data.x, data.y, data.width, data.height))
    }
}
