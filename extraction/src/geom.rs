//! Page geometry shared by the word source, the region detector and Tabula.
//!
//! NOTE: All coordinates use the Tabula origin at the top-left of the page, rather than the
//! standard PDF origin at the bottom left. Therefore for a valid [PdfRect] the following must be
//! true: `left <= right && top <= bottom`.


use serde::{Deserialize, de::Visitor};

/// Measurement of space within a Pdf page, 1 = 1/72 of an inch.
#[derive(Clone, Copy, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct PdfPoints(i64);

impl PdfPoints {
    /// Fraction of a point that can be represented.
    const PRECISION: f32 = 4096.0;

    /// Creates a [PdfPoints] with the given [f32] value.
    pub fn from_f32(value: f32) -> Self {
        let quantised = (value * Self::PRECISION).round() as i64;
        Self(quantised)
    }

    /// Returns the number of PDF points as a [f32] value.
    pub fn to_f32(self) -> f32 {
        (self.0 as f32) / Self::PRECISION
    }
}

impl std::ops::Add for PdfPoints {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for PdfPoints {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for PdfPoints {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for PdfPoints {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::fmt::Debug for PdfPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PdfPoints({} (quantised={}))", self.to_f32(), self.0)
    }
}

impl std::fmt::Display for PdfPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

impl From<f32> for PdfPoints {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl<'de> Deserialize<'de> for PdfPoints {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_f32(PdfPointsVisitor)
    }
}

struct PdfPointsVisitor;

impl<'de> Visitor<'de> for PdfPointsVisitor {
    type Value = PdfPoints;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a floating point number")
    }

    fn visit_f32<E>(self, v: f32) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PdfPoints::from_f32(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PdfPoints::from_f32(v as f32))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PdfPoints::from_f32(v as f32))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(PdfPoints::from_f32(v as f32))
    }
}

/// A point on a page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PdfPoint {
    pub x: PdfPoints,
    pub y: PdfPoints,
}

/// Defines a page-aligned rectangular region within a page of a PDF.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PdfRect {
    /// Horizontal coordinate of the left hand side of the rectangle.
    pub left: PdfPoints,
    /// Vertical coordinate of the top of the rectangle.
    pub top: PdfPoints,
    /// Horizontal coordinate of the right hand side of the rectangle.
    pub right: PdfPoints,
    /// Vertical coordinate of the bottom of the rectangle.
    pub bottom: PdfPoints,
}

impl PdfRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left: left.into(),
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
        }
    }

    pub fn width(&self) -> PdfPoints {
        self.right - self.left
    }

    pub fn height(&self) -> PdfPoints {
        self.bottom - self.top
    }

    /// A rectangle with no area. Such a rectangle contributes nothing to a union.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn top_left(&self) -> PdfPoint {
        PdfPoint {
            x: self.left,
            y: self.top,
        }
    }

    pub fn bottom_left(&self) -> PdfPoint {
        PdfPoint {
            x: self.left,
            y: self.bottom,
        }
    }

    /// Grows the rectangle to the smallest rectangle containing both itself and `other`.
    pub fn include_rect(&mut self, other: &PdfRect) -> &mut Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            *self = *other;
            return self;
        }
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
        self
    }

    /// Grows the rectangle to the smallest rectangle containing both itself and `point`.
    pub fn include_point(&mut self, point: PdfPoint) -> &mut Self {
        self.left = self.left.min(point.x);
        self.top = self.top.min(point.y);
        self.right = self.right.max(point.x);
        self.bottom = self.bottom.max(point.y);
        self
    }

    /// Returns `true` if `other` lies entirely within this rectangle (edges inclusive).
    pub fn contains(&self, other: &PdfRect) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Returns the union of all the given rectangles, or an empty rectangle if there are none.
    pub fn union_all<'a, I>(rects: I) -> PdfRect
    where
        I: IntoIterator<Item = &'a PdfRect>,
    {
        rects.into_iter().fold(PdfRect::default(), |mut acc, rect| {
            acc.include_rect(rect);
            acc
        })
    }

    pub fn to_tabula_rectangle(self) -> tabula::Rectangle {
        tabula::Rectangle::new(
            self.left.to_f32(),
            self.top.to_f32(),
            self.width().to_f32(),
            self.height().to_f32(),
        )
    }

    pub fn to_tabula_rectangle_page_area(&self) -> (i32, tabula::Rectangle) {
        (
            tabula::ABSOLUTE_AREA_CALCULATION_MODE,
            self.to_tabula_rectangle(),
        )
    }
}

impl std::fmt::Display for PdfRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}
