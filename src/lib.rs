// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Percentage-layout PDF report generator for geoscientific datasets.
//!
//! `georeport` renders map-and-table reports into PDF documents.  It is built ontop of
//! [`printpdf`][] and [`lopdf`][]: pages are laid out with named percentage boxes, vector shapes
//! and sampled grids are drawn in world coordinates and fitted into page rectangles, and tables
//! flow over as many pages as they need.  All drawing happens in PDF points with the origin in
//! the lower left corner of the page.
//!
//! # Quickstart
//!
//! To generate a report, create a [`Document`][], register the layout boxes, add a page and draw
//! into the resolved box rectangles.  Then call [`Document::save`][] to write the PDF file.
//!
//! ```no_run
//! use georeport::{Document, PaperSize, Orientation};
//! use georeport::style::{Color, TextStyle};
//!
//! let mut doc = Document::with_title(PaperSize::A4, Orientation::Portrait, "Demo Report");
//! doc.layout_add_box("TITLE", 0.0, 0.0, 100.0, 5.0);
//! doc.layout_add_box("BODY", 0.0, 5.0, 100.0, 100.0);
//! doc.add_page();
//! let title = doc.layout_get_box("TITLE");
//! doc.draw_text(
//!     title.x_center(),
//!     title.y_center(),
//!     "Hello",
//!     20.0,
//!     &TextStyle::new().centered(),
//!     0.0,
//!     Color::BLACK,
//! );
//! doc.save("out/report.pdf");
//! ```
//!
//! # Overview
//!
//! A [`Document`][] owns one PDF backend handle for its whole lifetime and appends pages in
//! strict order; only the most recently added page can be drawn to.  The drawing API follows the
//! host-application convention of returning `bool`: a draw call that cannot run (no page yet,
//! degenerate geometry, too few points) is a silent no-op that returns `false` and never panics.
//! Renderers for rulers and graticules ([`Document::draw_graticule`][]), tables
//! ([`Document::draw_table`][]) and shapes/grids ([`Document::draw_shapes`][],
//! [`Document::draw_grid`][]) are composed from the same primitives.
//!
//! The outline (bookmark) tree is collected while pages are added and written into the final
//! file when the document is saved.  Long-running renderers poll a [`ProgressSink`][] between
//! units of work so a host application can display progress and request cancellation.
//!
//! [`printpdf`]: https://docs.rs/printpdf
//! [`lopdf`]: https://docs.rs/lopdf
//! [`Document`]: struct.Document.html
//! [`Document::save`]: struct.Document.html#method.save
//! [`Document::draw_graticule`]: struct.Document.html#method.draw_graticule
//! [`Document::draw_table`]: struct.Document.html#method.draw_table
//! [`Document::draw_shapes`]: struct.Document.html#method.draw_shapes
//! [`Document::draw_grid`]: struct.Document.html#method.draw_grid
//! [`ProgressSink`]: trait.ProgressSink.html

#![warn(missing_docs, rust_2018_idioms)]

mod document;
mod ruler;

pub mod error;
pub mod fonts;
pub mod layout;
pub mod render;
pub mod shapes;
pub mod style;
pub mod table;

use derive_more::{
    Add, AddAssign, Div, DivAssign, From, Into, Mul, MulAssign, Sub, SubAssign, Sum,
};

pub use crate::document::{Document, NoProgress, ProgressSink, TitleLevel};
pub use crate::layout::fit_rect;

/// The width of an ISO A4 page in points.
pub const PAGE_WIDTH_A4: f64 = 595.276;
/// The height of an ISO A4 page in points.
pub const PAGE_HEIGHT_A4: f64 = 841.89;
/// The height of an ISO A4 page in meters.
pub const PAGE_HEIGHT_A4_M: f64 = 0.297;

/// The width of an ISO A3 page in points.
pub const PAGE_WIDTH_A3: f64 = PAGE_HEIGHT_A4;
/// The height of an ISO A3 page in points.
pub const PAGE_HEIGHT_A3: f64 = PAGE_HEIGHT_A4 * std::f64::consts::SQRT_2;

/// Conversion factor from meters to page points, derived from the metric height of an A4 page.
pub const METER_TO_POINT: f64 = PAGE_HEIGHT_A4 / PAGE_HEIGHT_A4_M;
/// Conversion factor from page points to meters.
pub const POINT_TO_METER: f64 = PAGE_HEIGHT_A4_M / PAGE_HEIGHT_A4;

/// A length measured in PDF points (1/72 inch).
///
/// All page-space lengths in this crate are measured in points; world-space coordinates are
/// plain `f64` values in whatever unit the dataset uses.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Div,
    DivAssign,
    From,
    Into,
    Mul,
    MulAssign,
    Sub,
    SubAssign,
    Sum,
)]
pub struct Pt(pub f64);

impl Pt {
    /// Returns the maximum of this value and the given value.
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }
}

impl From<i32> for Pt {
    fn from(pt: i32) -> Pt {
        Pt(pt.into())
    }
}

impl From<f32> for Pt {
    fn from(pt: f32) -> Pt {
        Pt(pt.into())
    }
}

impl From<Pt> for printpdf::Pt {
    fn from(pt: Pt) -> printpdf::Pt {
        printpdf::Pt(pt.0)
    }
}

impl From<Pt> for printpdf::Mm {
    fn from(pt: Pt) -> printpdf::Mm {
        printpdf::Pt(pt.0).into()
    }
}

impl From<printpdf::Pt> for Pt {
    fn from(pt: printpdf::Pt) -> Pt {
        Pt(pt.0)
    }
}

/// A position on a page, measured in points from the lower left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign)]
pub struct Point {
    /// The x coordinate, measured from the left edge of the page.
    pub x: Pt,
    /// The y coordinate, measured from the bottom edge of the page.
    pub y: Pt,
}

impl Point {
    /// Creates a new position from the given coordinates.
    pub fn new(x: impl Into<Pt>, y: impl Into<Pt>) -> Point {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl<X: Into<Pt>, Y: Into<Pt>> From<(X, Y)> for Point {
    fn from(values: (X, Y)) -> Point {
        Point::new(values.0, values.1)
    }
}

/// An axis-aligned rectangle, in world or page coordinates.
///
/// Rectangles are normalized on construction so that `x_min <= x_max` and `y_min <= y_max`.
/// A rectangle with a zero range on either axis is degenerate; drawing operations accept
/// degenerate rectangles and treat them as a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// The smaller x coordinate.
    pub x_min: f64,
    /// The smaller y coordinate.
    pub y_min: f64,
    /// The larger x coordinate.
    pub x_max: f64,
    /// The larger y coordinate.
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rectangle from two corner points, normalizing the coordinate order.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Rect {
        Rect {
            x_min: x_min.min(x_max),
            y_min: y_min.min(y_max),
            x_max: x_min.max(x_max),
            y_max: y_min.max(y_max),
        }
    }

    /// Creates a new rectangle from an origin and an extent.
    pub fn with_size(x: f64, y: f64, dx: f64, dy: f64) -> Rect {
        Rect::new(x, y, x + dx, y + dy)
    }

    /// Returns the extent along the x axis.
    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Returns the extent along the y axis.
    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns the x coordinate of the center.
    pub fn x_center(&self) -> f64 {
        0.5 * (self.x_min + self.x_max)
    }

    /// Returns the y coordinate of the center.
    pub fn y_center(&self) -> f64 {
        0.5 * (self.y_min + self.y_max)
    }

    /// Returns true if either axis has a non-positive range.
    pub fn is_degenerate(&self) -> bool {
        self.x_range() <= 0.0 || self.y_range() <= 0.0
    }

    /// Returns this rectangle grown outwards by the given amount on every edge.
    ///
    /// If `percent` is set, the amount is interpreted per axis as a percentage of that axis'
    /// range.
    pub fn inflated(&self, amount: f64, percent: bool) -> Rect {
        let (dx, dy) = if percent {
            (0.01 * amount * self.x_range(), 0.01 * amount * self.y_range())
        } else {
            (amount, amount)
        };
        self.inflated_xy(dx, dy)
    }

    /// Returns this rectangle grown outwards by `dx` on the left/right and `dy` on the
    /// top/bottom edges.
    pub fn inflated_xy(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.x_min - dx,
            self.y_min - dy,
            self.x_max + dx,
            self.y_max + dy,
        )
    }

    /// Returns this rectangle shrunk inwards by the given amount on every edge.
    ///
    /// Over-deflation collapses the affected axis to its center instead of inverting the
    /// rectangle.
    pub fn deflated(&self, amount: f64, percent: bool) -> Rect {
        let (dx, dy) = if percent {
            (0.01 * amount * self.x_range(), 0.01 * amount * self.y_range())
        } else {
            (amount, amount)
        };
        let dx = dx.min(0.5 * self.x_range());
        let dy = dy.min(0.5 * self.y_range());
        Rect::new(
            self.x_min + dx,
            self.y_min + dy,
            self.x_max - dx,
            self.y_max - dy,
        )
    }

    /// Returns the smallest rectangle containing both this and the given rectangle.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Returns true if this rectangle and the given rectangle overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    /// Returns true if the given point lies inside this rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// A physical paper size.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum PaperSize {
    /// The ISO A4 paper size (210x297mm).
    A4,
    /// The ISO A3 paper size (297x420mm).
    A3,
}

/// The orientation of a page.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Orientation {
    /// Height larger than width.
    Portrait,
    /// Width larger than height.
    Landscape,
}

impl PaperSize {
    /// Returns the page dimensions in points for this paper size and the given orientation.
    pub fn dimensions(self, orientation: Orientation) -> (f64, f64) {
        let (width, height) = match self {
            PaperSize::A4 => (PAGE_WIDTH_A4, PAGE_HEIGHT_A4),
            PaperSize::A3 => (PAGE_WIDTH_A3, PAGE_HEIGHT_A3),
        };
        match orientation {
            Orientation::Portrait => (width, height),
            Orientation::Landscape => (height, width),
        }
    }
}
