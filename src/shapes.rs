// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Vector shapes, raster grids and their page renderers.
//!
//! The data model mirrors what the format tools hand over: a [`Shape`][] is a point, point
//! set, polyline or polygon in world coordinates, a [`Shapes`][] collection groups shapes that
//! belong to one layer, and a [`Grid`][] is a regularly sampled raster with an optional
//! no-data value.  The renderers aspect-fit the world extent into a page rectangle and map
//! every vertex through a single scalar world-to-page factor, so nothing is distorted.
//!
//! [`Document::draw_shape`][] fits each shape on its own; [`Document::draw_shapes`][] computes
//! one shared transform from the collection extent so that all members stay mutually
//! consistent in scale.  These are intentionally separate code paths.
//!
//! [`Shape`]: enum.Shape.html
//! [`Shapes`]: struct.Shapes.html
//! [`Grid`]: struct.Grid.html
//! [`Document::draw_shape`]: ../struct.Document.html#method.draw_shape
//! [`Document::draw_shapes`]: ../struct.Document.html#method.draw_shapes

use crate::layout::fit_rect;
use crate::style::{Color, ColorRamp, DrawMode, ShapeStyle};
use crate::{Document, Rect};

/// One ring of a polygon.
#[derive(Clone, Debug)]
pub struct PolygonPart {
    /// The ring vertices in world coordinates.
    pub points: Vec<(f64, f64)>,
    /// Marks the ring as a hole ("lake"): it renders filled with the background color so it
    /// visually punches through the polygon fill.
    pub is_hole: bool,
}

impl PolygonPart {
    /// Creates a solid ring.
    pub fn ring(points: Vec<(f64, f64)>) -> PolygonPart {
        PolygonPart {
            points,
            is_hole: false,
        }
    }

    /// Creates a hole ring.
    pub fn hole(points: Vec<(f64, f64)>) -> PolygonPart {
        PolygonPart {
            points,
            is_hole: true,
        }
    }
}

/// A vector shape in world coordinates.
#[derive(Clone, Debug)]
pub enum Shape {
    /// A single point.
    Point((f64, f64)),
    /// A set of independent points.
    MultiPoint(Vec<(f64, f64)>),
    /// A polyline with one or more parts.
    Line(Vec<Vec<(f64, f64)>>),
    /// A polygon with one or more rings, any of which may be a hole.
    Polygon(Vec<PolygonPart>),
}

fn bounds<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<Rect> {
    let mut result: Option<Rect> = None;
    for &(x, y) in points {
        let point = Rect {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        };
        result = Some(match result {
            Some(r) => r.union(&point),
            None => point,
        });
    }
    result
}

impl Shape {
    /// Returns true if the shape has at least one vertex.
    pub fn is_valid(&self) -> bool {
        match self {
            Shape::Point(_) => true,
            Shape::MultiPoint(points) => !points.is_empty(),
            Shape::Line(parts) => parts.iter().any(|part| !part.is_empty()),
            Shape::Polygon(parts) => parts.iter().any(|part| !part.points.is_empty()),
        }
    }

    /// Returns the bounding rectangle of all vertices.
    ///
    /// The extent of a single point is degenerate; rendering such a shape needs an explicit
    /// world rectangle.
    pub fn extent(&self) -> Rect {
        let extent = match self {
            Shape::Point(point) => bounds(std::iter::once(point)),
            Shape::MultiPoint(points) => bounds(points.iter()),
            Shape::Line(parts) => bounds(parts.iter().flatten()),
            Shape::Polygon(parts) => bounds(parts.iter().flat_map(|part| part.points.iter())),
        };
        extent.unwrap_or_default()
    }
}

/// An ordered collection of shapes forming one layer.
#[derive(Clone, Debug, Default)]
pub struct Shapes {
    shapes: Vec<Shape>,
}

impl Shapes {
    /// Creates an empty collection.
    pub fn new() -> Shapes {
        Shapes::default()
    }

    /// Appends a shape.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Iterates over the shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Returns the union extent of all member shapes.
    pub fn extent(&self) -> Rect {
        let mut extent: Option<Rect> = None;
        for shape in &self.shapes {
            if shape.is_valid() {
                let e = shape.extent();
                extent = Some(match extent {
                    Some(r) => r.union(&e),
                    None => e,
                });
            }
        }
        extent.unwrap_or_default()
    }
}

/// A regularly sampled raster grid in world coordinates.
#[derive(Clone, Debug)]
pub struct Grid {
    extent: Rect,
    n_cols: usize,
    n_rows: usize,
    values: Vec<f64>,
    no_data: Option<f64>,
    z_min: f64,
    z_max: f64,
}

impl Grid {
    /// Creates a grid from row-major cell values; the first value is the lower left cell.
    ///
    /// Returns `None` if the value count does not match `n_cols * n_rows`.
    pub fn new(extent: Rect, n_cols: usize, n_rows: usize, values: Vec<f64>) -> Option<Grid> {
        Grid::with_no_data(extent, n_cols, n_rows, values, None)
    }

    /// Creates a grid whose cells equal to `no_data` count as missing.
    pub fn with_no_data(
        extent: Rect,
        n_cols: usize,
        n_rows: usize,
        values: Vec<f64>,
        no_data: Option<f64>,
    ) -> Option<Grid> {
        if n_cols == 0 || n_rows == 0 || values.len() != n_cols * n_rows {
            return None;
        }
        let mut z_min = f64::INFINITY;
        let mut z_max = f64::NEG_INFINITY;
        for &v in &values {
            if no_data.map_or(true, |nd| v != nd) {
                z_min = z_min.min(v);
                z_max = z_max.max(v);
            }
        }
        Some(Grid {
            extent,
            n_cols,
            n_rows,
            values,
            no_data,
            z_min,
            z_max,
        })
    }

    /// Returns the world extent.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Returns the smallest valid cell value.
    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Returns the largest valid cell value.
    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Returns true if the grid has data and a non-degenerate extent.
    pub fn is_valid(&self) -> bool {
        !self.extent.is_degenerate() && self.z_min <= self.z_max
    }

    /// Samples the nearest cell at a world position; `None` outside the extent or on a
    /// no-data cell.
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        if !self.extent.contains(x, y) {
            return None;
        }
        let col = (((x - self.extent.x_min) / self.extent.x_range()) * self.n_cols as f64)
            .floor() as usize;
        let row = (((y - self.extent.y_min) / self.extent.y_range()) * self.n_rows as f64)
            .floor() as usize;
        let col = col.min(self.n_cols - 1);
        let row = row.min(self.n_rows - 1);
        let value = self.values[row * self.n_cols + col];
        match self.no_data {
            Some(no_data) if value == no_data => None,
            _ => Some(value),
        }
    }
}

impl Document {
    /// Draws one shape into the given page rectangle.
    ///
    /// The world extent (the shape's own bounds, or `world` if given) is aspect-fitted into
    /// `r` and every vertex is mapped through the resulting scale.  Polygon rings flagged as
    /// holes are filled with the document background color instead of `fill`.  Returns
    /// `false` for invalid shapes and for extents with zero range on either axis, so callers
    /// looping over many shapes simply skip degenerate ones.
    pub fn draw_shape(
        &mut self,
        r: Rect,
        shape: &Shape,
        style: &ShapeStyle,
        fill: Color,
        line: Color,
        line_width: f64,
        world: Option<Rect>,
    ) -> bool {
        if !self.is_ready_to_draw() || !shape.is_valid() || r.is_degenerate() {
            return false;
        }
        let world = world.unwrap_or_else(|| shape.extent());
        if world.is_degenerate() {
            return false;
        }

        let fitted = fit_rect(r, world.x_range() / world.y_range(), true);
        let world_to_page = fitted.x_range() / world.x_range();
        self.draw_shape_transformed(
            fitted,
            shape,
            (world.x_min, world.y_min),
            world_to_page,
            style,
            fill,
            line,
            line_width,
        );
        true
    }

    /// Draws a whole collection with one shared transform.
    ///
    /// The scale is computed once from the collection (or override) extent, so all members
    /// stay consistent; shapes are never fitted individually here.  The progress sink is
    /// polled once per shape and may cancel the rendering.
    pub fn draw_shapes(
        &mut self,
        r: Rect,
        shapes: &Shapes,
        style: &ShapeStyle,
        fill: Color,
        line: Color,
        line_width: f64,
        world: Option<Rect>,
    ) -> bool {
        if !self.is_ready_to_draw() || shapes.is_empty() || r.is_degenerate() {
            return false;
        }
        let world = world.unwrap_or_else(|| shapes.extent());
        if world.is_degenerate() {
            return false;
        }

        let fitted = fit_rect(r, world.x_range() / world.y_range(), true);
        let world_to_page = fitted.x_range() / world.x_range();

        for i in 0..shapes.len() {
            if !self.poll_progress(i, shapes.len()) {
                return false;
            }
            let shape = &shapes.shapes[i];
            if shape.is_valid() {
                self.draw_shape_transformed(
                    fitted,
                    shape,
                    (world.x_min, world.y_min),
                    world_to_page,
                    style,
                    fill,
                    line,
                    line_width,
                );
            }
        }
        true
    }

    /// Draws a grid as colored cells sampled at page resolution.
    ///
    /// The grid extent (or `world`) is aspect-fitted into `r`; one sample is taken per page
    /// unit and drawn as a filled unit marker colored by the normalized cell value looked up
    /// in `ramp`.  If `z_min >= z_max`, the grid's own value range is used.  No-data cells
    /// and samples outside the grid are skipped.
    pub fn draw_grid(
        &mut self,
        r: Rect,
        grid: &Grid,
        ramp: &ColorRamp,
        z_min: f64,
        z_max: f64,
        style: &ShapeStyle,
        world: Option<Rect>,
    ) -> bool {
        if !self.is_ready_to_draw() || !grid.is_valid() || grid.z_max() <= grid.z_min() {
            return false;
        }
        let world = world.unwrap_or_else(|| grid.extent());
        if world.is_degenerate() {
            return false;
        }

        let fitted = fit_rect(r, world.x_range() / world.y_range(), true);
        let step_world = world.x_range() / fitted.x_range();
        let (z_min, z_max) = if z_min >= z_max {
            (grid.z_min(), grid.z_max())
        } else {
            (z_min, z_max)
        };

        let sample_style = ShapeStyle::new(DrawMode::Fill).with_symbol(style.symbol);

        let mut y = fitted.y_min;
        let mut wy = world.y_min;
        let mut scanline = 0usize;
        let total = fitted.y_range().ceil() as usize + 1;
        while y < fitted.y_max {
            if !self.poll_progress(scanline, total) {
                return false;
            }
            let mut x = fitted.x_min;
            let mut wx = world.x_min;
            while x < fitted.x_max {
                if let Some(value) = grid.value_at(wx, wy) {
                    let t = (value - z_min) / (z_max - z_min);
                    self.draw_point(
                        x,
                        y,
                        1.0,
                        &sample_style,
                        ramp.lookup(t),
                        Color::BLACK,
                        0.0,
                    );
                }
                x += 1.0;
                wx += step_world;
            }
            y += 1.0;
            wy += step_world;
            scanline += 1;
        }
        true
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_shape_transformed(
        &mut self,
        fitted: Rect,
        shape: &Shape,
        world_min: (f64, f64),
        world_to_page: f64,
        style: &ShapeStyle,
        fill: Color,
        line: Color,
        line_width: f64,
    ) {
        let project = |&(x, y): &(f64, f64)| {
            (
                fitted.x_min + world_to_page * (x - world_min.0),
                fitted.y_min + world_to_page * (y - world_min.1),
            )
        };

        match shape {
            Shape::Point(point) => {
                let (x, y) = project(point);
                self.draw_point(x, y, line_width, style, fill, line, line_width);
            }
            Shape::MultiPoint(points) => {
                for point in points {
                    let (x, y) = project(point);
                    self.draw_point(x, y, line_width, style, fill, line, line_width);
                }
            }
            Shape::Line(parts) => {
                for part in parts {
                    let points: Vec<(f64, f64)> = part.iter().map(project).collect();
                    self.draw_line(&points, line_width, line, style);
                }
            }
            Shape::Polygon(parts) => {
                for part in parts {
                    let points: Vec<(f64, f64)> = part.points.iter().map(project).collect();
                    if part.is_hole {
                        // the hole punches through the fill: background color, same outline
                        let hole_style = ShapeStyle {
                            mode: DrawMode::FillStroke,
                            ..*style
                        };
                        self.draw_polygon(&points, &hole_style, Color::WHITE, line, line_width);
                    } else {
                        self.draw_polygon(&points, style, fill, line, line_width);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, SharedBackend};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<(f64, f64)> {
        vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
    }

    #[test]
    fn shape_extent_spans_all_parts() {
        let shape = Shape::Line(vec![
            vec![(0.0, 0.0), (10.0, 5.0)],
            vec![(-5.0, 2.0), (3.0, 20.0)],
        ]);
        assert_eq!(shape.extent(), Rect::new(-5.0, 0.0, 10.0, 20.0));
        assert!(shape.is_valid());
        assert!(!Shape::Line(vec![]).is_valid());
    }

    #[test]
    fn point_extent_is_degenerate() {
        let shape = Shape::Point((3.0, 4.0));
        assert!(shape.extent().is_degenerate());

        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();
        // no override: nothing to scale against
        assert!(!doc.draw_shape(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &shape,
            &ShapeStyle::default(),
            Color::RED,
            Color::BLACK,
            2.0,
            None,
        ));
        // an override extent makes it drawable
        assert!(doc.draw_shape(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &shape,
            &ShapeStyle::default(),
            Color::RED,
            Color::BLACK,
            2.0,
            Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
        ));
    }

    #[test]
    fn polygon_holes_render_with_background_fill() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();

        let shape = Shape::Polygon(vec![
            PolygonPart::ring(square(0.0, 0.0, 10.0, 10.0)),
            PolygonPart::hole(square(4.0, 4.0, 6.0, 6.0)),
        ]);
        assert!(doc.draw_shape(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &shape,
            &ShapeStyle::new(DrawMode::FillStroke),
            Color::GREEN,
            Color::BLACK,
            1.0,
            None,
        ));

        let backend = shared.0.borrow();
        let fills: Vec<Color> = backend
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Path { closed: true, fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![Color::GREEN, Color::WHITE]);
    }

    #[test]
    fn collection_members_share_one_transform() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();

        let mut shapes = Shapes::new();
        shapes.push(Shape::Polygon(vec![PolygonPart::ring(square(
            0.0, 0.0, 10.0, 10.0,
        ))]));
        shapes.push(Shape::Polygon(vec![PolygonPart::ring(square(
            10.0, 10.0, 20.0, 20.0,
        ))]));
        assert_eq!(shapes.extent(), Rect::new(0.0, 0.0, 20.0, 20.0));

        assert!(doc.draw_shapes(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &shapes,
            &ShapeStyle::new(DrawMode::Fill),
            Color::GREEN,
            Color::BLACK,
            0.0,
            None,
        ));

        let backend = shared.0.borrow();
        let paths: Vec<&Vec<crate::Point>> = backend
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Path { points, closed: true, .. } => Some(points),
                _ => None,
            })
            .collect();
        assert_eq!(paths.len(), 2);
        // the collection extent spans 20 world units over 100 points: scale 5, not the
        // per-shape scale of 10
        assert!((paths[0][2].x.0 - 50.0).abs() < 1e-9);
        assert!((paths[1][0].x.0 - 50.0).abs() < 1e-9);
        assert!((paths[1][2].x.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_shape_is_fitted_individually() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();

        let shape = Shape::Polygon(vec![PolygonPart::ring(square(0.0, 0.0, 10.0, 10.0))]);
        assert!(doc.draw_shape(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &shape,
            &ShapeStyle::new(DrawMode::Fill),
            Color::GREEN,
            Color::BLACK,
            0.0,
            None,
        ));
        let backend = shared.0.borrow();
        match &backend.ops[1] {
            Op::Path { points, .. } => assert!((points[2].x.0 - 100.0).abs() < 1e-9),
            op => panic!("unexpected op {:?}", op),
        }
    }

    #[test]
    fn grid_value_lookup() {
        let grid = Grid::with_no_data(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            2,
            2,
            vec![0.0, 1.0, 2.0, -9999.0],
            Some(-9999.0),
        )
        .unwrap();
        assert_eq!(grid.value_at(0.5, 0.5), Some(0.0));
        assert_eq!(grid.value_at(1.5, 0.5), Some(1.0));
        assert_eq!(grid.value_at(0.5, 1.5), Some(2.0));
        assert_eq!(grid.value_at(1.5, 1.5), None);
        assert_eq!(grid.value_at(5.0, 0.5), None);
        assert_eq!(grid.z_min(), 0.0);
        assert_eq!(grid.z_max(), 2.0);
    }

    #[test]
    fn grid_rejects_mismatched_value_count() {
        assert!(Grid::new(Rect::new(0.0, 0.0, 1.0, 1.0), 2, 2, vec![0.0]).is_none());
    }

    #[test]
    fn grid_samples_page_units_with_ramp_colors() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();

        let grid = Grid::new(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            2,
            2,
            vec![0.0, 1.0, 2.0, 3.0],
        )
        .unwrap();
        let ramp = ColorRamp::default();
        assert!(doc.draw_grid(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            &grid,
            &ramp,
            0.0,
            0.0,
            &ShapeStyle::default(),
            None,
        ));

        let backend = shared.0.borrow();
        let fills: Vec<Color> = backend
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Path { closed: true, fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        // one sample per page unit; values 0..3 normalized over the grid's own range
        assert_eq!(fills.len(), 4);
        assert_eq!(fills[0], Color::BLACK);
        assert_eq!(fills[3], Color::WHITE);
    }

    #[test]
    fn flat_grid_is_skipped() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();
        let grid = Grid::new(Rect::new(0.0, 0.0, 2.0, 2.0), 2, 2, vec![1.0; 4]).unwrap();
        assert!(!doc.draw_grid(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            &grid,
            &ColorRamp::default(),
            0.0,
            0.0,
            &ShapeStyle::default(),
            None,
        ));
    }
}
