// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! The document controller.

use std::path::Path;

use crate::fonts::Font;
use crate::layout::BoxLayout;
use crate::render::{Backend, NullBackend, OutlineNode, PathStyle, PdfBackend, TextSpan};
use crate::style::{Color, HAlign, LineCap, ShapeStyle, TextStyle, VAlign};
use crate::{Orientation, PaperSize, Point, Pt, Rect, POINT_TO_METER};

/// The uniform page margin in points.
const PAGE_MARGIN: f64 = 10.0;

/// Receives progress reports and error messages from long-running render calls.
///
/// The `advance` callback doubles as a cancellation poll: returning `false` asks the engine to
/// stop drawing further content.  A cancelled document stays consistent and can still be
/// saved.
pub trait ProgressSink {
    /// Reports that `current` of `total` work units are done; returns `false` to cancel.
    fn advance(&mut self, current: usize, total: usize) -> bool {
        let _ = (current, total);
        true
    }

    /// Reports a user-visible error message.
    fn error(&mut self, message: &str) {
        log::warn!("{}", message);
    }
}

/// The default [`ProgressSink`](trait.ProgressSink.html): never cancels, logs errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// The hierarchy level of a title page and its outline entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TitleLevel {
    /// A top-level (document or chapter) title.
    Top,
    /// A section title.
    Section,
    /// A subsection title.
    Subsection,
}

impl TitleLevel {
    pub(crate) fn depth(self) -> usize {
        match self {
            TitleLevel::Top => 0,
            TitleLevel::Section => 1,
            TitleLevel::Subsection => 2,
        }
    }

    fn font_size(self) -> f64 {
        match self {
            TitleLevel::Top => 26.0,
            TitleLevel::Section => 22.0,
            TitleLevel::Subsection => 20.0,
        }
    }

    /// Top and section titles get an underline rule and a fresh body page.
    fn is_major(self) -> bool {
        self != TitleLevel::Subsection
    }
}

/// A PDF report document.
///
/// A `Document` owns one rendering backend and appends pages to it in strict order; drawing
/// always targets the most recently added page.  The layout is described once with named
/// percentage boxes (see [`layout_add_box`][]) and resolved against the page margins whenever
/// the page geometry changes.
///
/// Every draw call returns `bool` instead of a `Result`: a call made before the first page
/// exists, or with degenerate geometry, is a silent no-op returning `false`.  Report tools
/// iterate over many shapes and records and must not abort wholesale because one item cannot
/// be drawn; callers check the result only where it is semantically required.
///
/// # Example
///
/// ```no_run
/// use georeport::{Document, PaperSize, Orientation};
/// use georeport::style::{Color, ShapeStyle};
///
/// let mut doc = Document::new(PaperSize::A4, Orientation::Portrait);
/// doc.layout_add_box("MAP", 0.0, 0.0, 100.0, 75.0);
/// doc.add_page();
/// let map = doc.layout_get_box("MAP");
/// doc.draw_rectangle(map, &ShapeStyle::default(), Color::WHITE, Color::BLACK, 1.0);
/// doc.save("report.pdf");
/// ```
///
/// [`layout_add_box`]: #method.layout_add_box
pub struct Document {
    backend: Box<dyn Backend>,
    paper: Rect,
    margins: Rect,
    layout: BoxLayout,
    resolved: Vec<Rect>,
    outline_cursor: [Option<OutlineNode>; 3],
    progress: Box<dyn ProgressSink>,
}

impl Document {
    /// Creates a new document with the given page geometry and no pages.
    pub fn new(paper: PaperSize, orientation: Orientation) -> Document {
        let (width, height) = paper.dimensions(orientation);
        Document::build(Box::new(PdfBackend::new("")), width, height)
    }

    /// Creates a new document and immediately emits a top-level title page.
    ///
    /// The title is also used as the PDF metadata title.  An empty title is ignored.
    pub fn with_title(paper: PaperSize, orientation: Orientation, title: &str) -> Document {
        let (width, height) = paper.dimensions(orientation);
        let mut doc = Document::build(Box::new(PdfBackend::new(title)), width, height);
        if !title.is_empty() {
            doc.add_page_title(title, TitleLevel::Top);
        }
        doc
    }

    /// Creates a new A4 portrait document on the given backend.
    ///
    /// Pass a [`NullBackend`][] to run a report pipeline without producing output.
    ///
    /// [`NullBackend`]: render/struct.NullBackend.html
    pub fn with_backend(backend: impl Backend + 'static) -> Document {
        let (width, height) = PaperSize::A4.dimensions(Orientation::Portrait);
        Document::build(Box::new(backend), width, height)
    }

    fn build(backend: Box<dyn Backend>, width: f64, height: f64) -> Document {
        let mut doc = Document {
            backend,
            paper: Rect::default(),
            margins: Rect::default(),
            layout: BoxLayout::new(),
            resolved: Vec::new(),
            outline_cursor: [None; 3],
            progress: Box::new(NoProgress),
        };
        doc.set_page_size(width, height);
        doc
    }

    /// Replaces the progress/message sink.
    pub fn set_progress_sink(&mut self, sink: impl ProgressSink + 'static) {
        self.progress = Box::new(sink);
    }

    /// Creates a [`NullBackend`](render/struct.NullBackend.html) document.
    pub fn disabled() -> Document {
        Document::with_backend(NullBackend)
    }

    fn ready(&self) -> bool {
        self.backend.page_count() > 0
    }

    /// Returns the number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.backend.page_count()
    }

    /// Returns the full page rectangle in points.
    pub fn paper(&self) -> Rect {
        self.paper
    }

    /// Returns the page rectangle deflated by the uniform page margin.
    pub fn margins(&self) -> Rect {
        self.margins
    }

    /// Returns the conversion factor from page points to meters.
    pub fn page_to_meter(&self) -> f64 {
        POINT_TO_METER
    }

    // ----------------------------------------------------- pages

    /// Sets the page geometry used for subsequent pages and re-resolves all layout boxes.
    pub fn set_page_size(&mut self, width: f64, height: f64) -> bool {
        if width > 0.0 && height > 0.0 {
            self.paper = Rect::new(0.0, 0.0, width, height);
            self.margins = self.paper.deflated(PAGE_MARGIN, false);
            self.resolved = self.layout.resolve(self.margins);
        }
        true
    }

    /// Sets the page geometry from a paper size and orientation.
    pub fn set_paper(&mut self, paper: PaperSize, orientation: Orientation) -> bool {
        let (width, height) = paper.dimensions(orientation);
        self.set_page_size(width, height)
    }

    /// Appends a page with the current geometry and makes it the drawing target.
    pub fn add_page(&mut self) -> bool {
        self.backend.add_page(self.paper.x_range(), self.paper.y_range())
    }

    /// Appends a page with the given paper size and orientation.
    pub fn add_page_with(&mut self, paper: PaperSize, orientation: Orientation) -> bool {
        self.set_paper(paper, orientation);
        self.add_page()
    }

    /// Appends a page with an explicit size in points.
    pub fn add_page_sized(&mut self, width: f64, height: f64) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.set_page_size(width, height);
        self.add_page()
    }

    // ----------------------------------------------------- layout

    /// Registers a named percentage box; see [`BoxLayout::add_box`][].
    ///
    /// [`BoxLayout::add_box`]: layout/struct.BoxLayout.html#method.add_box
    pub fn layout_add_box(
        &mut self,
        name: &str,
        x_min_percent: f64,
        y_min_percent: f64,
        x_max_percent: f64,
        y_max_percent: f64,
    ) -> bool {
        if self
            .layout
            .add_box(name, x_min_percent, y_min_percent, x_max_percent, y_max_percent)
        {
            self.resolved = self.layout.resolve(self.margins);
            true
        } else {
            false
        }
    }

    /// Returns the resolved page rectangle of the first box registered under the given name.
    ///
    /// An unknown name yields the margin rectangle, so the result is always drawable.
    pub fn layout_get_box(&self, name: &str) -> Rect {
        self.layout
            .find(name)
            .and_then(|idx| self.resolved.get(idx).copied())
            .unwrap_or(self.margins)
    }

    /// Sets the uniform spacing deflation applied to every resolved box.
    pub fn layout_set_box_space(&mut self, amount: f64, percent: bool) {
        self.layout.set_spacing(amount, percent);
        self.resolved = self.layout.resolve(self.margins);
    }

    // ----------------------------------------------------- outline & titles

    /// Attaches an outline (bookmark) entry for the current page one level below the deepest
    /// open title level.
    ///
    /// Returns `false` if no page is open.
    pub fn add_outline_item(&mut self, title: &str) -> bool {
        if !self.ready() {
            return false;
        }
        let depth = self.open_outline_depth();
        self.register_outline(title, depth)
    }

    fn open_outline_depth(&self) -> usize {
        self.outline_cursor
            .iter()
            .rposition(Option::is_some)
            .map(|d| d + 1)
            .unwrap_or(0)
    }

    fn register_outline(&mut self, title: &str, depth: usize) -> bool {
        let parent = if depth == 0 {
            None
        } else {
            match self.outline_cursor[depth - 1] {
                Some(node) => Some(node),
                None => return false,
            }
        };
        let page = self.backend.page_count() - 1;
        match self.backend.add_outline_node(parent, title, page) {
            Some(node) => {
                if depth < self.outline_cursor.len() {
                    self.outline_cursor[depth] = Some(node);
                    for slot in self.outline_cursor[depth + 1..].iter_mut() {
                        *slot = None;
                    }
                }
                true
            }
            None => false,
        }
    }

    /// Adds a title page at the given hierarchy level, keeping the current page geometry.
    ///
    /// The title always starts on an odd page: if the running page count is even after
    /// pagination, a blank page is inserted first.  The title is drawn centered within the
    /// margins (26/22/20 pt for the three levels) and registered in the outline tree.  Top and
    /// section titles additionally get an underline rule and a fresh page for the following
    /// body content.
    pub fn add_page_title(&mut self, title: &str, level: TitleLevel) -> bool {
        if !self.add_page() {
            return false;
        }
        if self.backend.page_count() % 2 == 0 {
            self.add_page();
        }

        self.register_outline(title, level.depth());

        let margins = self.margins;
        self.draw_text(
            margins.x_center(),
            margins.y_center(),
            title,
            level.font_size(),
            &TextStyle::new().with_h_align(HAlign::Center),
            0.0,
            Color::BLACK,
        );

        if level.is_major() {
            let y = margins.y_center() - 25.0;
            self.draw_line(
                &[(margins.x_min, y), (margins.x_max, y)],
                5.0,
                Color::BLACK,
                &ShapeStyle::default().with_cap(LineCap::Round),
            );
            self.add_page();
        }
        true
    }

    /// Adds a title page with an explicit paper size and orientation for the title page and
    /// everything after it.
    pub fn add_page_title_with(
        &mut self,
        title: &str,
        level: TitleLevel,
        paper: PaperSize,
        orientation: Orientation,
    ) -> bool {
        self.set_paper(paper, orientation);
        self.add_page_title(title, level)
    }

    // ----------------------------------------------------- primitives

    /// Draws a point marker centered on `(x, y)` with the given side length or diameter.
    pub fn draw_point(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        style: &ShapeStyle,
        fill: Color,
        line: Color,
        line_width: f64,
    ) -> bool {
        if !self.ready() {
            return false;
        }
        let half = width / 2.0;
        match style.symbol {
            crate::style::PointSymbol::Square => self.draw_rectangle(
                Rect::new(x - half, y - half, x + half, y + half),
                style,
                fill,
                line,
                line_width,
            ),
            crate::style::PointSymbol::Circle => self.backend.draw_circle(
                Point::new(x, y),
                Pt(half),
                &path_style(style, fill, line, line_width),
            ),
        }
    }

    /// Strokes an open polyline through the given points.
    ///
    /// Fails without drawing if fewer than two points are given.
    pub fn draw_line(
        &mut self,
        points: &[(f64, f64)],
        width: f64,
        color: Color,
        style: &ShapeStyle,
    ) -> bool {
        if !self.ready() || points.len() < 2 {
            return false;
        }
        let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let style = PathStyle {
            mode: crate::style::DrawMode::Stroke,
            fill: Color::WHITE,
            line: color,
            line_width: width,
            cap: style.cap,
            join: style.join,
        };
        self.backend.draw_path(&points, false, &style)
    }

    /// Draws a rectangle.
    pub fn draw_rectangle(
        &mut self,
        r: Rect,
        style: &ShapeStyle,
        fill: Color,
        line: Color,
        line_width: f64,
    ) -> bool {
        self.draw_polygon(
            &[
                (r.x_min, r.y_min),
                (r.x_max, r.y_min),
                (r.x_max, r.y_max),
                (r.x_min, r.y_max),
            ],
            style,
            fill,
            line,
            line_width,
        )
    }

    /// Draws a closed polygon.
    ///
    /// Fails without drawing if fewer than three points are given.
    pub fn draw_polygon(
        &mut self,
        points: &[(f64, f64)],
        style: &ShapeStyle,
        fill: Color,
        line: Color,
        line_width: f64,
    ) -> bool {
        if !self.ready() || points.len() < 3 {
            return false;
        }
        let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        self.backend
            .draw_path(&points, true, &path_style(style, fill, line, line_width))
    }

    /// Draws text anchored at `(x, y)`.
    ///
    /// The text may span multiple lines separated by `\n`; each following line is offset
    /// downward by the font size.  The anchor interpretation is controlled by the style's
    /// alignment settings, `angle` rotates the text counter-clockwise around the anchor in
    /// radians, and underline/strikethrough rules are drawn parallel to the rotated baseline.
    pub fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        size: f64,
        style: &TextStyle,
        angle: f64,
        color: Color,
    ) -> bool {
        if !self.ready() || text.is_empty() {
            return false;
        }
        let mut drawn = false;
        let mut y = y;
        for line in text.split('\n') {
            if !line.is_empty() {
                drawn |= self.draw_text_line(x, y, line, size, style, angle, color);
            }
            y -= size;
        }
        drawn
    }

    fn draw_text_line(
        &mut self,
        x: f64,
        y: f64,
        line: &str,
        size: f64,
        style: &TextStyle,
        angle: f64,
        color: Color,
    ) -> bool {
        let width = self.backend.text_width(line, style.font, size).0;

        let ax = match style.h_align {
            HAlign::Left => x,
            HAlign::Center => x - width / 2.0,
            HAlign::Right => x - width,
        };
        let ay = match style.v_align {
            VAlign::Bottom => y,
            VAlign::Center => y - size / 2.0,
            VAlign::Top => y - size,
        };
        let (bx, by) = (ax + width, ay);

        let (sin, cos) = angle.sin_cos();
        let rotate = |px: f64, py: f64| {
            (
                x + cos * (px - x) - sin * (py - y),
                y + sin * (px - x) + cos * (py - y),
            )
        };
        let (ax, ay) = rotate(ax, ay);
        let (bx, by) = rotate(bx, by);

        let drawn = self.backend.draw_text(&TextSpan {
            pos: Point::new(ax, ay),
            text: line,
            font: style.font,
            size,
            color,
            angle,
        });

        let length = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
        if drawn && length > 0.0 {
            if style.underline {
                let dy = 0.2 * size * (ax - bx) / length;
                let dx = -0.2 * size * (ay - by) / length;
                self.draw_line(
                    &[(ax + dx, ay + dy), (bx + dx, by + dy)],
                    0.1 * size,
                    color,
                    &ShapeStyle::default(),
                );
            }
            if style.strikethrough {
                let dy = -0.4 * size * (ax - bx) / length;
                let dx = 0.4 * size * (ay - by) / length;
                self.draw_line(
                    &[(ax + dx, ay + dy), (bx + dx, by + dy)],
                    0.1 * size,
                    color,
                    &ShapeStyle::default(),
                );
            }
        }
        drawn
    }

    /// Embeds the PNG or JPEG file at `path` into the given rectangle, aspect-fitted and
    /// centered.
    ///
    /// Fails without drawing if the file does not exist, has an unsupported extension or the
    /// rectangle has no area.
    pub fn draw_image(&mut self, r: Rect, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !self.ready() || r.is_degenerate() || !path.exists() {
            return false;
        }
        match self.backend.draw_image(r, path) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("Could not embed image {}: {}", path.display(), err);
                false
            }
        }
    }

    // ----------------------------------------------------- output

    /// Writes the document to the given file, creating the parent directory if needed.
    ///
    /// Fails if no page has been added.  After a successful save the backing document is
    /// consumed; further draw calls fail safely.
    pub fn save(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !self.ready() {
            self.progress.error("Could not save PDF file.");
            return false;
        }
        match self.backend.save(path) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Saving {} failed: {}", path.display(), err);
                self.progress.error("Could not save PDF file.");
                false
            }
        }
    }

    // ----------------------------------------------------- crate internals

    pub(crate) fn text_width(&self, text: &str, font: Font, size: f64) -> f64 {
        self.backend.text_width(text, font, size).0
    }

    pub(crate) fn is_ready_to_draw(&self) -> bool {
        self.ready()
    }

    /// Reports progress to the sink; returns `false` if the host requested cancellation.
    pub(crate) fn poll_progress(&mut self, current: usize, total: usize) -> bool {
        self.progress.advance(current, total)
    }
}

pub(crate) fn path_style(
    style: &ShapeStyle,
    fill: Color,
    line: Color,
    line_width: f64,
) -> PathStyle {
    PathStyle {
        mode: style.mode,
        fill,
        line,
        line_width,
        cap: style.cap,
        join: style.join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, RecordingBackend};
    use crate::style::DrawMode;

    fn recording_doc() -> Document {
        Document::with_backend(RecordingBackend::new())
    }

    // The backend trait has no downcast; tests that need to inspect the recorded operations
    // drive the backend directly or go through the integration points below.

    #[test]
    fn draws_fail_before_first_page() {
        let mut doc = recording_doc();
        assert!(!doc.draw_line(&[(0.0, 0.0), (1.0, 1.0)], 1.0, Color::BLACK, &Default::default()));
        assert!(!doc.draw_text(1.0, 1.0, "x", 10.0, &Default::default(), 0.0, Color::BLACK));
        assert!(!doc.draw_polygon(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            &Default::default(),
            Color::WHITE,
            Color::BLACK,
            1.0,
        ));
        assert!(!doc.add_outline_item("nothing"));
        assert!(!doc.save("nowhere.pdf"));

        assert!(doc.add_page());
        assert!(doc.draw_line(&[(0.0, 0.0), (1.0, 1.0)], 1.0, Color::BLACK, &Default::default()));
    }

    #[test]
    fn too_few_points_are_rejected() {
        let mut doc = recording_doc();
        doc.add_page();
        assert!(!doc.draw_line(&[(0.0, 0.0)], 1.0, Color::BLACK, &Default::default()));
        assert!(!doc.draw_polygon(
            &[(0.0, 0.0), (1.0, 1.0)],
            &Default::default(),
            Color::WHITE,
            Color::BLACK,
            1.0,
        ));
    }

    #[test]
    fn layout_box_fallback_is_margin_rect() {
        let mut doc = recording_doc();
        doc.layout_set_box_space(0.0, false);
        doc.layout_add_box("TITLE", 0.0, 0.0, 100.0, 5.0);
        assert_eq!(doc.layout_get_box("missing"), doc.margins());
        let title = doc.layout_get_box("TITLE");
        assert!(title.y_max <= doc.margins().y_max);
        assert!((title.y_max - doc.margins().y_max).abs() < 1e-9);
    }

    #[test]
    fn boxes_follow_page_size_changes() {
        let mut doc = recording_doc();
        doc.layout_set_box_space(0.0, false);
        doc.layout_add_box("BODY", 0.0, 50.0, 100.0, 100.0);
        let before = doc.layout_get_box("BODY");
        doc.set_paper(PaperSize::A3, Orientation::Landscape);
        let after = doc.layout_get_box("BODY");
        assert!(after.x_range() > before.x_range());
        // still the lower half of the margin rect
        assert!((after.y_max - doc.margins().y_center()).abs() < 1e-9);
    }

    #[test]
    fn title_pages_land_on_odd_pages() {
        let mut doc = recording_doc();
        doc.add_page_title("Report", TitleLevel::Top);
        // title on page 1, body page appended after
        assert_eq!(doc.page_count(), 2);

        doc.add_page_title("Section", TitleLevel::Section);
        // the section title lands on page 3 and gets its own body page
        assert_eq!(doc.page_count(), 4);
    }

    #[test]
    fn subsection_titles_share_their_page() {
        let mut doc = recording_doc();
        doc.add_page();
        assert!(doc.add_page_title("Details", TitleLevel::Subsection));
        // page 2 is odd-leafed already; no body page is appended for subsections
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn outline_items_attach_below_deepest_open_level() {
        let mut backend = RecordingBackend::new();
        backend.add_page(100.0, 100.0);
        let top = backend.add_outline_node(None, "Top", 0).unwrap();
        let child = backend.add_outline_node(Some(top), "Child", 0).unwrap();
        assert_ne!(top, child);

        let mut doc = recording_doc();
        doc.add_page();
        assert!(doc.add_outline_item("becomes top-level"));
        assert!(doc.add_outline_item("becomes section"));
        assert!(doc.add_outline_item("becomes subsection"));
        assert!(doc.add_outline_item("leaf"));
        // leaves do not open a new level; a second leaf attaches to the same subsection
        assert!(doc.add_outline_item("second leaf"));
    }

    #[test]
    fn title_resets_deeper_outline_cursor() {
        let mut doc = recording_doc();
        doc.add_page_title("Part I", TitleLevel::Top);
        doc.add_page_title("Section", TitleLevel::Section);
        doc.add_page_title("Subsection", TitleLevel::Subsection);
        assert_eq!(doc.open_outline_depth(), 3);
        doc.add_page_title("Part II", TitleLevel::Top);
        // the old section/subsection chain is closed
        assert_eq!(doc.open_outline_depth(), 1);
    }

    #[test]
    fn rotated_text_anchor_stays_on_baseline_circle() {
        let mut doc = recording_doc();
        doc.add_page();
        // centered 90 degree rotation: the baseline origin must stay within text length of
        // the anchor
        assert!(doc.draw_text(
            100.0,
            100.0,
            "mark",
            10.0,
            &TextStyle::new().centered(),
            std::f64::consts::FRAC_PI_2,
            Color::BLACK,
        ));
    }

    #[test]
    fn multiline_text_steps_down_by_size() {
        let mut doc = recording_doc();
        doc.add_page();
        assert!(doc.draw_text(
            10.0,
            500.0,
            "one\ntwo\nthree",
            12.0,
            &Default::default(),
            0.0,
            Color::BLACK,
        ));
    }

    #[test]
    fn missing_image_is_a_silent_noop() {
        let mut doc = recording_doc();
        doc.add_page();
        assert!(!doc.draw_image(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            "/definitely/not/here.png"
        ));
        assert!(!doc.draw_image(Rect::new(0.0, 0.0, 0.0, 100.0), "flat.png"));
    }

    #[test]
    fn null_backend_document_fails_everything() {
        let mut doc = Document::disabled();
        assert!(!doc.add_page());
        assert!(!doc.draw_text(0.0, 0.0, "x", 10.0, &Default::default(), 0.0, Color::BLACK));
        assert!(!doc.save("out.pdf"));
    }

    #[test]
    fn point_symbols_dispatch() {
        let mut doc = recording_doc();
        doc.add_page();
        assert!(doc.draw_point(
            10.0,
            10.0,
            4.0,
            &ShapeStyle::new(DrawMode::Fill),
            Color::RED,
            Color::BLACK,
            0.0,
        ));
        assert!(doc.draw_point(
            10.0,
            10.0,
            4.0,
            &ShapeStyle::new(DrawMode::Fill).with_symbol(crate::style::PointSymbol::Circle),
            Color::RED,
            Color::BLACK,
            0.0,
        ));
    }

    #[test]
    fn recording_backend_sees_hole_colors() {
        // direct backend check for the fill color plumbing used by the hole rendering
        let mut backend = RecordingBackend::new();
        backend.add_page(10.0, 10.0);
        let style = PathStyle {
            mode: DrawMode::FillStroke,
            fill: Color::WHITE,
            line: Color::BLACK,
            line_width: 1.0,
            cap: crate::style::LineCap::Butt,
            join: crate::style::LineJoin::Miter,
        };
        backend.draw_path(
            &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            true,
            &style,
        );
        match &backend.ops[1] {
            Op::Path { fill, .. } => assert_eq!(*fill, Color::WHITE),
            op => panic!("unexpected op {:?}", op),
        }
    }
}
