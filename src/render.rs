// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Low-level PDF rendering backends.
//!
//! This module isolates all document, page, path, text and image primitives behind the
//! [`Backend`][] trait.  The [`PdfBackend`][] drives [`printpdf`][] for page content and
//! rewrites the serialized file with [`lopdf`][] to attach the outline (bookmark) tree, which
//! printpdf does not model.  The [`NullBackend`][] is a no-op stand-in for builds or tests that
//! must not touch a PDF library; every operation on it fails.
//!
//! The [`Document`][] controller owns exactly one backend for its whole lifetime and is the
//! only intended caller of this module.
//!
//! [`printpdf`]: https://docs.rs/printpdf/latest/printpdf
//! [`lopdf`]: https://docs.rs/lopdf/latest/lopdf
//! [`Backend`]: trait.Backend.html
//! [`PdfBackend`]: struct.PdfBackend.html
//! [`NullBackend`]: struct.NullBackend.html
//! [`Document`]: ../struct.Document.html

use std::fs;
use std::io;
use std::path::Path;

use lopdf::{dictionary, Object};

use crate::error::{Context as _, Error, ErrorKind};
use crate::fonts::Font;
use crate::layout::fit_rect;
use crate::style::{Color, DrawMode, LineCap, LineJoin};
use crate::{Point, Pt, Rect};

/// The painting parameters for one path drawing call.
#[derive(Clone, Copy, Debug)]
pub struct PathStyle {
    /// Fill/stroke selection.
    pub mode: DrawMode,
    /// Fill color, used if the mode has a fill component.
    pub fill: Color,
    /// Stroke color, used if the mode has a stroke component.
    pub line: Color,
    /// Stroke width in points.
    pub line_width: f64,
    /// Cap style for open line ends.
    pub cap: LineCap,
    /// Join style for segment corners.
    pub join: LineJoin,
}

/// One positioned, rotated run of text.
#[derive(Clone, Copy, Debug)]
pub struct TextSpan<'a> {
    /// The baseline origin on the page.
    pub pos: Point,
    /// The text to draw; must not contain line breaks.
    pub text: &'a str,
    /// The typeface.
    pub font: Font,
    /// The font size in points.
    pub size: f64,
    /// The text color.
    pub color: Color,
    /// Rotation around the baseline origin, in radians counter-clockwise.
    pub angle: f64,
}

/// A handle to an outline (bookmark) node, valid only for the backend that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutlineNode(usize);

/// The operation set the document controller needs from a PDF library.
///
/// All operations fail safely (returning `false`, `None` or an error) when no page exists yet
/// or the backing document has already been written; they never panic.
pub trait Backend {
    /// Appends a page with the given size in points and makes it the current page.
    fn add_page(&mut self, width: f64, height: f64) -> bool;

    /// Returns the number of pages added so far.
    fn page_count(&self) -> usize;

    /// Draws a path on the current page.
    ///
    /// A closed path is painted according to the style's draw mode; an open path is always
    /// stroked only.
    fn draw_path(&mut self, points: &[Point], closed: bool, style: &PathStyle) -> bool;

    /// Draws a circle on the current page.
    fn draw_circle(&mut self, center: Point, radius: Pt, style: &PathStyle) -> bool;

    /// Draws a single line of text on the current page.
    fn draw_text(&mut self, span: &TextSpan<'_>) -> bool;

    /// Measures a single line of text.
    fn text_width(&self, text: &str, font: Font, size: f64) -> Pt;

    /// Decodes the image file at `path` and embeds it into the given page rectangle,
    /// aspect-fitted and centered.
    ///
    /// Only `.png` and `.jpg` files are accepted; the format is chosen by the (case-normalized)
    /// file extension.
    fn draw_image(&mut self, rect: Rect, path: &Path) -> Result<(), Error>;

    /// Registers an outline node pointing at the given page (0-based).
    ///
    /// The node becomes a child of `parent`, or a top-level entry if `parent` is `None`.
    fn add_outline_node(
        &mut self,
        parent: Option<OutlineNode>,
        title: &str,
        page: usize,
    ) -> Option<OutlineNode>;

    /// Serializes the document to the given file, creating the parent directory if needed.
    ///
    /// Consumes the backing document; subsequent operations fail.
    fn save(&mut self, path: &Path) -> Result<(), Error>;
}

struct OutlineEntry {
    title: String,
    parent: Option<usize>,
    page: usize,
}

/// A [`Backend`][] implementation on top of printpdf and lopdf.
///
/// The printpdf document is created lazily by the first [`add_page`][] call, since a PDF
/// document cannot exist without a page.  [`save`][] consumes it again; afterwards the backend
/// behaves like the [`NullBackend`][].
///
/// [`Backend`]: trait.Backend.html
/// [`NullBackend`]: struct.NullBackend.html
/// [`add_page`]: trait.Backend.html#tymethod.add_page
/// [`save`]: trait.Backend.html#tymethod.save
pub struct PdfBackend {
    title: String,
    doc: Option<printpdf::PdfDocumentReference>,
    current: Option<(printpdf::indices::PdfPageIndex, printpdf::indices::PdfLayerIndex)>,
    pages: usize,
    fonts: Vec<(Font, printpdf::IndirectFontRef)>,
    outline: Vec<OutlineEntry>,
}

impl PdfBackend {
    /// Creates a backend for a document with the given metadata title.
    pub fn new(title: impl Into<String>) -> PdfBackend {
        PdfBackend {
            title: title.into(),
            doc: None,
            current: None,
            pages: 0,
            fonts: Vec::new(),
            outline: Vec::new(),
        }
    }

    fn layer(&self) -> Option<printpdf::PdfLayerReference> {
        let doc = self.doc.as_ref()?;
        let (page_idx, layer_idx) = self.current?;
        Some(doc.get_page(page_idx).get_layer(layer_idx))
    }

    fn font_ref(&mut self, font: Font) -> Option<printpdf::IndirectFontRef> {
        if let Some((_, font_ref)) = self.fonts.iter().find(|(f, _)| *f == font) {
            return Some(font_ref.clone());
        }
        let doc = self.doc.as_ref()?;
        let font_ref = doc.add_builtin_font(font.builtin()).ok()?;
        self.fonts.push((font, font_ref.clone()));
        Some(font_ref)
    }

    fn apply_style(layer: &printpdf::PdfLayerReference, style: &PathStyle) {
        if style.mode.has_stroke() {
            layer.set_line_cap_style(match style.cap {
                LineCap::Butt => printpdf::LineCapStyle::Butt,
                LineCap::Round => printpdf::LineCapStyle::Round,
                LineCap::Square => printpdf::LineCapStyle::ProjectingSquare,
            });
            layer.set_line_join_style(match style.join {
                LineJoin::Miter => printpdf::LineJoinStyle::Miter,
                LineJoin::Round => printpdf::LineJoinStyle::Round,
                LineJoin::Bevel => printpdf::LineJoinStyle::Limit,
            });
            layer.set_outline_color(style.line.into());
            layer.set_outline_thickness(style.line_width);
        }
        if style.mode.has_fill() {
            layer.set_fill_color(style.fill.into());
        }
    }
}

fn pdf_point(point: Point) -> printpdf::Point {
    printpdf::Point {
        x: point.x.into(),
        y: point.y.into(),
    }
}

impl Backend for PdfBackend {
    fn add_page(&mut self, width: f64, height: f64) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        // once saved, the backing document is gone for good
        if self.doc.is_none() && self.pages > 0 {
            return false;
        }
        let (width, height) = (Pt(width).into(), Pt(height).into());
        self.current = Some(match &self.doc {
            Some(doc) => doc.add_page(width, height, "Layer 1"),
            None => {
                let (doc, page_idx, layer_idx) =
                    printpdf::PdfDocument::new(&self.title, width, height, "Layer 1");
                self.doc = Some(doc);
                (page_idx, layer_idx)
            }
        });
        self.pages += 1;
        true
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn draw_path(&mut self, points: &[Point], closed: bool, style: &PathStyle) -> bool {
        let layer = match self.layer() {
            Some(layer) => layer,
            None => return false,
        };
        Self::apply_style(&layer, style);
        layer.add_shape(printpdf::Line {
            points: points.iter().map(|p| (pdf_point(*p), false)).collect(),
            is_closed: closed,
            has_fill: closed && style.mode.has_fill(),
            has_stroke: !closed || style.mode.has_stroke(),
            is_clipping_path: false,
        });
        true
    }

    fn draw_circle(&mut self, center: Point, radius: Pt, style: &PathStyle) -> bool {
        let layer = match self.layer() {
            Some(layer) => layer,
            None => return false,
        };
        Self::apply_style(&layer, style);
        layer.add_shape(printpdf::Line {
            points: printpdf::utils::calculate_points_for_circle(
                printpdf::Pt::from(radius),
                center.x.into(),
                center.y.into(),
            ),
            is_closed: true,
            has_fill: style.mode.has_fill(),
            has_stroke: style.mode.has_stroke(),
            is_clipping_path: false,
        });
        true
    }

    fn draw_text(&mut self, span: &TextSpan<'_>) -> bool {
        if span.text.is_empty() {
            return false;
        }
        let font_ref = match self.font_ref(span.font) {
            Some(font_ref) => font_ref,
            None => return false,
        };
        let layer = match self.layer() {
            Some(layer) => layer,
            None => return false,
        };
        layer.set_fill_color(span.color.into());
        layer.begin_text_section();
        layer.set_font(&font_ref, span.size as i64);
        layer.set_text_matrix(printpdf::TextMatrix::TranslateRotate(
            span.pos.x.into(),
            span.pos.y.into(),
            span.angle.to_degrees(),
        ));
        layer.write_text(span.text, &font_ref);
        layer.end_text_section();
        true
    }

    fn text_width(&self, text: &str, font: Font, size: f64) -> Pt {
        font.str_width(text, size)
    }

    fn draw_image(&mut self, rect: Rect, path: &Path) -> Result<(), Error> {
        let format = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => image::ImageFormat::Png,
            Some("jpg") => image::ImageFormat::Jpeg,
            _ => {
                return Err(Error::new(
                    format!("Unsupported image file {}", path.display()),
                    ErrorKind::UnsupportedImage,
                ))
            }
        };
        let layer = self.layer().ok_or_else(|| {
            Error::new("No page to draw the image on", ErrorKind::NoPage)
        })?;

        let decoded = {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open image file {}", path.display()))?;
            image::load(io::BufReader::new(file), format)
                .with_context(|| format!("Failed to decode image file {}", path.display()))?
        };

        use image::GenericImageView as _;
        let (px_width, px_height) = decoded.dimensions();
        if px_width == 0 || px_height == 0 {
            return Err(Error::new("Empty image", ErrorKind::InvalidData));
        }

        let fitted = fit_rect(rect, f64::from(px_width) / f64::from(px_height), true);

        // natural image size in points at the printpdf default of 300 dpi
        let natural_width = f64::from(px_width) * 72.0 / 300.0;
        let natural_height = f64::from(px_height) * 72.0 / 300.0;

        let pdf_image = printpdf::Image::from_dynamic_image(&decoded);
        pdf_image.add_to_layer(
            layer,
            Some(Pt(fitted.x_min).into()),
            Some(Pt(fitted.y_min).into()),
            None,
            Some(fitted.x_range() / natural_width),
            Some(fitted.y_range() / natural_height),
            None,
        );
        Ok(())
    }

    fn add_outline_node(
        &mut self,
        parent: Option<OutlineNode>,
        title: &str,
        page: usize,
    ) -> Option<OutlineNode> {
        if self.doc.is_none() || page >= self.pages {
            return None;
        }
        if let Some(OutlineNode(idx)) = parent {
            if idx >= self.outline.len() {
                return None;
            }
        }
        self.outline.push(OutlineEntry {
            title: title.to_owned(),
            parent: parent.map(|node| node.0),
            page,
        });
        Some(OutlineNode(self.outline.len() - 1))
    }

    fn save(&mut self, path: &Path) -> Result<(), Error> {
        let doc = self.doc.take().ok_or_else(|| {
            Error::new("Nothing to save: the document has no pages", ErrorKind::NoPage)
        })?;
        self.current = None;
        self.fonts.clear();

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).with_context(|| {
                    format!("Could not create output directory {}", dir.display())
                })?;
            }
        }

        let mut buf = Vec::new();
        doc.save(&mut io::BufWriter::new(&mut buf))
            .context("Failed to serialize the PDF document")?;

        if self.outline.is_empty() {
            fs::write(path, buf)
                .with_context(|| format!("Could not write PDF file {}", path.display()))?;
        } else {
            let mut pdf = lopdf::Document::load_mem(&buf)
                .context("Failed to reload the serialized document")?;
            attach_outline(&mut pdf, &self.outline)?;
            pdf.save(path)
                .with_context(|| format!("Could not write PDF file {}", path.display()))?;
        }
        Ok(())
    }
}

/// Builds the PDF outline object graph for the given entries and hooks it into the catalog.
fn attach_outline(pdf: &mut lopdf::Document, entries: &[OutlineEntry]) -> Result<(), Error> {
    let pages = pdf.get_pages();

    let ids: Vec<lopdf::ObjectId> = entries.iter().map(|_| pdf.new_object_id()).collect();
    let root_id = pdf.new_object_id();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    let mut top: Vec<usize> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match entry.parent {
            Some(parent) => children[parent].push(i),
            None => top.push(i),
        }
    }
    if top.is_empty() {
        return Ok(());
    }

    fn subtree_size(children: &[Vec<usize>], i: usize) -> i64 {
        children[i]
            .iter()
            .map(|&c| 1 + subtree_size(children, c))
            .sum()
    }

    for (i, entry) in entries.iter().enumerate() {
        let siblings = match entry.parent {
            Some(parent) => &children[parent],
            None => &top,
        };
        let pos = siblings.iter().position(|&s| s == i).unwrap_or(0);

        let mut dict = dictionary! {
            "Title" => Object::string_literal(entry.title.as_str()),
            "Parent" => match entry.parent {
                Some(parent) => ids[parent],
                None => root_id,
            },
        };
        if pos > 0 {
            dict.set("Prev", ids[siblings[pos - 1]]);
        }
        if pos + 1 < siblings.len() {
            dict.set("Next", ids[siblings[pos + 1]]);
        }
        if let Some(&first) = children[i].first() {
            let last = *children[i].last().unwrap();
            dict.set("First", ids[first]);
            dict.set("Last", ids[last]);
            dict.set("Count", subtree_size(&children, i));
        }
        // printpdf numbers pages from one
        if let Some(&page_id) = pages.get(&(entry.page as u32 + 1)) {
            dict.set(
                "Dest",
                vec![page_id.into(), Object::Name(b"Fit".to_vec())],
            );
        }
        pdf.objects.insert(ids[i], Object::Dictionary(dict));
    }

    let total: i64 = top.iter().map(|&i| 1 + subtree_size(&children, i)).sum();
    pdf.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => ids[top[0]],
            "Last" => ids[*top.last().unwrap()],
            "Count" => total,
        }),
    );

    let catalog_id = pdf
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .context("The serialized document has no catalog")?;
    pdf.get_object_mut(catalog_id)
        .and_then(Object::as_dict_mut)
        .context("The document catalog is not a dictionary")?
        .set("Outlines", root_id);
    Ok(())
}

/// A [`Backend`][] on which every operation fails as a harmless no-op.
///
/// This is the stand-in used when PDF output is disabled; it lets the rest of the report
/// pipeline run unchanged while producing nothing.
///
/// [`Backend`]: trait.Backend.html
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBackend;

impl Backend for NullBackend {
    fn add_page(&mut self, _width: f64, _height: f64) -> bool {
        false
    }

    fn page_count(&self) -> usize {
        0
    }

    fn draw_path(&mut self, _points: &[Point], _closed: bool, _style: &PathStyle) -> bool {
        false
    }

    fn draw_circle(&mut self, _center: Point, _radius: Pt, _style: &PathStyle) -> bool {
        false
    }

    fn draw_text(&mut self, _span: &TextSpan<'_>) -> bool {
        false
    }

    fn text_width(&self, _text: &str, _font: Font, _size: f64) -> Pt {
        Pt(0.0)
    }

    fn draw_image(&mut self, _rect: Rect, _path: &Path) -> Result<(), Error> {
        Err(Error::new("PDF output is disabled", ErrorKind::Internal))
    }

    fn add_outline_node(
        &mut self,
        _parent: Option<OutlineNode>,
        _title: &str,
        _page: usize,
    ) -> Option<OutlineNode> {
        None
    }

    fn save(&mut self, _path: &Path) -> Result<(), Error> {
        Err(Error::new("PDF output is disabled", ErrorKind::Internal))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A backend that records every operation for behavioural assertions.

    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug)]
    pub enum Op {
        Page {
            width: f64,
            height: f64,
        },
        Path {
            points: Vec<Point>,
            closed: bool,
            mode: DrawMode,
            fill: Color,
            line: Color,
        },
        Circle {
            center: Point,
            radius: Pt,
        },
        Text {
            text: String,
            x: f64,
            y: f64,
            size: f64,
            angle: f64,
        },
        Image {
            rect: Rect,
        },
        Outline {
            title: String,
            parent: Option<usize>,
            page: usize,
        },
    }

    #[derive(Debug, Default)]
    pub struct RecordingBackend {
        pub ops: Vec<Op>,
        pages: usize,
    }

    impl RecordingBackend {
        pub fn new() -> RecordingBackend {
            RecordingBackend::default()
        }

        pub fn texts(&self) -> impl Iterator<Item = &str> {
            self.ops.iter().filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
        }
    }

    impl Backend for RecordingBackend {
        fn add_page(&mut self, width: f64, height: f64) -> bool {
            self.pages += 1;
            self.ops.push(Op::Page { width, height });
            true
        }

        fn page_count(&self) -> usize {
            self.pages
        }

        fn draw_path(&mut self, points: &[Point], closed: bool, style: &PathStyle) -> bool {
            if self.pages == 0 {
                return false;
            }
            self.ops.push(Op::Path {
                points: points.to_vec(),
                closed,
                mode: style.mode,
                fill: style.fill,
                line: style.line,
            });
            true
        }

        fn draw_circle(&mut self, center: Point, radius: Pt, _style: &PathStyle) -> bool {
            if self.pages == 0 {
                return false;
            }
            self.ops.push(Op::Circle { center, radius });
            true
        }

        fn draw_text(&mut self, span: &TextSpan<'_>) -> bool {
            if self.pages == 0 {
                return false;
            }
            self.ops.push(Op::Text {
                text: span.text.to_owned(),
                x: span.pos.x.0,
                y: span.pos.y.0,
                size: span.size,
                angle: span.angle,
            });
            true
        }

        fn text_width(&self, text: &str, font: Font, size: f64) -> Pt {
            font.str_width(text, size)
        }

        fn draw_image(&mut self, rect: Rect, _path: &Path) -> Result<(), Error> {
            self.ops.push(Op::Image { rect });
            Ok(())
        }

        fn add_outline_node(
            &mut self,
            parent: Option<OutlineNode>,
            title: &str,
            page: usize,
        ) -> Option<OutlineNode> {
            self.ops.push(Op::Outline {
                title: title.to_owned(),
                parent: parent.map(|OutlineNode(idx)| idx),
                page,
            });
            let outlines = self
                .ops
                .iter()
                .filter(|op| matches!(op, Op::Outline { .. }))
                .count();
            Some(OutlineNode(outlines - 1))
        }

        fn save(&mut self, _path: &Path) -> Result<(), Error> {
            if self.pages == 0 {
                return Err(Error::new("no pages", ErrorKind::NoPage));
            }
            Ok(())
        }
    }

    /// A recording backend handle that stays inspectable after the document took ownership.
    #[derive(Clone, Debug, Default)]
    pub struct SharedBackend(pub Rc<RefCell<RecordingBackend>>);

    impl SharedBackend {
        pub fn new() -> SharedBackend {
            SharedBackend::default()
        }
    }

    impl Backend for SharedBackend {
        fn add_page(&mut self, width: f64, height: f64) -> bool {
            self.0.borrow_mut().add_page(width, height)
        }

        fn page_count(&self) -> usize {
            self.0.borrow().page_count()
        }

        fn draw_path(&mut self, points: &[Point], closed: bool, style: &PathStyle) -> bool {
            self.0.borrow_mut().draw_path(points, closed, style)
        }

        fn draw_circle(&mut self, center: Point, radius: Pt, style: &PathStyle) -> bool {
            self.0.borrow_mut().draw_circle(center, radius, style)
        }

        fn draw_text(&mut self, span: &TextSpan<'_>) -> bool {
            self.0.borrow_mut().draw_text(span)
        }

        fn text_width(&self, text: &str, font: Font, size: f64) -> Pt {
            self.0.borrow().text_width(text, font, size)
        }

        fn draw_image(&mut self, rect: Rect, path: &Path) -> Result<(), Error> {
            self.0.borrow_mut().draw_image(rect, path)
        }

        fn add_outline_node(
            &mut self,
            parent: Option<OutlineNode>,
            title: &str,
            page: usize,
        ) -> Option<OutlineNode> {
            self.0.borrow_mut().add_outline_node(parent, title, page)
        }

        fn save(&mut self, path: &Path) -> Result<(), Error> {
            self.0.borrow_mut().save(path)
        }
    }
}
