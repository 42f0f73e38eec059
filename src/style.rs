// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Colors and drawing styles.
//!
//! A [`ShapeStyle`][] describes how paths are painted: whether they are filled, stroked or
//! both, which cap and join style strokes use, and which marker symbol point data is rendered
//! with.  A [`TextStyle`][] describes how a text anchor position is interpreted (horizontal and
//! vertical alignment) and which decorations are drawn along the baseline.  All properties are
//! orthogonal and can be combined freely.
//!
//! # Example
//!
//! ```
//! use georeport::style::{Color, DrawMode, LineCap, ShapeStyle, TextStyle};
//!
//! let outline = ShapeStyle::new(DrawMode::Stroke).with_cap(LineCap::Round);
//! let label = TextStyle::new().centered().underlined();
//! let sea = Color::from_packed(0x4060a0);
//! assert_eq!(sea.r(), 0x40);
//! ```
//!
//! [`ShapeStyle`]: struct.ShapeStyle.html
//! [`TextStyle`]: struct.TextStyle.html

use crate::fonts::Font;

/// An RGB color with channel values between 0 and 255.
///
/// Report tools conventionally pass colors around as packed `0xRRGGBB` integers; see
/// [`from_packed`](#method.from_packed) and [`packed`](#method.packed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// The red channel.
    pub r: u8,
    /// The green channel.
    pub g: u8,
    /// The blue channel.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// White, also the document background color used for polygon holes.
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// The light grey used for table header shading.
    pub const GREY_LIGHT: Color = Color::new(200, 200, 200);
    /// Red.
    pub const RED: Color = Color::new(255, 0, 0);
    /// Green.
    pub const GREEN: Color = Color::new(0, 191, 0);
    /// Blue.
    pub const BLUE: Color = Color::new(0, 0, 255);
    /// Yellow.
    pub const YELLOW: Color = Color::new(255, 255, 0);

    /// Creates a new color from the given channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` integer.
    pub const fn from_packed(rgb: u32) -> Color {
        Color {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Returns this color as a packed `0xRRGGBB` integer.
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns the red channel.
    pub const fn r(self) -> u8 {
        self.r
    }

    /// Returns the green channel.
    pub const fn g(self) -> u8 {
        self.g
    }

    /// Returns the blue channel.
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Linearly interpolates between this color and the given color.
    ///
    /// `t` is clamped to `[0, 1]`; 0 yields `self` and 1 yields `other`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.max(0.0).min(1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + t * (f64::from(b) - f64::from(a))).round() as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<u32> for Color {
    fn from(rgb: u32) -> Color {
        Color::from_packed(rgb)
    }
}

impl From<Color> for printpdf::Color {
    fn from(color: Color) -> printpdf::Color {
        printpdf::Color::Rgb(printpdf::Rgb::new(
            f64::from(color.r) / 255.0,
            f64::from(color.g) / 255.0,
            f64::from(color.b) / 255.0,
            None,
        ))
    }
}

/// An ordered sequence of color stops used to colorize grid values.
///
/// A normalized value in `[0, 1]` is mapped onto the ramp by linear interpolation between the
/// two neighboring stops.
#[derive(Clone, Debug)]
pub struct ColorRamp {
    stops: Vec<Color>,
}

impl ColorRamp {
    /// Creates a new ramp from the given stops.
    ///
    /// A ramp needs at least one stop; an empty stop list is replaced by a black-to-white
    /// greyscale ramp.
    pub fn new(stops: Vec<Color>) -> ColorRamp {
        if stops.is_empty() {
            ColorRamp::default()
        } else {
            ColorRamp { stops }
        }
    }

    /// Returns the number of stops in this ramp.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the interpolated color for a normalized value.
    ///
    /// Values outside `[0, 1]` are clamped to the first or last stop.
    pub fn lookup(&self, t: f64) -> Color {
        if self.stops.len() == 1 {
            return self.stops[0];
        }
        let t = t.max(0.0).min(1.0) * (self.stops.len() - 1) as f64;
        let i = (t.floor() as usize).min(self.stops.len() - 2);
        self.stops[i].lerp(self.stops[i + 1], t - i as f64)
    }
}

impl Default for ColorRamp {
    fn default() -> ColorRamp {
        ColorRamp {
            stops: vec![Color::BLACK, Color::WHITE],
        }
    }
}

/// Whether a closed path is filled, stroked or both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    /// Fill the path interior only.
    Fill,
    /// Stroke the path outline only.
    Stroke,
    /// Fill the interior and stroke the outline.
    FillStroke,
}

impl DrawMode {
    /// Returns true if the path interior is filled.
    pub fn has_fill(self) -> bool {
        self != DrawMode::Stroke
    }

    /// Returns true if the path outline is stroked.
    pub fn has_stroke(self) -> bool {
        self != DrawMode::Fill
    }
}

/// The shape of open line ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    /// Lines end exactly at the endpoint.
    Butt,
    /// Lines end with a semicircular cap.
    Round,
    /// Lines end with a projecting square cap.
    Square,
}

/// The shape of corners between line segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
    /// Sharp corners.
    Miter,
    /// Rounded corners.
    Round,
    /// Cut-off corners.
    Bevel,
}

/// The marker symbol used for point data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointSymbol {
    /// A square marker centered on the point.
    Square,
    /// A circular marker centered on the point.
    Circle,
}

/// Horizontal text alignment relative to the anchor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    /// The anchor is the left end of the text.
    Left,
    /// The anchor is the horizontal center of the text.
    Center,
    /// The anchor is the right end of the text.
    Right,
}

/// Vertical text alignment relative to the anchor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    /// The anchor is the text baseline.
    Bottom,
    /// The anchor is the vertical center of the text.
    Center,
    /// The anchor is the top of the text.
    Top,
}

/// The painting style for points, lines and polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeStyle {
    /// Fill/stroke selection.
    pub mode: DrawMode,
    /// Line cap for stroked paths.
    pub cap: LineCap,
    /// Line join for stroked paths.
    pub join: LineJoin,
    /// Marker symbol for point data.
    pub symbol: PointSymbol,
}

impl ShapeStyle {
    /// Creates a new style with the given draw mode and default cap/join/symbol settings.
    pub fn new(mode: DrawMode) -> ShapeStyle {
        ShapeStyle {
            mode,
            ..ShapeStyle::default()
        }
    }

    /// Sets the line cap and returns the style.
    pub fn with_cap(mut self, cap: LineCap) -> ShapeStyle {
        self.cap = cap;
        self
    }

    /// Sets the line join and returns the style.
    pub fn with_join(mut self, join: LineJoin) -> ShapeStyle {
        self.join = join;
        self
    }

    /// Sets the point marker symbol and returns the style.
    pub fn with_symbol(mut self, symbol: PointSymbol) -> ShapeStyle {
        self.symbol = symbol;
        self
    }
}

impl Default for ShapeStyle {
    fn default() -> ShapeStyle {
        ShapeStyle {
            mode: DrawMode::Stroke,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            symbol: PointSymbol::Square,
        }
    }
}

/// The alignment, typeface and decoration settings for drawn text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Horizontal alignment of the anchor.
    pub h_align: HAlign,
    /// Vertical alignment of the anchor.
    pub v_align: VAlign,
    /// Draw a rule below the baseline.
    pub underline: bool,
    /// Draw a rule through the text.
    pub strikethrough: bool,
    /// The typeface.
    pub font: Font,
}

impl TextStyle {
    /// Creates a new style: left/baseline aligned, undecorated, Helvetica.
    pub fn new() -> TextStyle {
        TextStyle::default()
    }

    /// Sets the horizontal alignment and returns the style.
    pub fn with_h_align(mut self, h_align: HAlign) -> TextStyle {
        self.h_align = h_align;
        self
    }

    /// Sets the vertical alignment and returns the style.
    pub fn with_v_align(mut self, v_align: VAlign) -> TextStyle {
        self.v_align = v_align;
        self
    }

    /// Centers the anchor on both axes and returns the style.
    pub fn centered(mut self) -> TextStyle {
        self.h_align = HAlign::Center;
        self.v_align = VAlign::Center;
        self
    }

    /// Anchors the text at its top left corner and returns the style.
    pub fn top_left(mut self) -> TextStyle {
        self.h_align = HAlign::Left;
        self.v_align = VAlign::Top;
        self
    }

    /// Enables the underline decoration and returns the style.
    pub fn underlined(mut self) -> TextStyle {
        self.underline = true;
        self
    }

    /// Enables the strikethrough decoration and returns the style.
    pub fn struck(mut self) -> TextStyle {
        self.strikethrough = true;
        self
    }

    /// Sets the typeface and returns the style.
    pub fn with_font(mut self, font: Font) -> TextStyle {
        self.font = font;
        self
    }
}

impl Default for TextStyle {
    fn default() -> TextStyle {
        TextStyle {
            h_align: HAlign::Left,
            v_align: VAlign::Bottom,
            underline: false,
            strikethrough: false,
            font: Font::Helvetica,
        }
    }
}
