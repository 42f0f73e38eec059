// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Rulers and graticules.
//!
//! A ruler is a band along one edge of a map rectangle with labeled tick marks at "nice"
//! world-coordinate intervals.  The tick step starts one order of magnitude below the value
//! range and doubles until the rendered labels cannot overlap, so the labeling stays readable
//! at every zoom level.  A graticule composes four rulers into a map frame: the top and left
//! edges carry true world coordinates, the bottom and right edges the cumulative distance from
//! the map origin.

use crate::fonts::Font;
use crate::style::{Color, HAlign, ShapeStyle, TextStyle, VAlign};
use crate::{Document, Rect};

/// Minimum free space between two tick labels, in points.
const RULER_TEXT_SPACE: f64 = 4.0;

/// Returns the initial tick step and the label decimal count for a value range.
///
/// The step is one order of magnitude below the range.
pub(crate) fn initial_step(range: f64) -> (f64, usize) {
    let dz = 10f64.powf(range.log10().floor() - 1.0);
    let decimals = if dz >= 1.0 {
        0
    } else {
        dz.log10().abs().round() as usize
    };
    (dz, decimals)
}

/// Doubles the tick step until a label plus margin fits between two ticks.
///
/// `scale` converts world units into points.  The loop terminates for every positive step and
/// scale because the step grows geometrically against a fixed label width.
pub(crate) fn grow_step(mut dz: f64, scale: f64, label_width: f64) -> f64 {
    if dz > 0.0 && scale > 0.0 {
        while scale * dz < label_width + RULER_TEXT_SPACE {
            dz *= 2.0;
        }
    }
    dz
}

impl Document {
    /// Draws a labeled ruler into the band `r`.
    ///
    /// `horizontal` selects the band direction; `ascending` the direction of increasing
    /// values; `tick_at_top` places ticks and labels at the top (horizontal) or left
    /// (vertical) edge of the band instead of the opposite one.  Labels on vertical rulers are
    /// rotated by 90 degrees.
    pub(crate) fn draw_ruler(
        &mut self,
        r: Rect,
        z_min: f64,
        z_max: f64,
        horizontal: bool,
        ascending: bool,
        tick_at_top: bool,
    ) -> bool {
        let width = if horizontal { r.x_range() } else { r.y_range() };
        let height = if horizontal { r.y_range() } else { r.x_range() };

        if !self.is_ready_to_draw() || z_min >= z_max || width <= 0.0 || height <= 0.0 {
            return false;
        }

        let x_off = r.x_min;
        let y_off = r.y_max;
        let font_size = (0.45 * height).floor();
        let tick_len = (0.3 * height).floor();

        let z_to_dc = width / (z_max - z_min);
        let (dz, decimals) = initial_step(z_max - z_min);
        let label_width =
            self.text_width(&format!("{:.*}", decimals, z_max), Font::default(), font_size);
        let dz = grow_step(dz, z_to_dc, label_width);

        let mut z = dz * (z_min / dz).floor();
        if z < z_min {
            z += dz;
        }

        let label_style = |v_align| {
            TextStyle::new()
                .with_h_align(HAlign::Center)
                .with_v_align(v_align)
        };
        let line_style = ShapeStyle::default();

        while z <= z_max {
            let label = format!("{:.*}", decimals, z);
            let z_dc = if ascending {
                z_to_dc * (z - z_min)
            } else {
                width - z_to_dc * (z - z_min)
            };

            if horizontal {
                let z_pos = x_off + z_dc;
                if tick_at_top {
                    let t_pos = y_off;
                    self.draw_line(
                        &[(z_pos, t_pos - tick_len), (z_pos, y_off)],
                        1.0,
                        Color::BLACK,
                        &line_style,
                    );
                    self.draw_text(
                        z_pos,
                        t_pos - tick_len,
                        &label,
                        font_size,
                        &label_style(VAlign::Top),
                        0.0,
                        Color::BLACK,
                    );
                } else {
                    let t_pos = y_off - height;
                    self.draw_line(
                        &[(z_pos, t_pos + tick_len), (z_pos, t_pos)],
                        1.0,
                        Color::BLACK,
                        &line_style,
                    );
                    self.draw_text(
                        z_pos,
                        t_pos + tick_len,
                        &label,
                        font_size,
                        &label_style(VAlign::Bottom),
                        0.0,
                        Color::BLACK,
                    );
                }
            } else {
                let z_pos = y_off - z_dc;
                if tick_at_top {
                    let t_pos = x_off;
                    self.draw_line(
                        &[(t_pos + tick_len, z_pos), (t_pos, z_pos)],
                        1.0,
                        Color::BLACK,
                        &line_style,
                    );
                    self.draw_text(
                        t_pos + tick_len,
                        z_pos,
                        &label,
                        font_size,
                        &label_style(VAlign::Top),
                        std::f64::consts::FRAC_PI_2,
                        Color::BLACK,
                    );
                } else {
                    let t_pos = x_off + height;
                    self.draw_line(
                        &[(t_pos - tick_len, z_pos), (t_pos, z_pos)],
                        1.0,
                        Color::BLACK,
                        &line_style,
                    );
                    self.draw_text(
                        t_pos - tick_len,
                        z_pos,
                        &label,
                        font_size,
                        &label_style(VAlign::Bottom),
                        std::f64::consts::FRAC_PI_2,
                        Color::BLACK,
                    );
                }
            }

            z += dz;
        }

        true
    }

    /// Draws a coordinate frame around the map rectangle `r`.
    ///
    /// The frame consists of an outer rectangle `frame_size` points outside `r`, the inner
    /// map rectangle, and four rulers: the top edge is labeled with true world x coordinates
    /// and the left edge with true world y coordinates, while the bottom and right edges show
    /// the running distance from the lower left map corner.
    pub fn draw_graticule(&mut self, r: Rect, world: Rect, frame_size: f64) -> bool {
        if !self.is_ready_to_draw() {
            return false;
        }

        let frame = r.inflated(frame_size, false);
        let stroke = ShapeStyle::default();
        self.draw_rectangle(frame, &stroke, Color::WHITE, Color::BLACK, 0.0);
        self.draw_rectangle(r, &stroke, Color::WHITE, Color::BLACK, 0.0);

        self.draw_ruler(
            Rect::new(r.x_min, r.y_max, r.x_max, frame.y_max),
            world.x_min,
            world.x_max,
            true,
            true,
            false,
        );
        self.draw_ruler(
            Rect::new(r.x_min, frame.y_min, r.x_max, r.y_min),
            0.0,
            world.x_range(),
            true,
            true,
            true,
        );
        self.draw_ruler(
            Rect::new(frame.x_min, r.y_min, r.x_min, r.y_max),
            world.y_min,
            world.y_max,
            false,
            false,
            false,
        );
        self.draw_ruler(
            Rect::new(r.x_max, r.y_min, frame.x_max, r.y_max),
            0.0,
            world.y_range(),
            false,
            false,
            true,
        );

        true
    }
}
