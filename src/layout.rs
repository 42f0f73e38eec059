// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Percentage-based page layout.
//!
//! Report tools describe their page layout once, as a set of named boxes in page-relative
//! percentages, and then draw into the absolute rectangles that fall out of the current page
//! geometry.  The [`BoxLayout`][] stores the percentage rectangles and a spacing setting;
//! [`BoxLayout::resolve`][] maps them into a margin rectangle.  Resolution is a pure function
//! of the registered boxes and the margin rectangle, so it can be repeated whenever the page
//! size changes without accumulating state.
//!
//! Percentages run left to right and top to bottom: the box `(0, 0, 100, 5)` is a bar across
//! the top of the page.
//!
//! [`BoxLayout`]: struct.BoxLayout.html
//! [`BoxLayout::resolve`]: struct.BoxLayout.html#method.resolve

use crate::Rect;

/// A registry of named percentage boxes.
///
/// Box names are free-form, case-sensitive and document-local.  Registering the same name
/// twice creates a second independent entry; lookups return the first match.
#[derive(Clone, Debug)]
pub struct BoxLayout {
    boxes: Vec<(String, Rect)>,
    spacing: f64,
    spacing_percent: bool,
}

impl BoxLayout {
    /// Creates an empty layout with the default spacing of 5 points.
    pub fn new() -> BoxLayout {
        BoxLayout {
            boxes: Vec::new(),
            spacing: 5.0,
            spacing_percent: false,
        }
    }

    /// Registers a named box given as percentages of the page margin rectangle.
    ///
    /// The percentages are clamped to `[0, 100]`; the call fails if they do not span a
    /// rectangle afterwards.  `y_min_percent` addresses the top edge of the box, measured from
    /// the top of the margin rectangle.
    pub fn add_box(
        &mut self,
        name: &str,
        x_min_percent: f64,
        y_min_percent: f64,
        x_max_percent: f64,
        y_max_percent: f64,
    ) -> bool {
        let clamp = |v: f64| v.max(0.0).min(100.0);
        let (x0, y0, x1, y1) = (
            clamp(x_min_percent),
            clamp(y_min_percent),
            clamp(x_max_percent),
            clamp(y_max_percent),
        );
        if x0 >= x1 || y0 >= y1 {
            return false;
        }
        self.boxes.push((
            name.to_owned(),
            Rect {
                x_min: x0,
                y_min: y0,
                x_max: x1,
                y_max: y1,
            },
        ));
        true
    }

    /// Sets the uniform inward deflation applied to every resolved box.
    ///
    /// If `percent` is set, the spacing is interpreted per axis as a percentage of the box
    /// range, otherwise as an absolute length in points.
    pub fn set_spacing(&mut self, amount: f64, percent: bool) {
        self.spacing = amount;
        self.spacing_percent = percent;
    }

    /// Returns the number of registered boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if no box has been registered.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Returns the index of the first box registered under the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.boxes.iter().position(|(id, _)| id == name)
    }

    /// Resolves every registered box against the given margin rectangle.
    ///
    /// The result has one rectangle per registered box, in registration order.  Percentage
    /// y coordinates are anchored at the top of the margin rectangle, matching the reading
    /// order of a report layout; the returned rectangles are in page coordinates (y up).  Each
    /// rectangle is deflated by the configured spacing.
    pub fn resolve(&self, margins: Rect) -> Vec<Rect> {
        self.boxes
            .iter()
            .map(|(_, pct)| {
                Rect::new(
                    margins.x_min + 0.01 * pct.x_min * margins.x_range(),
                    margins.y_max - 0.01 * pct.y_max * margins.y_range(),
                    margins.x_min + 0.01 * pct.x_max * margins.x_range(),
                    margins.y_max - 0.01 * pct.y_min * margins.y_range(),
                )
                .deflated(self.spacing, self.spacing_percent)
            })
            .collect()
    }
}

impl Default for BoxLayout {
    fn default() -> BoxLayout {
        BoxLayout::new()
    }
}

/// Fits the given rectangle to the given width-to-height ratio.
///
/// With `shrink` set, one axis is reduced so that the result fits inside `r` with the requested
/// ratio, re-centered along the reduced axis (letterboxing).  Without `shrink`, the box grows
/// around its center instead.  A degenerate rectangle or a non-positive ratio is returned
/// unchanged.
pub fn fit_rect(r: Rect, x_to_y_ratio: f64, shrink: bool) -> Rect {
    let (mut x, mut y) = (r.x_min, r.y_min);
    let (mut dx, mut dy) = (r.x_range(), r.y_range());
    if x_to_y_ratio <= 0.0 || dx <= 0.0 || dy <= 0.0 {
        return r;
    }

    if x_to_y_ratio > dx / dy {
        // relatively wider than the box
        if shrink {
            let fit = dx / x_to_y_ratio;
            y += (dy - fit) / 2.0;
            dy = fit;
        } else {
            let fit = dy * x_to_y_ratio;
            x -= (fit - dx) / 2.0;
            dx = fit;
        }
    } else if shrink {
        let fit = dy * x_to_y_ratio;
        x += (dx - fit) / 2.0;
        dx = fit;
    } else {
        let fit = dx / x_to_y_ratio;
        y -= (fit - dy) / 2.0;
        dy = fit;
    }

    Rect::with_size(x, y, dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn resolve_keeps_relative_position_across_sizes() {
        let mut layout = BoxLayout::new();
        layout.set_spacing(0.0, false);
        assert!(layout.add_box("MAP", 10.0, 20.0, 60.0, 90.0));

        for margins in &[
            Rect::new(10.0, 10.0, 585.0, 832.0),
            Rect::new(10.0, 10.0, 832.0, 585.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        ] {
            let resolved = layout.resolve(*margins)[0];
            assert!(close(
                (resolved.x_min - margins.x_min) / margins.x_range(),
                0.10
            ));
            assert!(close(
                (resolved.x_max - margins.x_min) / margins.x_range(),
                0.60
            ));
            // y percentages are measured from the top edge
            assert!(close(
                (margins.y_max - resolved.y_max) / margins.y_range(),
                0.20
            ));
            assert!(close(
                (margins.y_max - resolved.y_min) / margins.y_range(),
                0.90
            ));
        }
    }

    #[test]
    fn resolve_applies_spacing() {
        let mut layout = BoxLayout::new();
        layout.set_spacing(2.0, false);
        layout.add_box("A", 0.0, 0.0, 100.0, 100.0);
        let margins = Rect::new(0.0, 0.0, 100.0, 200.0);
        let resolved = layout.resolve(margins)[0];
        assert_eq!(resolved, Rect::new(2.0, 2.0, 98.0, 198.0));
    }

    #[test]
    fn add_box_clamps_and_rejects_empty() {
        let mut layout = BoxLayout::new();
        assert!(!layout.add_box("EMPTY", 50.0, 0.0, 50.0, 100.0));
        assert!(!layout.add_box("INVERTED", 80.0, 0.0, 20.0, 100.0));
        // spans [0,100] x [0,100] after clamping
        assert!(layout.add_box("FULL", -10.0, -10.0, 110.0, 110.0));
        layout.set_spacing(0.0, false);
        let resolved = layout.resolve(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(resolved[0], Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn duplicate_names_resolve_to_first_entry() {
        let mut layout = BoxLayout::new();
        layout.add_box("TITLE", 0.0, 0.0, 100.0, 10.0);
        layout.add_box("TITLE", 0.0, 10.0, 100.0, 20.0);
        assert_eq!(layout.find("TITLE"), Some(0));
        assert_eq!(layout.find("missing"), None);
    }

    #[test]
    fn fit_shrinks_wide_content_vertically() {
        // box 100x100, content twice as wide as tall
        let fit = fit_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 2.0, true);
        assert!((fit.x_range() / fit.y_range() - 2.0).abs() < EPS);
        assert_eq!(fit.x_range(), 100.0);
        assert_eq!(fit.y_range(), 50.0);
        assert_eq!(fit.y_min, 25.0);
    }

    #[test]
    fn fit_shrinks_tall_content_horizontally() {
        let fit = fit_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 0.5, true);
        assert!((fit.x_range() / fit.y_range() - 0.5).abs() < EPS);
        assert_eq!(fit.y_range(), 100.0);
        assert_eq!(fit.x_range(), 50.0);
        assert_eq!(fit.x_min, 25.0);
    }

    #[test]
    fn fit_grows_when_not_shrinking() {
        let fit = fit_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 2.0, false);
        assert!((fit.x_range() / fit.y_range() - 2.0).abs() < EPS);
        assert_eq!(fit.y_range(), 100.0);
        assert_eq!(fit.x_range(), 200.0);
        assert_eq!(fit.x_min, -50.0);
    }

    #[test]
    fn fit_is_idempotent_and_contained() {
        let r = Rect::new(3.0, 7.0, 113.0, 44.0);
        for &ratio in &[0.1, 0.75, 1.0, 4.0/3.0, 10.0] {
            let once = fit_rect(r, ratio, true);
            let twice = fit_rect(once, ratio, true);
            assert!((once.x_min - twice.x_min).abs() < EPS);
            assert!((once.y_min - twice.y_min).abs() < EPS);
            assert!((once.x_range() - twice.x_range()).abs() < EPS);
            assert!((once.y_range() - twice.y_range()).abs() < EPS);
            assert!((once.x_range() / once.y_range() - ratio).abs() < 1e-6);
            assert!(once.x_range() <= r.x_range() + EPS);
            assert!(once.y_range() <= r.y_range() + EPS);
        }
    }

    #[test]
    fn fit_leaves_degenerate_input_unchanged() {
        let r = Rect::new(5.0, 5.0, 5.0, 10.0);
        assert_eq!(fit_rect(r, 2.0, true), r);
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(fit_rect(r, 0.0, true), r);
    }
}
