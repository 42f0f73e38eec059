// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Attribute tables and the paginated table renderer.
//!
//! A [`Table`][] is the generic row/column dataset produced by the format tools: ordered,
//! named columns with a semantic kind, and rows of typed cell values.  The renderer draws a
//! table into a page region with a shaded header row and one bordered cell per value, breaking
//! to a fresh page (with a repeated header) whenever the region runs out of vertical space.
//! [`Document::draw_table_columns`][] additionally splits the rows into side-by-side blocks.
//!
//! # Example
//!
//! ```
//! use georeport::table::{Column, Table, Value};
//!
//! let mut table = Table::new(vec![Column::text("NAME"), Column::number("AREA")]);
//! table.push_row(vec![Value::Text("Lake".into()), Value::Number(431.5)]);
//! assert_eq!(table.row_count(), 1);
//! ```
//!
//! [`Table`]: struct.Table.html
//! [`Document::draw_table_columns`]: ../struct.Document.html#method.draw_table_columns

use crate::style::{Color, DrawMode, ShapeStyle, TextStyle};
use crate::{Document, Rect};

/// The gap between the blocks of a multi-column table rendering, in points.
const COLUMN_GAP: f64 = 4.0;

/// The semantic kind of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Free-form text.
    Text,
    /// Numeric values.
    Number,
    /// Calendar dates, carried as preformatted text.
    Date,
}

/// A named, typed table column.
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    kind: ColumnKind,
}

impl Column {
    /// Creates a column with the given name and kind.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Column {
        Column {
            name: name.into(),
            kind,
        }
    }

    /// Creates a text column.
    pub fn text(name: impl Into<String>) -> Column {
        Column::new(name, ColumnKind::Text)
    }

    /// Creates a numeric column.
    pub fn number(name: impl Into<String>) -> Column {
        Column::new(name, ColumnKind::Number)
    }

    /// Creates a date column.
    pub fn date(name: impl Into<String>) -> Column {
        Column::new(name, ColumnKind::Date)
    }

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }
}

/// One table cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A text value.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A date value, preformatted by the producer.
    Date(String),
    /// No value.
    Null,
}

impl Value {
    /// Returns the cell content as display text.
    pub fn as_string(&self) -> String {
        match self {
            Value::Text(s) | Value::Date(s) => s.clone(),
            Value::Number(n) => format!("{}", n),
            Value::Null => String::new(),
        }
    }

    /// Returns the cell content as a number, if it is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// An ordered set of named columns and typed rows, consumed read-only by the renderer.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the given columns.
    pub fn new(columns: Vec<Column>) -> Table {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row; fails if the cell count does not match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> bool {
        if row.len() == self.columns.len() && !self.columns.is_empty() {
            self.rows.push(row);
            true
        } else {
            false
        }
    }

    /// Returns the columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the value at the given row and column.
    pub fn value(&self, row: usize, column: usize) -> &Value {
        &self.rows[row][column]
    }

    /// A table is renderable once it has at least one column.
    pub fn is_valid(&self) -> bool {
        !self.columns.is_empty()
    }
}

impl Document {
    /// Renders the table into the given region.
    ///
    /// The row height is `cell_height` if positive, otherwise the region height divided over
    /// all rows plus a header share of `header_height_factor` (clamped to at least 1).  The
    /// header row is shaded and repeated at the top of every page; when the row cursor passes
    /// one row height below the region bottom, a new page is requested and rendering
    /// continues there.  Cell text is set at 75 % of the row height, left/top aligned.
    ///
    /// Returns `false` if no page is open, the table is empty, or the host cancelled the
    /// rendering at a page break.
    pub fn draw_table(
        &mut self,
        r: Rect,
        table: &Table,
        cell_height: f64,
        header_height_factor: f64,
    ) -> bool {
        if !self.is_ready_to_draw() || !table.is_valid() {
            return false;
        }
        self.draw_table_block(r, table, 0, table.row_count(), cell_height, header_height_factor)
    }

    /// Renders the table split into `n_columns` side-by-side blocks.
    ///
    /// The rows are divided into `row_count / n_columns` rows per block by integer division;
    /// remainder rows beyond the last full block are not rendered, mirroring the behaviour of
    /// the report tools this renderer was built for.  Each block renders (and paginates)
    /// independently, separated by a fixed gap.
    pub fn draw_table_columns(
        &mut self,
        r: Rect,
        table: &Table,
        n_columns: usize,
        cell_height: f64,
        header_height_factor: f64,
    ) -> bool {
        if n_columns <= 1 {
            return self.draw_table(r, table, cell_height, header_height_factor);
        }
        if !self.is_ready_to_draw() || !table.is_valid() {
            return false;
        }

        let widened = r.inflated_xy(COLUMN_GAP, 0.0);
        let dx = widened.x_range() / n_columns as f64;
        let rows_per_block = table.row_count() / n_columns;

        let mut first_row = 0;
        for i in 0..n_columns {
            let block = Rect::new(
                widened.x_min + i as f64 * dx + COLUMN_GAP,
                r.y_min,
                widened.x_min + (i + 1) as f64 * dx - COLUMN_GAP,
                r.y_max,
            );
            self.draw_table_block(
                block,
                table,
                first_row,
                rows_per_block,
                cell_height,
                header_height_factor,
            );
            first_row += rows_per_block;
        }
        true
    }

    fn draw_table_block(
        &mut self,
        r: Rect,
        table: &Table,
        first_row: usize,
        n_rows: usize,
        cell_height: f64,
        header_height_factor: f64,
    ) -> bool {
        if first_row >= table.row_count() {
            return false;
        }

        let dx = r.x_range() / table.column_count() as f64;
        let header_height_factor = header_height_factor.max(1.0);
        let dy = if cell_height > 0.0 {
            cell_height
        } else {
            r.y_range() / (n_rows as f64 + header_height_factor)
        };
        let dy_header = dy * header_height_factor;

        let font_size = (0.75 * dy).floor();
        let font_size_header = (0.75 * dy_header).floor();
        let y_inset = 0.1 * dy;
        let y_inset_header = 0.1 * dy_header;
        let x_inset = y_inset;

        let last_row = (first_row + n_rows).min(table.row_count());

        let cell_text = TextStyle::new().top_left();
        let header_fill = ShapeStyle::new(DrawMode::FillStroke);
        let cell_border = ShapeStyle::new(DrawMode::Stroke);

        let mut y = r.y_max;
        let mut add_header = true;
        for row in first_row..last_row {
            if y < r.y_min - dy {
                if !self.poll_progress(row, table.row_count()) {
                    return false;
                }
                self.add_page();
                y = r.y_max;
                add_header = true;
            }

            if add_header {
                let mut x = r.x_min;
                for column in table.columns() {
                    self.draw_rectangle(
                        Rect::new(x, y - dy_header, x + dx, y),
                        &header_fill,
                        Color::GREY_LIGHT,
                        Color::BLACK,
                        0.0,
                    );
                    self.draw_text(
                        x + x_inset,
                        y - y_inset_header,
                        column.name(),
                        font_size_header,
                        &cell_text,
                        0.0,
                        Color::BLACK,
                    );
                    x += dx;
                }
                y -= dy_header;
                add_header = false;
            }

            let mut x = r.x_min;
            for column in 0..table.column_count() {
                self.draw_rectangle(
                    Rect::new(x, y - dy, x + dx, y),
                    &cell_border,
                    Color::WHITE,
                    Color::BLACK,
                    0.0,
                );
                self.draw_text(
                    x + x_inset,
                    y - y_inset,
                    &table.value(row, column).as_string(),
                    font_size,
                    &cell_text,
                    0.0,
                    Color::BLACK,
                );
                x += dx;
            }
            y -= dy;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Op, SharedBackend};
    use crate::ProgressSink;

    fn id_table(rows: usize) -> Table {
        let mut table = Table::new(vec![Column::text("id")]);
        for i in 0..rows {
            table.push_row(vec![Value::Text(format!("r{}", i))]);
        }
        table
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::Number(2.5).as_string(), "2.5");
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Text("x".into()).as_number(), None);
        assert_eq!(Value::Null.as_string(), "");
        assert_eq!(Value::Date("2005-08-01".into()).as_string(), "2005-08-01");
    }

    #[test]
    fn push_row_checks_arity() {
        let mut table = Table::new(vec![Column::text("a"), Column::number("b")]);
        assert!(!table.push_row(vec![Value::Null]));
        assert!(table.push_row(vec![Value::Null, Value::Number(1.0)]));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn every_row_rendered_once_with_header_per_page() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();

        let table = id_table(10);
        // fixed 30 point rows in a 100 point region: four rows fit per page before the
        // cursor passes one row height below the bottom edge
        assert!(doc.draw_table(Rect::new(0.0, 0.0, 200.0, 100.0), &table, 30.0, 1.0));

        let backend = shared.0.borrow();
        let texts: Vec<&str> = backend.texts().collect();
        let headers = texts.iter().filter(|t| **t == "id").count();
        let pages = backend
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Page { .. }))
            .count();
        assert_eq!(pages, 3);
        assert_eq!(headers, 3);
        for i in 0..10 {
            let label = format!("r{}", i);
            assert_eq!(
                texts.iter().filter(|t| **t == label).count(),
                1,
                "row {} drawn exactly once",
                i
            );
        }
    }

    #[test]
    fn rows_without_explicit_height_share_the_region() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();
        let table = id_table(5);
        assert!(doc.draw_table(Rect::new(0.0, 0.0, 200.0, 130.0), &table, 0.0, 1.5));
        let backend = shared.0.borrow();
        // everything fits on one page: 5 rows * 20pt + 30pt header
        let pages = backend
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Page { .. }))
            .count();
        assert_eq!(pages, 1);
        assert_eq!(backend.texts().count(), 6);
    }

    #[test]
    fn multi_column_split_truncates_the_remainder() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();
        let table = id_table(10);
        assert!(doc.draw_table_columns(
            Rect::new(0.0, 0.0, 300.0, 500.0),
            &table,
            3,
            0.0,
            1.5
        ));
        let backend = shared.0.borrow();
        let texts: Vec<&str> = backend.texts().collect();
        // 10 / 3 = 3 rows per block; r9 falls into the dropped remainder
        for i in 0..9 {
            let label = format!("r{}", i);
            assert_eq!(texts.iter().filter(|t| **t == label).count(), 1);
        }
        assert!(!texts.contains(&"r9"));
        assert_eq!(texts.iter().filter(|t| **t == "id").count(), 3);
    }

    #[test]
    fn single_column_count_falls_back_to_plain_table() {
        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.add_page();
        let table = id_table(2);
        assert!(doc.draw_table_columns(
            Rect::new(0.0, 0.0, 300.0, 500.0),
            &table,
            1,
            0.0,
            1.5
        ));
        let backend = shared.0.borrow();
        assert_eq!(backend.texts().count(), 3);
    }

    #[test]
    fn empty_table_is_rejected() {
        let mut doc = Document::with_backend(SharedBackend::new());
        doc.add_page();
        let table = id_table(0);
        assert!(!doc.draw_table(Rect::new(0.0, 0.0, 100.0, 100.0), &table, 0.0, 1.5));
        let no_columns = Table::default();
        assert!(!doc.draw_table(Rect::new(0.0, 0.0, 100.0, 100.0), &no_columns, 0.0, 1.5));
    }

    #[test]
    fn cancellation_stops_at_the_page_break() {
        struct CancelAtFirstPoll;
        impl ProgressSink for CancelAtFirstPoll {
            fn advance(&mut self, _current: usize, _total: usize) -> bool {
                false
            }
        }

        let shared = SharedBackend::new();
        let mut doc = Document::with_backend(shared.clone());
        doc.set_progress_sink(CancelAtFirstPoll);
        doc.add_page();
        let table = id_table(10);
        assert!(!doc.draw_table(Rect::new(0.0, 0.0, 200.0, 100.0), &table, 30.0, 1.0));

        let backend = shared.0.borrow();
        // rendering stopped before the second page was added
        let pages = backend
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Page { .. }))
            .count();
        assert_eq!(pages, 1);
        // the document stays saveable
        drop(backend);
        drop(doc);
    }
}
