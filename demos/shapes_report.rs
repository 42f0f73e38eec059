// SPDX-FileCopyrightText: 2020 Robin Krahl <robin.krahl@ireas.org>
// SPDX-License-Identifier: Apache-2.0 or MIT

//! A shapes report: one page per shape with a map, graticule and attribute table,
//! plus an overview map of the whole layer.
//!
//! Run with `cargo run --example shapes_report`; the output is written to
//! `shapes_report.pdf` in the current directory.

use georeport::shapes::{PolygonPart, Shape, Shapes};
use georeport::style::{Color, DrawMode, HAlign, ShapeStyle, TextStyle, VAlign};
use georeport::table::{Column, Table, Value};
use georeport::{Document, Orientation, PaperSize, TitleLevel};

fn sample_layer() -> (Shapes, Vec<Table>) {
    let mut shapes = Shapes::new();
    let mut tables = Vec::new();

    shapes.push(Shape::Polygon(vec![
        PolygonPart::ring(vec![
            (2.0, 1.0),
            (58.0, 4.0),
            (62.0, 38.0),
            (30.0, 46.0),
            (4.0, 33.0),
        ]),
        PolygonPart::hole(vec![(22.0, 18.0), (36.0, 18.0), (33.0, 29.0), (24.0, 30.0)]),
    ]));
    let mut attributes = Table::new(vec![Column::text("FIELD"), Column::text("VALUE")]);
    attributes.push_row(vec![Value::Text("NAME".into()), Value::Text("basin".into())]);
    attributes.push_row(vec![Value::Text("AREA".into()), Value::Number(1840.5)]);
    attributes.push_row(vec![
        Value::Text("SURVEYED".into()),
        Value::Date("2005-08-01".into()),
    ]);
    tables.push(attributes);

    shapes.push(Shape::Line(vec![vec![
        (0.0, 10.0),
        (20.0, 22.0),
        (45.0, 18.0),
        (64.0, 40.0),
    ]]));
    let mut attributes = Table::new(vec![Column::text("FIELD"), Column::text("VALUE")]);
    attributes.push_row(vec![Value::Text("NAME".into()), Value::Text("channel".into())]);
    attributes.push_row(vec![Value::Text("LENGTH".into()), Value::Number(78.2)]);
    tables.push(attributes);

    (shapes, tables)
}

fn main() {
    let (shapes, tables) = sample_layer();
    let world = shapes.extent();

    let mut doc = Document::with_title(PaperSize::A4, Orientation::Portrait, "Shapes Report");
    doc.layout_add_box("TITLE", 0.0, 0.0, 100.0, 5.0);
    doc.layout_add_box("SHAPE", 0.0, 5.0, 100.0, 55.0);
    doc.layout_add_box("TABLE", 0.0, 55.0, 100.0, 100.0);

    let title_box = doc.layout_get_box("TITLE");
    let shape_box = doc.layout_get_box("SHAPE");
    let table_box = doc.layout_get_box("TABLE");
    let map = shape_box.deflated(8.0, true);

    // overview map of the whole layer
    doc.add_page_title("Overview", TitleLevel::Section);
    doc.draw_shapes(
        map,
        &shapes,
        &ShapeStyle::new(DrawMode::FillStroke),
        Color::GREEN,
        Color::BLACK,
        0.0,
        Some(world),
    );
    doc.draw_graticule(map, world, 10.0);

    // one page per shape, with the layer extent kept for comparable scales
    doc.add_page_title("Shapes", TitleLevel::Section);
    for (i, shape) in shapes.iter().enumerate() {
        let name = tables[i].value(0, 1).as_string();
        doc.add_page();
        doc.add_outline_item(&name);

        doc.draw_text(
            title_box.x_center(),
            title_box.y_center(),
            &name,
            16.0,
            &TextStyle::new()
                .with_h_align(HAlign::Center)
                .with_v_align(VAlign::Center)
                .underlined(),
            0.0,
            Color::BLACK,
        );
        doc.draw_shape(
            map,
            shape,
            &ShapeStyle::new(DrawMode::FillStroke),
            Color::YELLOW,
            Color::RED,
            1.0,
            Some(world),
        );
        doc.draw_graticule(map, world, 10.0);
        doc.draw_table(table_box, &tables[i], 0.0, 1.5);
    }

    if doc.save("shapes_report.pdf") {
        println!("wrote shapes_report.pdf");
    } else {
        eprintln!("could not write shapes_report.pdf");
    }
}
