//! Document conversion tests.

use crate::helpers::rect_shape;
use serde_json::json;
use sketchboard::document::{content_nodes, parse_document, shape_to_node, DocumentNode};
use sketchboard::geometry::Point;
use sketchboard::style::{LineCap, Shadow};
use sketchboard::types::FontStyle;
use sketchboard::{CanvasError, Shape, ShapeData, ShapeKind, StyleRecord};

fn document(value: serde_json::Value) -> DocumentNode {
    serde_json::from_value(value).unwrap()
}

fn round_trip(shape: &Shape) -> Shape {
    let layer = DocumentNode::layer(vec![shape_to_node(shape)]);
    let json = serde_json::to_string(&layer).unwrap();
    let parsed: DocumentNode = serde_json::from_str(&json).unwrap();
    parse_document(&parsed).unwrap().remove(0)
}

#[test]
fn test_every_variant_survives_round_trip() {
    let style = StyleRecord {
        dash: vec![4.0, 2.0],
        line_cap: LineCap::Round,
        shadow: Some(Shadow {
            blur: 3.0,
            ..Shadow::default()
        }),
        ..StyleRecord::default()
    };
    let shapes = vec![
        ShapeData::Rectangle { x: 1.0, y: 2.0, width: 3.0, height: 4.0 },
        ShapeData::Square { x: 1.0, y: 2.0, size: 8.0 },
        ShapeData::Circle { center: Point::new(5.0, 5.0), radius: 2.0 },
        ShapeData::Ellipse { center: Point::new(5.0, 5.0), radius_x: 2.0, radius_y: 1.0 },
        ShapeData::Line { points: vec![Point::new(0.0, 0.0), Point::new(8.0, 4.0)] },
        ShapeData::FreeDraw {
            points: vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(3.0, 1.0)],
        },
        ShapeData::Polygon { center: Point::new(10.0, 10.0), radius: 6.0, sides: 3 },
        ShapeData::Image {
            x: 50.0,
            y: 50.0,
            width: 30.0,
            height: 20.0,
            src: "data:image/png;base64,AAAA".to_string(),
        },
        ShapeData::Text {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
            text: "hello".to_string(),
            font_size: 24.0,
            font_style: FontStyle { bold: true, italic: false, underline: true },
        },
    ];

    for data in shapes {
        let shape = Shape::new(data, style.clone());
        let restored = round_trip(&shape);
        assert_eq!(restored.id(), shape.id());
        assert!(restored.same_content(&shape), "{:?} != {:?}", restored, shape);
    }
}

#[test]
fn test_group_round_trip_keeps_relative_children() {
    let group = Shape::new(
        ShapeData::Group {
            x: 100.0,
            y: 100.0,
            children: vec![rect_shape(0.0, 0.0, 10.0, 10.0), rect_shape(20.0, 0.0, 10.0, 10.0)],
        },
        StyleRecord::default(),
    );
    let restored = round_trip(&group);

    assert_eq!(restored.kind(), ShapeKind::Group);
    assert_eq!(restored.children().len(), 2);
    assert_eq!(restored.bounds(), group.bounds());
    assert!(restored.same_content(&group));
}

#[test]
fn test_layer_root_skips_system_nodes() {
    let root = document(json!({
        "className": "Layer",
        "attrs": {},
        "children": [
            { "className": "Circle", "attrs": { "x": 10, "y": 10, "radius": 5 } },
            { "className": "Transformer", "attrs": { "rotateEnabled": false } },
            { "className": "Rect", "attrs": { "name": "selectionRectangle", "visible": false } }
        ]
    }));
    assert_eq!(content_nodes(&root).len(), 1);
}

#[test]
fn test_single_shape_root() {
    let root = document(json!({ "className": "Ellipse", "attrs": { "radiusX": 4, "radiusY": 2 } }));
    let shapes = parse_document(&root).unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].kind(), ShapeKind::Ellipse);
}

#[test]
fn test_eraser_name_survives_import() {
    let root = document(json!({
        "className": "Layer",
        "attrs": {},
        "children": [
            { "className": "Line", "attrs": { "name": "eraser", "points": [0, 0, 5, 5] } }
        ]
    }));
    let shapes = parse_document(&root).unwrap();
    assert!(shapes[0].is_eraser());
}

#[test]
fn test_malformed_documents_are_rejected() {
    let cases = [
        json!({ "className": "Layer", "children": [{ "className": "Star", "attrs": {} }] }),
        json!({ "className": "Circle", "attrs": { "radius": -1 } }),
        json!({ "className": "Rect", "attrs": { "x": "left" } }),
        json!({ "className": "Line", "attrs": { "points": [0, 0, 5] } }),
        json!({ "className": "Rect", "attrs": { "lineCap": "pointy" } }),
        json!({ "className": "RegularPolygon", "attrs": { "sides": 2 } }),
    ];

    for case in cases {
        let root = document(case.clone());
        let err = parse_document(&root).unwrap_err();
        assert!(matches!(err, CanvasError::MalformedDocument(_)), "{case}: {err}");
    }
}

#[test]
fn test_invalid_id_gets_fresh_uuid() {
    let root = document(json!({ "className": "Rect", "attrs": { "id": "shape-7" } }));
    let shapes = parse_document(&root).unwrap();
    assert_ne!(shapes[0].id().to_string(), "shape-7");
}

#[test]
fn test_node_scale_is_folded_into_geometry() {
    let root = document(json!({ "className": "Layer", "children": [
        { "className": "Rect", "attrs": { "x": 10, "y": 20, "width": 10, "height": 10, "scaleX": 3, "scaleY": 2 } },
        { "className": "Circle", "attrs": { "x": 50, "y": 50, "radius": 5, "scaleX": 2, "scaleY": 2 } },
        { "className": "Circle", "attrs": { "x": 50, "y": 50, "radius": 5, "scaleX": 2, "scaleY": 1 } },
        { "className": "Line", "attrs": { "x": 100, "y": 100, "points": [0, 0, 10, 5], "scaleX": 2, "scaleY": 4 } }
    ] }));
    let shapes = parse_document(&root).unwrap();

    assert_eq!(shapes[0].bounds(), sketchboard::Rect::new(10.0, 20.0, 30.0, 20.0));
    assert_eq!(
        shapes[1].data,
        ShapeData::Circle { center: Point::new(50.0, 50.0), radius: 10.0 }
    );
    assert_eq!(
        shapes[2].data,
        ShapeData::Ellipse { center: Point::new(50.0, 50.0), radius_x: 10.0, radius_y: 5.0 }
    );
    assert_eq!(
        shapes[3].data,
        ShapeData::Line { points: vec![Point::new(100.0, 100.0), Point::new(120.0, 120.0)] }
    );

    // Baked geometry exports without any scale attributes
    let node = shape_to_node(&shapes[0]);
    assert_eq!(node.attrs["width"], json!(30.0));
    assert!(!node.attrs.contains_key("scaleX"));
}

#[test]
fn test_group_scale_reaches_members() {
    let root = document(json!({
        "className": "Group",
        "attrs": { "x": 10, "y": 10, "scaleX": 2, "scaleY": 2 },
        "children": [
            { "className": "Rect", "attrs": { "x": 5, "y": 0, "width": 4, "height": 3 } }
        ]
    }));
    let group = parse_document(&root).unwrap().remove(0);

    assert_eq!(group.children()[0].bounds(), sketchboard::Rect::new(10.0, 0.0, 8.0, 6.0));
    assert_eq!(group.bounds(), sketchboard::Rect::new(20.0, 10.0, 8.0, 6.0));
}

#[test]
fn test_rotated_or_mirrored_nodes_are_rejected() {
    let cases = [
        json!({ "className": "Rect", "attrs": { "width": 10, "height": 10, "rotation": 45 } }),
        json!({ "className": "Rect", "attrs": { "width": 10, "height": 10, "scaleX": -1 } }),
    ];
    for case in cases {
        let err = parse_document(&document(case.clone())).unwrap_err();
        assert!(matches!(err, CanvasError::MalformedDocument(_)), "{case}: {err}");
    }
}

#[test]
fn test_eraser_composite_operation_survives_round_trip() {
    let root = document(json!({
        "className": "Line",
        "attrs": {
            "name": "eraser",
            "points": [0, 0, 10, 10],
            "globalCompositeOperation": "destination-out"
        }
    }));
    let eraser = parse_document(&root).unwrap().remove(0);
    assert_eq!(eraser.style.composite_operation.as_deref(), Some("destination-out"));

    let node = shape_to_node(&eraser);
    assert_eq!(node.attrs["globalCompositeOperation"], json!("destination-out"));
    assert!(round_trip(&eraser).same_content(&eraser));
}
