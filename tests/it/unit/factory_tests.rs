//! Shape factory tests.

use sketchboard::factory::{create, create_by_name, reshape};
use sketchboard::geometry::Point;
use sketchboard::{CanvasError, Rect, ShapeData, ShapeKind, StyleRecord};

#[test]
fn test_circle_from_drag() {
    let shape = create(ShapeKind::Circle, 20.0, 20.0, 40.0, 80.0, &StyleRecord::default()).unwrap();
    match shape.data {
        ShapeData::Circle { center, radius } => {
            assert_eq!(center, Point::new(40.0, 60.0));
            assert_eq!(radius, 40.0);
        }
        other => panic!("expected circle, got {other:?}"),
    }
}

#[test]
fn test_ellipse_radii() {
    let shape = create(ShapeKind::Ellipse, 0.0, 0.0, 40.0, 20.0, &StyleRecord::default()).unwrap();
    match shape.data {
        ShapeData::Ellipse { center, radius_x, radius_y } => {
            assert_eq!(center, Point::new(20.0, 10.0));
            assert_eq!((radius_x, radius_y), (20.0, 10.0));
        }
        other => panic!("expected ellipse, got {other:?}"),
    }
}

#[test]
fn test_polygon_is_triangle_on_midpoint() {
    let shape = create_by_name("triangle", 10.0, 10.0, 20.0, 40.0, &StyleRecord::default()).unwrap();
    match shape.data {
        ShapeData::Polygon { center, radius, sides } => {
            assert_eq!(center, Point::new(20.0, 30.0));
            assert_eq!(radius, 20.0);
            assert_eq!(sides, 3);
        }
        other => panic!("expected polygon, got {other:?}"),
    }
}

#[test]
fn test_no_negative_extent_for_any_direction() {
    let style = StyleRecord::default();
    for kind in ShapeKind::all().iter().filter(|k| k.is_drawable()) {
        for (w, h) in [(25.0, 15.0), (-25.0, 15.0), (25.0, -15.0), (-25.0, -15.0)] {
            let shape = create(*kind, 100.0, 100.0, w, h, &style).unwrap();
            let bounds = shape.bounds();
            assert!(bounds.is_well_formed(), "{kind} {w}x{h}: {bounds:?}");
        }
    }
}

#[test]
fn test_unknown_tool_name() {
    let err = create_by_name("star", 0.0, 0.0, 1.0, 1.0, &StyleRecord::default()).unwrap_err();
    assert!(matches!(err, CanvasError::UnsupportedShapeType(name) if name == "star"));
}

#[test]
fn test_group_cannot_be_drawn() {
    let err = create(ShapeKind::Group, 0.0, 0.0, 1.0, 1.0, &StyleRecord::default()).unwrap_err();
    assert!(matches!(err, CanvasError::UnsupportedShapeType(_)));
}

#[test]
fn test_reshape_line_keeps_endpoints() {
    let mut shape = create(ShapeKind::Line, 50.0, 50.0, 0.0, 0.0, &StyleRecord::default()).unwrap();
    reshape(&mut shape, Point::new(50.0, 50.0), Point::new(10.0, 80.0));
    match &shape.data {
        ShapeData::Line { points } => {
            assert_eq!(points, &vec![Point::new(50.0, 50.0), Point::new(10.0, 80.0)]);
        }
        other => panic!("expected line, got {other:?}"),
    }
    assert_eq!(shape.bounds(), Rect::new(10.0, 50.0, 40.0, 30.0));
}

#[test]
fn test_text_defaults() {
    let shape = create(ShapeKind::Text, 0.0, 0.0, 120.0, 30.0, &StyleRecord::default()).unwrap();
    match shape.data {
        ShapeData::Text { text, font_size, font_style, .. } => {
            assert_eq!(text, "Text");
            assert_eq!(font_size, 16.0);
            assert_eq!(font_style.style_attr(), "normal");
        }
        other => panic!("expected text, got {other:?}"),
    }
}
