//! Drawing Workflow Integration Tests

use crate::helpers::{assert_selection, assert_transformer_synced, drag, TestSessionBuilder};
use sketchboard::geometry::Point;
use sketchboard::input::{Modifiers, PointerEvent};
use sketchboard::{CanvasError, Rect, RenderSurface, ShapeData, ShapeKind, StyleRecord};

#[test]
fn test_draw_circle_commits_and_selects() {
    let mut session = TestSessionBuilder::new()
        .with_drawing_tool(ShapeKind::Circle)
        .build();

    drag(&mut session, (20.0, 20.0), (60.0, 100.0), Modifiers::NONE);

    assert!(session.input_state().is_idle());
    let shapes = session.scene().shapes();
    assert_eq!(shapes.len(), 1);
    match &shapes[0].data {
        ShapeData::Circle { center, radius } => {
            assert_eq!(*center, Point::new(40.0, 60.0));
            assert_eq!(*radius, 40.0);
        }
        other => panic!("expected circle, got {other:?}"),
    }
    assert!(shapes[0].is_bound());
    assert_selection(&session, &[shapes[0].id()]);
    assert_transformer_synced(&session);
}

#[test]
fn test_in_progress_shape_is_on_surface_only() {
    let mut session = TestSessionBuilder::new()
        .with_drawing_tool(ShapeKind::Rectangle)
        .build();

    session.pointer_down(&PointerEvent::at(10.0, 10.0)).unwrap();
    session.pointer_move(&PointerEvent::at(30.0, 40.0));

    let drawing = session.input_state().drawing_shape().expect("drawing").clone();
    assert!(session.scene().is_empty());
    assert!(session.surface().has_node(drawing.id()));
    assert_eq!(session.surface().client_rect(drawing.id()), Some(Rect::new(10.0, 10.0, 20.0, 30.0)));

    session.pointer_up(&PointerEvent::at(30.0, 40.0));
    assert_eq!(session.scene().len(), 1);
}

#[test]
fn test_drawing_up_and_left_is_normalized() {
    let mut session = TestSessionBuilder::new()
        .with_drawing_tool(ShapeKind::Rectangle)
        .build();

    drag(&mut session, (60.0, 100.0), (20.0, 20.0), Modifiers::NONE);

    let shape = &session.scene().shapes()[0];
    assert_eq!(shape.bounds(), Rect::new(20.0, 20.0, 40.0, 80.0));
}

#[test]
fn test_free_draw_collects_every_move() {
    let mut session = TestSessionBuilder::new()
        .with_drawing_tool(ShapeKind::FreeDraw)
        .build();

    session.pointer_down(&PointerEvent::at(0.0, 0.0)).unwrap();
    for i in 1..=5 {
        session.pointer_move(&PointerEvent::at(i as f32 * 2.0, i as f32));
    }
    session.pointer_up(&PointerEvent::at(10.0, 5.0));

    match &session.scene().shapes()[0].data {
        ShapeData::FreeDraw { points } => assert_eq!(points.len(), 6),
        other => panic!("expected free-draw, got {other:?}"),
    }
}

#[test]
fn test_new_shape_snapshots_current_style() {
    let mut session = TestSessionBuilder::new()
        .with_drawing_tool(ShapeKind::Ellipse)
        .build();
    session.set_current_style(StyleRecord {
        fill: "#00ff00".to_string(),
        ..StyleRecord::default()
    });

    drag(&mut session, (0.0, 0.0), (10.0, 10.0), Modifiers::NONE);
    session.set_current_style(StyleRecord::default());

    assert_eq!(session.scene().shapes()[0].style.fill, "#00ff00");
}

#[test]
fn test_shapes_drawn_in_drawing_mode_are_not_draggable() {
    let mut session = TestSessionBuilder::new()
        .with_rect(100.0, 100.0, 10.0, 10.0)
        .with_drawing_tool(ShapeKind::Square)
        .build();

    drag(&mut session, (0.0, 0.0), (10.0, 10.0), Modifiers::NONE);
    assert!(session.scene().shapes().iter().all(|s| !s.is_draggable()));

    session.set_drawing_mode(false);
    assert!(session.scene().shapes().iter().all(|s| s.is_draggable()));
}

#[test]
fn test_drawing_over_existing_shape_starts_new_shape() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 100.0, 100.0)
        .with_drawing_tool(ShapeKind::Rectangle)
        .build_with_ids();

    drag(&mut session, (10.0, 10.0), (50.0, 50.0), Modifiers::NONE);

    assert_eq!(session.scene().len(), 2);
    assert!(!session.selection().contains(ids[0]));
}

#[test]
fn test_image_tool_cannot_draw() {
    let mut session = TestSessionBuilder::new()
        .with_drawing_tool(ShapeKind::Image)
        .build();

    let err = session.pointer_down(&PointerEvent::at(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, CanvasError::UnsupportedShapeType(_)));
    assert!(session.input_state().is_idle());
    assert!(session.surface().node_ids().is_empty());
}

#[test]
fn test_drawing_mode_without_tool_does_nothing() {
    let mut session = TestSessionBuilder::new().build();
    session.set_drawing_mode(true);

    drag(&mut session, (0.0, 0.0), (50.0, 50.0), Modifiers::NONE);

    assert!(session.scene().is_empty());
    assert!(session.surface().marquee().is_none());
}
