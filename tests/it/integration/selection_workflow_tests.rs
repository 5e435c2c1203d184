//! Selection Workflow Integration Tests
//!
//! Click, ctrl-click and marquee selection driven through pointer events.

use crate::helpers::{
    assert_selection, assert_transformer_synced, click, drag, rect_shape, TestSessionBuilder,
};
use sketchboard::constants::ERASER_NODE_NAME;
use sketchboard::input::{Modifiers, PointerEvent};
use sketchboard::{Rect, SelectionMode, SessionConfig};

#[test]
fn test_marquee_intersect_selects_touching_shapes() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .with_rect(50.0, 50.0, 10.0, 10.0)
        .with_rect(200.0, 200.0, 10.0, 10.0)
        .build_with_ids();

    drag(&mut session, (-5.0, -5.0), (55.0, 55.0), Modifiers::NONE);

    assert_selection(&session, &[ids[0], ids[1]]);
    assert_transformer_synced(&session);
    assert!(session.surface().marquee().is_none());
}

#[test]
fn test_marquee_contain_mode() {
    let config = SessionConfig {
        marquee_mode: SelectionMode::Contain,
        ..SessionConfig::default()
    };
    let (mut session, ids) = TestSessionBuilder::new()
        .with_config(config)
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .with_rect(50.0, 50.0, 10.0, 10.0)
        .build_with_ids();

    drag(&mut session, (-5.0, -5.0), (55.0, 55.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_marquee_in_reverse_direction() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(10.0, 10.0, 10.0, 10.0)
        .build_with_ids();

    drag(&mut session, (100.0, 100.0), (15.0, 15.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_marquee_rect_follows_pointer() {
    let mut session = TestSessionBuilder::new().build();

    session.pointer_down(&PointerEvent::at(40.0, 40.0)).unwrap();
    assert_eq!(session.surface().marquee(), Some(Rect::new(40.0, 40.0, 0.0, 0.0)));
    session.pointer_move(&PointerEvent::at(10.0, 70.0));

    assert!(session.input_state().is_marquee_selecting());
    assert_eq!(session.surface().marquee(), Some(Rect::new(10.0, 40.0, 30.0, 30.0)));
    assert_eq!(session.input_state().marquee_rect(), session.surface().marquee());
}

#[test]
fn test_marquee_with_modifier_extends_in_scene_order() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .with_rect(50.0, 0.0, 10.0, 10.0)
        .with_rect(100.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (105.0, 5.0), Modifiers::NONE);
    drag(&mut session, (-5.0, -5.0), (55.0, 20.0), Modifiers::CTRL);

    assert_selection(&session, &[ids[2], ids[0], ids[1]]);
    assert_eq!(session.primary_selection(), Some(ids[2]));
}

#[test]
fn test_marquee_without_modifier_replaces() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .with_rect(100.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (105.0, 5.0), Modifiers::NONE);
    drag(&mut session, (-5.0, -5.0), (20.0, 20.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_empty_marquee_clears_selection() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);

    drag(&mut session, (300.0, 300.0), (400.0, 400.0), Modifiers::NONE);
    assert_selection(&session, &[]);
    assert!(session.surface().transformer_nodes().is_empty());
}

#[test]
fn test_background_click_clears_selection() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);
    click(&mut session, (500.0, 500.0), Modifiers::NONE);
    assert_selection(&session, &[]);
}

#[test]
fn test_ctrl_background_click_keeps_selection() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    click(&mut session, (500.0, 500.0), Modifiers::CTRL);
    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_click_sole_member_deselects() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);
    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    assert_selection(&session, &[]);
}

#[test]
fn test_plain_click_replaces_multi_selection() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .with_rect(50.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    session.select_all();
    click(&mut session, (55.0, 5.0), Modifiers::NONE);
    assert_selection(&session, &[ids[1]]);
}

#[test]
fn test_ctrl_click_round_trip_restores_selection() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .with_rect(50.0, 0.0, 10.0, 10.0)
        .with_rect(100.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    click(&mut session, (105.0, 5.0), Modifiers::CTRL);
    let before = session.selected_ids();

    click(&mut session, (55.0, 5.0), Modifiers::CTRL);
    assert_selection(&session, &[ids[0], ids[2], ids[1]]);
    assert_eq!(session.primary_selection(), Some(ids[1]));

    click(&mut session, (55.0, 5.0), Modifiers::CTRL);
    assert_eq!(session.selected_ids(), before);
    assert_transformer_synced(&session);
}

#[test]
fn test_click_topmost_of_overlapping_shapes() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 100.0, 100.0)
        .with_rect(50.0, 50.0, 100.0, 100.0)
        .build_with_ids();

    click(&mut session, (75.0, 75.0), Modifiers::NONE);
    assert_selection(&session, &[ids[1]]);
}

#[test]
fn test_press_and_drag_on_shape_is_not_a_click() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 100.0, 100.0)
        .build_with_ids();

    drag(&mut session, (10.0, 10.0), (60.0, 60.0), Modifiers::NONE);

    assert_selection(&session, &[]);
    assert!(session.input_state().is_idle());
    assert!(session.scene().get(ids[0]).unwrap().is_draggable());
}

#[test]
fn test_small_jitter_still_counts_as_click() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 100.0, 100.0)
        .build_with_ids();

    session.pointer_down(&PointerEvent::at(10.0, 10.0)).unwrap();
    session.pointer_move(&PointerEvent::at(11.0, 11.0));
    session.pointer_up(&PointerEvent::at(11.0, 11.0));

    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_clicks_ignored_in_drawing_mode() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    session.set_drawing_mode(true);
    click(&mut session, (5.0, 5.0), Modifiers::CTRL);

    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_menu_anchor_above_primary() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_rect(20.0, 40.0, 60.0, 30.0)
        .build_with_ids();

    assert!(session.menu_anchor().is_none());
    click(&mut session, (30.0, 50.0), Modifiers::NONE);

    let anchor = session.menu_anchor().unwrap();
    assert_eq!((anchor.x, anchor.y), (50.0, 30.0));
}

#[test]
fn test_marquee_returning_to_start_still_selects() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 10.0, 10.0)
        .build_with_ids();

    session.pointer_down(&PointerEvent::at(-2.0, -2.0)).unwrap();
    session.pointer_move(&PointerEvent::at(100.0, 100.0));
    session.pointer_move(&PointerEvent::at(0.0, 0.0));
    session.pointer_up(&PointerEvent::at(0.0, 0.0));

    assert_selection(&session, &[ids[0]]);
}

#[test]
fn test_eraser_on_top_absorbs_press() {
    let (mut session, ids) = TestSessionBuilder::new()
        .with_rect(0.0, 0.0, 100.0, 100.0)
        .with_shape(rect_shape(20.0, 20.0, 20.0, 20.0).named(ERASER_NODE_NAME))
        .build_with_ids();

    click(&mut session, (5.0, 5.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);

    session.pointer_down(&PointerEvent::at(30.0, 30.0)).unwrap();
    assert!(session.input_state().is_idle());
    assert!(session.surface().marquee().is_none());
    session.pointer_up(&PointerEvent::at(30.0, 30.0));
    assert_selection(&session, &[ids[0]]);

    drag(&mut session, (30.0, 30.0), (300.0, 300.0), Modifiers::NONE);
    assert_selection(&session, &[ids[0]]);
}
