//! Selection algebra tests.

use sketchboard::geometry::{contains, intersects, Point, Rect, SelectionMode};

fn sample_rects() -> Vec<Rect> {
    let mut rects = Vec::new();
    for x in [-20.0, 0.0, 5.0, 10.0, 40.0] {
        for y in [-5.0, 0.0, 10.0, 25.0] {
            for (w, h) in [(0.0, 0.0), (10.0, 10.0), (30.0, 5.0)] {
                rects.push(Rect::new(x, y, w, h));
            }
        }
    }
    rects
}

#[test]
fn test_intersects_symmetric_over_samples() {
    let rects = sample_rects();
    for a in &rects {
        for b in &rects {
            assert_eq!(intersects(a, b), intersects(b, a), "{a:?} / {b:?}");
        }
    }
}

#[test]
fn test_contains_reflexive_and_implies_intersects() {
    let rects = sample_rects();
    for a in &rects {
        assert!(contains(a, a));
        for b in &rects {
            if contains(a, b) {
                assert!(intersects(a, b), "{a:?} contains {b:?} but does not intersect");
            }
        }
    }
}

#[test]
fn test_zero_size_rect_inside_is_contained() {
    let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
    let point_rect = Rect::new(4.0, 4.0, 0.0, 0.0);
    assert!(contains(&outer, &point_rect));
    assert!(intersects(&outer, &point_rect));
}

#[test]
fn test_min_abs_rule_in_every_direction() {
    let anchor = Point::new(50.0, 50.0);
    for (dx, dy) in [(30.0, 20.0), (-30.0, 20.0), (30.0, -20.0), (-30.0, -20.0)] {
        let rect = Rect::from_corners(anchor, anchor.offset(dx, dy));
        assert!(rect.is_well_formed());
        assert_eq!((rect.width, rect.height), (30.0, 20.0));
        assert_eq!(rect.x, 50.0_f32.min(50.0 + dx));
        assert_eq!(rect.y, 50.0_f32.min(50.0 + dy));
    }
}

#[test]
fn test_selection_modes() {
    let marquee = Rect::new(0.0, 0.0, 50.0, 50.0);
    let partially_inside = Rect::new(40.0, 40.0, 20.0, 20.0);
    let fully_inside = Rect::new(10.0, 10.0, 5.0, 5.0);

    assert!(SelectionMode::Intersect.matches(&marquee, &partially_inside));
    assert!(!SelectionMode::Contain.matches(&marquee, &partially_inside));
    assert!(SelectionMode::Contain.matches(&marquee, &fully_inside));
    assert_eq!(SelectionMode::default(), SelectionMode::Intersect);
}
