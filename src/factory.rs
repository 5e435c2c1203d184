//! Shape factory - builds a shape variant from a drag rectangle.
//!
//! Every variant follows the same min/abs rule: the top-left corner is the
//! component-wise minimum of the drag points and the extent is the absolute
//! delta, so drawing right-to-left or bottom-to-top never yields a negative
//! size. Lines are the exception: they keep both drag endpoints verbatim.

use crate::constants::{DEFAULT_FONT_SIZE, DEFAULT_POLYGON_SIDES, DEFAULT_TEXT};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{Point, Rect};
use crate::style::StyleRecord;
use crate::types::{FontStyle, Shape, ShapeData, ShapeKind};
use tracing::debug;

/// Create a shape of `kind` spanning the drag from `(x0, y0)` by `(width, height)`.
///
/// `width`/`height` may be negative (dragging up or left). The style is
/// snapshotted, later edits to `style` do not affect the returned shape.
pub fn create(
    kind: ShapeKind,
    x0: f32,
    y0: f32,
    width: f32,
    height: f32,
    style: &StyleRecord,
) -> CanvasResult<Shape> {
    let start = Point::new(x0, y0);
    let end = Point::new(x0 + width, y0 + height);
    let data = geometry_for(kind, start, end)?;

    debug!(kind = %kind, x0, y0, width, height, "Created shape");
    Ok(Shape::new(data, style.clone()))
}

/// Same as [`create`] but resolves the tool name first.
pub fn create_by_name(
    name: &str,
    x0: f32,
    y0: f32,
    width: f32,
    height: f32,
    style: &StyleRecord,
) -> CanvasResult<Shape> {
    let kind: ShapeKind = name.parse()?;
    create(kind, x0, y0, width, height, style)
}

/// Update an in-progress shape for a pointer at `pos`, drag started at `ini`.
///
/// Free-draw paths grow by one point per call; every other variant is
/// recomputed from the drag rectangle.
pub fn reshape(shape: &mut Shape, ini: Point, pos: Point) {
    if let ShapeData::FreeDraw { points } = &mut shape.data {
        points.push(pos);
        return;
    }

    let text_state = match &shape.data {
        ShapeData::Text { text, font_size, font_style, .. } => {
            Some((text.clone(), *font_size, *font_style))
        }
        _ => None,
    };

    match geometry_for(shape.kind(), ini, pos) {
        Ok(mut data) => {
            // Keep edited text content while the box is being dragged out
            if let (
                Some((content, size, style)),
                ShapeData::Text { text, font_size, font_style, .. },
            ) = (text_state, &mut data)
            {
                *text = content;
                *font_size = size;
                *font_style = style;
            }
            shape.data = data;
        }
        Err(e) => debug!("Reshape skipped for {}: {}", shape.id(), e),
    }
}

fn geometry_for(kind: ShapeKind, start: Point, end: Point) -> CanvasResult<ShapeData> {
    let rect = Rect::from_corners(start, end);

    let data = match kind {
        ShapeKind::Rectangle => ShapeData::Rectangle {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        },
        ShapeKind::Square => ShapeData::Square {
            x: rect.x,
            y: rect.y,
            size: rect.width,
        },
        ShapeKind::Circle => ShapeData::Circle {
            center: rect.center(),
            radius: rect.width.max(rect.height) / 2.0,
        },
        ShapeKind::Ellipse => ShapeData::Ellipse {
            center: rect.center(),
            radius_x: rect.width / 2.0,
            radius_y: rect.height / 2.0,
        },
        ShapeKind::Line => ShapeData::Line {
            points: vec![start, end],
        },
        ShapeKind::FreeDraw => {
            let mut points = vec![start];
            if end != start {
                points.push(end);
            }
            ShapeData::FreeDraw { points }
        }
        ShapeKind::Polygon => ShapeData::Polygon {
            center: rect.center(),
            radius: rect.width.max(rect.height) / 2.0,
            sides: DEFAULT_POLYGON_SIDES,
        },
        ShapeKind::Text => ShapeData::Text {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            text: DEFAULT_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_style: FontStyle::default(),
        },
        ShapeKind::Image | ShapeKind::Group => {
            return Err(CanvasError::UnsupportedShapeType(kind.label().to_string()));
        }
    };

    Ok(data)
}
