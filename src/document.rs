//! Portable node-tree documents.
//!
//! The persisted format is the node tree written by the rendering engine:
//! `{ "attrs": { ... }, "className": "Rect", "children": [ ... ] }`. Shape
//! variants that share an engine class (rectangle and square, line and
//! free-draw) are told apart by a custom `shapeType` attribute.

use crate::constants::{DEFAULT_FONT_SIZE, MARQUEE_NODE_NAME, TRANSFORMER_CLASS};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::Point;
use crate::style::{LineCap, LineJoin, Shadow, StyleRecord};
use crate::types::{FontStyle, Shape, ShapeData, ShapeId, ShapeKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

pub const LAYER_CLASS: &str = "Layer";
pub const STAGE_CLASS: &str = "Stage";

/// One node of a serialized scene tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    #[serde(default)]
    pub attrs: Map<String, Value>,
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            attrs: Map::new(),
            class_name: class_name.into(),
            children: Vec::new(),
        }
    }

    pub fn layer(children: Vec<DocumentNode>) -> Self {
        Self {
            children,
            ..Self::new(LAYER_CLASS)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.get("name").and_then(Value::as_str)
    }

    /// Transform widget and marquee nodes are never part of the scene
    pub fn is_system_node(&self) -> bool {
        self.class_name == TRANSFORMER_CLASS || self.name() == Some(MARQUEE_NODE_NAME)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.attrs.insert(key.to_string(), value);
    }
}

// ============================================================================
// Export
// ============================================================================

/// Serialize one shape (and its group members).
pub fn shape_to_node(shape: &Shape) -> DocumentNode {
    let class = match shape.kind() {
        ShapeKind::Rectangle | ShapeKind::Square => "Rect",
        ShapeKind::Circle => "Circle",
        ShapeKind::Ellipse => "Ellipse",
        ShapeKind::Line | ShapeKind::FreeDraw => "Line",
        ShapeKind::Polygon => "RegularPolygon",
        ShapeKind::Image => "Image",
        ShapeKind::Text => "Text",
        ShapeKind::Group => "Group",
    };
    let mut node = DocumentNode::new(class);

    node.set("id", json!(shape.id().to_string()));
    if let Some(name) = &shape.name {
        node.set("name", json!(name));
    }
    node.set("shapeType", json!(shape.kind().label()));
    node.set("draggable", json!(shape.is_draggable()));

    match &shape.data {
        ShapeData::Rectangle { x, y, width, height } => {
            node.set("x", json!(x));
            node.set("y", json!(y));
            node.set("width", json!(width));
            node.set("height", json!(height));
        }
        ShapeData::Square { x, y, size } => {
            node.set("x", json!(x));
            node.set("y", json!(y));
            node.set("width", json!(size));
            node.set("height", json!(size));
        }
        ShapeData::Circle { center, radius } => {
            node.set("x", json!(center.x));
            node.set("y", json!(center.y));
            node.set("radius", json!(radius));
        }
        ShapeData::Ellipse { center, radius_x, radius_y } => {
            node.set("x", json!(center.x));
            node.set("y", json!(center.y));
            node.set("radiusX", json!(radius_x));
            node.set("radiusY", json!(radius_y));
        }
        ShapeData::Line { points } | ShapeData::FreeDraw { points } => {
            let flat: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
            node.set("points", json!(flat));
        }
        ShapeData::Polygon { center, radius, sides } => {
            node.set("x", json!(center.x));
            node.set("y", json!(center.y));
            node.set("radius", json!(radius));
            node.set("sides", json!(sides));
        }
        ShapeData::Image { x, y, width, height, src } => {
            node.set("x", json!(x));
            node.set("y", json!(y));
            node.set("width", json!(width));
            node.set("height", json!(height));
            node.set("src", json!(src));
        }
        ShapeData::Text { x, y, width, height, text, font_size, font_style } => {
            node.set("x", json!(x));
            node.set("y", json!(y));
            node.set("width", json!(width));
            node.set("height", json!(height));
            node.set("text", json!(text));
            node.set("fontSize", json!(font_size));
            node.set("fontStyle", json!(font_style.style_attr()));
            if font_style.underline {
                node.set("textDecoration", json!("underline"));
            }
        }
        ShapeData::Group { x, y, children } => {
            node.set("x", json!(x));
            node.set("y", json!(y));
            node.children = children.iter().map(shape_to_node).collect();
        }
    }

    write_style(&mut node, &shape.style);
    node
}

fn write_style(node: &mut DocumentNode, style: &StyleRecord) {
    node.set("fill", json!(style.fill));
    node.set("stroke", json!(style.stroke));
    node.set("strokeWidth", json!(style.stroke_width));
    if !style.dash.is_empty() {
        node.set("dash", json!(style.dash));
    }
    node.set("lineCap", json!(style.line_cap.as_str()));
    node.set("lineJoin", json!(style.line_join.as_str()));
    node.set("opacity", json!(style.opacity));
    if let Some(shadow) = &style.shadow {
        node.set("shadowColor", json!(shadow.color));
        node.set("shadowBlur", json!(shadow.blur));
        node.set("shadowOffsetX", json!(shadow.offset_x));
        node.set("shadowOffsetY", json!(shadow.offset_y));
        node.set("shadowOpacity", json!(shadow.opacity));
    }
    if let Some(op) = &style.composite_operation {
        node.set("globalCompositeOperation", json!(op));
    }
}

// ============================================================================
// Import
// ============================================================================

/// Top-level shape nodes of a document.
///
/// A `Stage` root contributes the children of its layers, a `Layer` root its
/// own children, anything else is a single shape. System nodes are skipped.
pub fn content_nodes(root: &DocumentNode) -> Vec<&DocumentNode> {
    let candidates: Vec<&DocumentNode> = match root.class_name.as_str() {
        STAGE_CLASS => root
            .children
            .iter()
            .flat_map(|child| {
                if child.class_name == LAYER_CLASS {
                    child.children.iter().collect::<Vec<_>>()
                } else {
                    vec![child]
                }
            })
            .collect(),
        LAYER_CLASS => root.children.iter().collect(),
        _ => vec![root],
    };

    candidates
        .into_iter()
        .filter(|node| !node.is_system_node())
        .collect()
}

/// Convert a whole document into unbound shapes, failing on the first bad node.
pub fn parse_document(root: &DocumentNode) -> CanvasResult<Vec<Shape>> {
    let mut seen = HashSet::new();
    content_nodes(root)
        .into_iter()
        .map(|node| node_to_shape(node, &mut seen))
        .collect()
}

/// Convert one node into an unbound shape.
///
/// The node's `id` is kept when it is a UUID not already in `seen`; anything
/// else gets a fresh identifier.
pub fn node_to_shape(node: &DocumentNode, seen: &mut HashSet<ShapeId>) -> CanvasResult<Shape> {
    let attrs = &node.attrs;
    let shape_type = attrs.get("shapeType").and_then(Value::as_str);

    let data = match node.class_name.as_str() {
        "Rect" => {
            let (x, y) = (number(attrs, "x", 0.0)?, number(attrs, "y", 0.0)?);
            let width = number(attrs, "width", 0.0)?;
            let height = number(attrs, "height", 0.0)?;
            if shape_type == Some("square") {
                ShapeData::Square { x, y, size: width }
            } else {
                ShapeData::Rectangle { x, y, width, height }
            }
        }
        "Circle" => ShapeData::Circle {
            center: position(attrs)?,
            radius: number(attrs, "radius", 0.0)?,
        },
        "Ellipse" => ShapeData::Ellipse {
            center: position(attrs)?,
            radius_x: number(attrs, "radiusX", 0.0)?,
            radius_y: number(attrs, "radiusY", 0.0)?,
        },
        "Line" => {
            let points = points(attrs)?;
            if shape_type == Some("free-draw") {
                ShapeData::FreeDraw { points }
            } else {
                ShapeData::Line { points }
            }
        }
        "RegularPolygon" => {
            let sides = number(attrs, "sides", 3.0)?;
            if sides < 3.0 {
                return Err(malformed(node, "a polygon needs at least 3 sides"));
            }
            ShapeData::Polygon {
                center: position(attrs)?,
                radius: number(attrs, "radius", 0.0)?,
                sides: sides as u32,
            }
        }
        "Image" => ShapeData::Image {
            x: number(attrs, "x", 0.0)?,
            y: number(attrs, "y", 0.0)?,
            width: number(attrs, "width", 0.0)?,
            height: number(attrs, "height", 0.0)?,
            src: string(attrs, "src")?.unwrap_or_default(),
        },
        "Text" => ShapeData::Text {
            x: number(attrs, "x", 0.0)?,
            y: number(attrs, "y", 0.0)?,
            width: number(attrs, "width", 0.0)?,
            height: number(attrs, "height", 0.0)?,
            text: string(attrs, "text")?.unwrap_or_default(),
            font_size: number(attrs, "fontSize", DEFAULT_FONT_SIZE)?,
            font_style: FontStyle::from_attrs(
                &string(attrs, "fontStyle")?.unwrap_or_default(),
                &string(attrs, "textDecoration")?.unwrap_or_default(),
            ),
        },
        "Group" => ShapeData::Group {
            x: number(attrs, "x", 0.0)?,
            y: number(attrs, "y", 0.0)?,
            children: node
                .children
                .iter()
                .filter(|child| !child.is_system_node())
                .map(|child| node_to_shape(child, seen))
                .collect::<CanvasResult<_>>()?,
        },
        other => {
            return Err(malformed(node, &format!("unsupported node class `{other}`")));
        }
    };

    if number(attrs, "rotation", 0.0)? != 0.0 {
        return Err(malformed(node, "rotated nodes are not supported"));
    }
    let (sx, sy) = (number(attrs, "scaleX", 1.0)?, number(attrs, "scaleY", 1.0)?);
    if sx < 0.0 || sy < 0.0 {
        return Err(malformed(node, "mirrored nodes are not supported"));
    }
    let data = if sx != 1.0 || sy != 1.0 {
        apply_scale(data, position(attrs)?, sx, sy)
    } else {
        data
    };

    if data.has_invalid_extent() {
        return Err(malformed(node, "negative or non-finite size"));
    }

    let id = match string(attrs, "id")?.and_then(|s| s.parse::<ShapeId>().ok()) {
        Some(id) if !seen.contains(&id) => id,
        _ => ShapeId::new(),
    };
    seen.insert(id);

    let mut shape = Shape::with_id(id, data, read_style(node)?);
    shape.name = string(attrs, "name")?;
    Ok(shape)
}

/// Bake a node's `scaleX`/`scaleY` into its geometry.
///
/// The engine scales around the node's own position. Group members live in
/// group-local coordinates, so they scale around the local origin. A square or
/// circle stretched unevenly becomes a rectangle or ellipse.
fn apply_scale(data: ShapeData, origin: Point, sx: f32, sy: f32) -> ShapeData {
    let at = |p: Point| Point::new(origin.x + (p.x - origin.x) * sx, origin.y + (p.y - origin.y) * sy);
    let uniform = sx == sy;

    match data {
        ShapeData::Rectangle { x, y, width, height } => {
            let p = at(Point::new(x, y));
            ShapeData::Rectangle { x: p.x, y: p.y, width: width * sx, height: height * sy }
        }
        ShapeData::Square { x, y, size } => {
            let p = at(Point::new(x, y));
            if uniform {
                ShapeData::Square { x: p.x, y: p.y, size: size * sx }
            } else {
                ShapeData::Rectangle { x: p.x, y: p.y, width: size * sx, height: size * sy }
            }
        }
        ShapeData::Circle { center, radius } => {
            if uniform {
                ShapeData::Circle { center: at(center), radius: radius * sx }
            } else {
                ShapeData::Ellipse { center: at(center), radius_x: radius * sx, radius_y: radius * sy }
            }
        }
        ShapeData::Ellipse { center, radius_x, radius_y } => ShapeData::Ellipse {
            center: at(center),
            radius_x: radius_x * sx,
            radius_y: radius_y * sy,
        },
        ShapeData::Line { points } => ShapeData::Line { points: points.into_iter().map(at).collect() },
        ShapeData::FreeDraw { points } => ShapeData::FreeDraw { points: points.into_iter().map(at).collect() },
        // A regular polygon cannot stretch; it grows to cover the longer axis
        ShapeData::Polygon { center, radius, sides } => ShapeData::Polygon {
            center: at(center),
            radius: radius * sx.max(sy),
            sides,
        },
        ShapeData::Image { x, y, width, height, src } => {
            let p = at(Point::new(x, y));
            ShapeData::Image { x: p.x, y: p.y, width: width * sx, height: height * sy, src }
        }
        ShapeData::Text { x, y, width, height, text, font_size, font_style } => {
            let p = at(Point::new(x, y));
            ShapeData::Text {
                x: p.x,
                y: p.y,
                width: width * sx,
                height: height * sy,
                text,
                font_size: font_size * sy,
                font_style,
            }
        }
        ShapeData::Group { x, y, children } => {
            let p = at(Point::new(x, y));
            let children = children
                .into_iter()
                .map(|mut child| {
                    child.data = apply_scale(child.data, Point::default(), sx, sy);
                    child
                })
                .collect();
            ShapeData::Group { x: p.x, y: p.y, children }
        }
    }
}

fn read_style(node: &DocumentNode) -> CanvasResult<StyleRecord> {
    let attrs = &node.attrs;
    let defaults = StyleRecord::default();

    let dash = match attrs.get("dash") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => StyleRecord::parse_dash(s),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_f64().map(|n| n as f32))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| malformed(node, "dash must contain numbers"))?,
        Some(_) => return Err(malformed(node, "dash must be a list or a string")),
    };

    let line_cap = match string(attrs, "lineCap")? {
        Some(s) => LineCap::parse(&s).ok_or_else(|| malformed(node, "unknown lineCap"))?,
        None => defaults.line_cap,
    };
    let line_join = match string(attrs, "lineJoin")? {
        Some(s) => LineJoin::parse(&s).ok_or_else(|| malformed(node, "unknown lineJoin"))?,
        None => defaults.line_join,
    };

    let has_shadow = ["shadowColor", "shadowBlur", "shadowOffsetX", "shadowOffsetY", "shadowOpacity"]
        .iter()
        .any(|key| attrs.contains_key(*key));
    let shadow = if has_shadow {
        let base = Shadow::default();
        Some(Shadow {
            color: string(attrs, "shadowColor")?.unwrap_or(base.color),
            blur: number(attrs, "shadowBlur", base.blur)?,
            offset_x: number(attrs, "shadowOffsetX", base.offset_x)?,
            offset_y: number(attrs, "shadowOffsetY", base.offset_y)?,
            opacity: number(attrs, "shadowOpacity", base.opacity)?,
        })
    } else {
        None
    };

    Ok(StyleRecord {
        stroke: string(attrs, "stroke")?.unwrap_or(defaults.stroke),
        stroke_width: number(attrs, "strokeWidth", defaults.stroke_width)?,
        dash,
        fill: string(attrs, "fill")?.unwrap_or(defaults.fill),
        opacity: number(attrs, "opacity", defaults.opacity)?,
        line_cap,
        line_join,
        shadow,
        composite_operation: string(attrs, "globalCompositeOperation")?,
    })
}

fn malformed(node: &DocumentNode, reason: &str) -> CanvasError {
    CanvasError::MalformedDocument(format!("{} node: {}", node.class_name, reason))
}

fn number(attrs: &Map<String, Value>, key: &str, default: f32) -> CanvasResult<f32> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_f64()
            .map(|n| n as f32)
            .filter(|n| n.is_finite())
            .ok_or_else(|| CanvasError::MalformedDocument(format!("`{key}` must be a number"))),
    }
}

fn string(attrs: &Map<String, Value>, key: &str) -> CanvasResult<Option<String>> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CanvasError::MalformedDocument(format!("`{key}` must be a string"))),
    }
}

fn position(attrs: &Map<String, Value>) -> CanvasResult<Point> {
    Ok(Point::new(number(attrs, "x", 0.0)?, number(attrs, "y", 0.0)?))
}

/// Flat `[x0, y0, x1, y1, ...]` list, shifted by the node's `x`/`y`.
fn points(attrs: &Map<String, Value>) -> CanvasResult<Vec<Point>> {
    let flat = match attrs.get("points") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_f64().map(|n| n as f32))
            .collect::<Option<Vec<f32>>>()
            .ok_or_else(|| CanvasError::MalformedDocument("`points` must contain numbers".into()))?,
        Some(_) => {
            return Err(CanvasError::MalformedDocument("`points` must be a list".into()));
        }
    };
    if flat.len() % 2 != 0 {
        return Err(CanvasError::MalformedDocument(
            "`points` must hold an even number of coordinates".into(),
        ));
    }

    let (dx, dy) = (number(attrs, "x", 0.0)?, number(attrs, "y", 0.0)?);
    Ok(flat
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0] + dx, pair[1] + dy))
        .collect())
}
