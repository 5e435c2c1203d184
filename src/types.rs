//! Core types for the sketchboard scene.
//!
//! This module defines shape identifiers, the closed set of shape variants,
//! their geometry, and the [`Shape`] record stored in the scene.

use crate::bindings::Binding;
use crate::constants::ERASER_NODE_NAME;
use crate::error::CanvasError;
use crate::geometry::{bounds_of_points, Point, Rect};
use crate::style::StyleRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Shape identifier - UUID so clones and imports never collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShapeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ============================================================================
// Shape Kinds
// ============================================================================

/// The variant of a shape, also used as the drawing tool selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Line,
    FreeDraw,
    Polygon,
    Image,
    Text,
    Group,
}

impl ShapeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::FreeDraw => "free-draw",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Image => "image",
            ShapeKind::Text => "text",
            ShapeKind::Group => "group",
        }
    }

    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Rectangle,
            ShapeKind::Square,
            ShapeKind::Circle,
            ShapeKind::Ellipse,
            ShapeKind::Line,
            ShapeKind::FreeDraw,
            ShapeKind::Polygon,
            ShapeKind::Image,
            ShapeKind::Text,
            ShapeKind::Group,
        ]
    }

    /// Returns true if this variant can be created by dragging with a tool
    pub fn is_drawable(&self) -> bool {
        !matches!(self, ShapeKind::Image | ShapeKind::Group)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShapeKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(ShapeKind::Rectangle),
            "square" => Ok(ShapeKind::Square),
            "circle" => Ok(ShapeKind::Circle),
            "ellipse" => Ok(ShapeKind::Ellipse),
            "line" => Ok(ShapeKind::Line),
            "free-draw" => Ok(ShapeKind::FreeDraw),
            "polygon" | "triangle" => Ok(ShapeKind::Polygon),
            "image" => Ok(ShapeKind::Image),
            "text" => Ok(ShapeKind::Text),
            "group" => Ok(ShapeKind::Group),
            other => Err(CanvasError::UnsupportedShapeType(other.to_string())),
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Font decoration of a text shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontStyle {
    /// The `fontStyle` attribute: "normal", "bold", "italic" or "italic bold"
    pub fn style_attr(&self) -> &'static str {
        match (self.bold, self.italic) {
            (true, true) => "italic bold",
            (true, false) => "bold",
            (false, true) => "italic",
            (false, false) => "normal",
        }
    }

    pub fn from_attrs(font_style: &str, text_decoration: &str) -> Self {
        Self {
            bold: font_style.contains("bold"),
            italic: font_style.contains("italic"),
            underline: text_decoration == "underline",
        }
    }
}

/// Toggle applied by the text controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyleToggle {
    Bold,
    Italic,
    Underline,
}

/// Variant-specific geometry of a shape.
///
/// All sizes are non-negative. Group children are positioned relative to the
/// group origin.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeData {
    Rectangle {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Square {
        x: f32,
        y: f32,
        size: f32,
    },
    Circle {
        center: Point,
        radius: f32,
    },
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
    },
    /// Straight segment between the two drag endpoints
    Line {
        points: Vec<Point>,
    },
    /// Free-hand path, one point per pointer move
    FreeDraw {
        points: Vec<Point>,
    },
    /// Regular polygon inscribed in a circle
    Polygon {
        center: Point,
        radius: f32,
        sides: u32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Image source, usually a base64 data URL
        src: String,
    },
    Text {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: String,
        font_size: f32,
        font_style: FontStyle,
    },
    Group {
        x: f32,
        y: f32,
        children: Vec<Shape>,
    },
}

impl ShapeData {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeData::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeData::Square { .. } => ShapeKind::Square,
            ShapeData::Circle { .. } => ShapeKind::Circle,
            ShapeData::Ellipse { .. } => ShapeKind::Ellipse,
            ShapeData::Line { .. } => ShapeKind::Line,
            ShapeData::FreeDraw { .. } => ShapeKind::FreeDraw,
            ShapeData::Polygon { .. } => ShapeKind::Polygon,
            ShapeData::Image { .. } => ShapeKind::Image,
            ShapeData::Text { .. } => ShapeKind::Text,
            ShapeData::Group { .. } => ShapeKind::Group,
        }
    }

    /// Bounding rectangle in the coordinate frame of the owner.
    pub fn bounds(&self) -> Rect {
        match self {
            ShapeData::Rectangle { x, y, width, height }
            | ShapeData::Image { x, y, width, height, .. }
            | ShapeData::Text { x, y, width, height, .. } => Rect::new(*x, *y, *width, *height),
            ShapeData::Square { x, y, size } => Rect::new(*x, *y, *size, *size),
            ShapeData::Circle { center, radius } | ShapeData::Polygon { center, radius, .. } => {
                Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
            }
            ShapeData::Ellipse { center, radius_x, radius_y } => Rect::new(
                center.x - radius_x,
                center.y - radius_y,
                radius_x * 2.0,
                radius_y * 2.0,
            ),
            ShapeData::Line { points } | ShapeData::FreeDraw { points } => bounds_of_points(points),
            ShapeData::Group { x, y, children } => children
                .iter()
                .map(Shape::bounds)
                .reduce(|acc, r| acc.union(&r))
                .map(|r| r.translate(*x, *y))
                .unwrap_or_else(|| Rect::new(*x, *y, 0.0, 0.0)),
        }
    }

    /// True if any size parameter is negative or not finite.
    pub fn has_invalid_extent(&self) -> bool {
        let bad = |v: f32| !v.is_finite() || v < 0.0;
        match self {
            ShapeData::Rectangle { width, height, .. }
            | ShapeData::Image { width, height, .. }
            | ShapeData::Text { width, height, .. } => bad(*width) || bad(*height),
            ShapeData::Square { size, .. } => bad(*size),
            ShapeData::Circle { radius, .. } | ShapeData::Polygon { radius, .. } => bad(*radius),
            ShapeData::Ellipse { radius_x, radius_y, .. } => bad(*radius_x) || bad(*radius_y),
            ShapeData::Line { points } | ShapeData::FreeDraw { points } => points
                .iter()
                .any(|p| !p.x.is_finite() || !p.y.is_finite()),
            ShapeData::Group { children, .. } => children.iter().any(|c| c.data.has_invalid_extent()),
        }
    }
}

// ============================================================================
// Shape
// ============================================================================

/// A live shape in the scene.
///
/// The binding record is attached by the binding manager and never travels
/// with a duplicate: [`Shape::duplicate`] returns an unbound copy with fresh
/// identifiers.
#[derive(Clone, Debug)]
pub struct Shape {
    id: ShapeId,
    /// Node name; `eraser` marks a utility stroke
    pub name: Option<String>,
    pub data: ShapeData,
    pub style: StyleRecord,
    draggable: bool,
    binding: Option<Binding>,
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.same_content(other)
    }
}

impl Shape {
    pub fn new(data: ShapeData, style: StyleRecord) -> Self {
        Self::with_id(ShapeId::new(), data, style)
    }

    pub fn with_id(id: ShapeId, data: ShapeData, style: StyleRecord) -> Self {
        Self {
            id,
            name: None,
            data,
            style,
            draggable: false,
            binding: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.data.kind()
    }

    /// Bounding rectangle in scene coordinates
    pub fn bounds(&self) -> Rect {
        self.data.bounds()
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    pub fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub(crate) fn attach_binding(&mut self, binding: Binding) {
        self.binding = Some(binding);
    }

    pub(crate) fn detach_binding(&mut self) {
        self.binding = None;
    }

    /// Eraser strokes are persisted but never bound or selectable
    pub fn is_eraser(&self) -> bool {
        self.name.as_deref() == Some(ERASER_NODE_NAME)
    }

    pub fn children(&self) -> &[Shape] {
        match &self.data {
            ShapeData::Group { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Shape>> {
        match &mut self.data {
            ShapeData::Group { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Depth-first search through group members, including `self`.
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        if self.id == id {
            return Some(self);
        }
        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }

    /// Compare everything except identifiers, bindings and the drag flag.
    pub fn same_content(&self, other: &Shape) -> bool {
        if self.name != other.name || self.style != other.style {
            return false;
        }
        match (&self.data, &other.data) {
            (
                ShapeData::Group { x, y, children },
                ShapeData::Group { x: ox, y: oy, children: other_children },
            ) => {
                x == ox
                    && y == oy
                    && children.len() == other_children.len()
                    && children
                        .iter()
                        .zip(other_children)
                        .all(|(a, b)| a.same_content(b))
            }
            (a, b) => a == b,
        }
    }

    /// Unbound copy moved by `(dx, dy)` with fresh identifiers throughout.
    pub fn duplicate(&self, dx: f32, dy: f32) -> Shape {
        let mut copy = self.fresh_copy();
        copy.translate(dx, dy);
        copy
    }

    fn fresh_copy(&self) -> Shape {
        let data = match &self.data {
            ShapeData::Group { x, y, children } => ShapeData::Group {
                x: *x,
                y: *y,
                children: children.iter().map(Shape::fresh_copy).collect(),
            },
            other => other.clone(),
        };
        Shape {
            id: ShapeId::new(),
            name: self.name.clone(),
            data,
            style: self.style.clone(),
            draggable: false,
            binding: None,
        }
    }

    /// Move the shape by `(dx, dy)`.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match &mut self.data {
            ShapeData::Rectangle { x, y, .. }
            | ShapeData::Square { x, y, .. }
            | ShapeData::Image { x, y, .. }
            | ShapeData::Text { x, y, .. }
            | ShapeData::Group { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            ShapeData::Circle { center, .. }
            | ShapeData::Ellipse { center, .. }
            | ShapeData::Polygon { center, .. } => *center = center.offset(dx, dy),
            ShapeData::Line { points } | ShapeData::FreeDraw { points } => {
                for p in points.iter_mut() {
                    *p = p.offset(dx, dy);
                }
            }
        }
    }

    /// Fit the shape into `target`, which must be well-formed.
    pub fn resize_to(&mut self, target: Rect) {
        let current = self.bounds();
        match &mut self.data {
            ShapeData::Rectangle { x, y, width, height }
            | ShapeData::Image { x, y, width, height, .. }
            | ShapeData::Text { x, y, width, height, .. } => {
                *x = target.x;
                *y = target.y;
                *width = target.width;
                *height = target.height;
            }
            ShapeData::Square { x, y, size } => {
                *x = target.x;
                *y = target.y;
                *size = target.width;
            }
            ShapeData::Circle { center, radius } | ShapeData::Polygon { center, radius, .. } => {
                *center = target.center();
                *radius = target.width.max(target.height) / 2.0;
            }
            ShapeData::Ellipse { center, radius_x, radius_y } => {
                *center = target.center();
                *radius_x = target.width / 2.0;
                *radius_y = target.height / 2.0;
            }
            ShapeData::Line { points } | ShapeData::FreeDraw { points } => {
                for p in points.iter_mut() {
                    *p = Rect::map_point(*p, &current, &target);
                }
            }
            ShapeData::Group { x, y, children } => {
                // Children live in group-local coordinates.
                let local_from = current.translate(-*x, -*y);
                let local_to = target.translate(-*x, -*y);
                for child in children.iter_mut() {
                    let mapped = Rect::map_rect(&child.bounds(), &local_from, &local_to);
                    child.resize_to(mapped);
                }
            }
        }
    }

    /// Text controls: returns `None` for non-text shapes.
    pub fn font_style_mut(&mut self) -> Option<&mut FontStyle> {
        match &mut self.data {
            ShapeData::Text { font_style, .. } => Some(font_style),
            _ => None,
        }
    }

    pub fn font_size_mut(&mut self) -> Option<&mut f32> {
        match &mut self.data {
            ShapeData::Text { font_size, .. } => Some(font_size),
            _ => None,
        }
    }
}
