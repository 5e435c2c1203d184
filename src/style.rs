//! Per-shape style records.
//!
//! The session keeps one "current" [`StyleRecord`] that newly drawn shapes
//! snapshot. After creation, edits go through
//! [`StyleRecord::apply`] on one specific shape and raise a style-change
//! notification for it.

use crate::error::{CanvasError, CanvasResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Line end decoration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// Corner decoration between joined segments
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "miter" => Some(LineJoin::Miter),
            "round" => Some(LineJoin::Round),
            "bevel" => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

/// Drop shadow parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    pub color: String,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            blur: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            opacity: 1.0,
        }
    }
}

/// Visual style of a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRecord {
    /// Stroke color as hex string (e.g., "#000000")
    pub stroke: String,
    /// Stroke width in scene units
    pub stroke_width: f32,
    /// Dash pattern; empty means a solid line
    pub dash: Vec<f32>,
    /// Fill color as hex string
    pub fill: String,
    /// Opacity in `0.0..=1.0`
    pub opacity: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub shadow: Option<Shadow>,
    /// Canvas blend mode, e.g. `destination-out` on eraser strokes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_operation: Option<String>,
}

impl Default for StyleRecord {
    fn default() -> Self {
        Self {
            stroke: "#000000".to_string(),
            stroke_width: 2.0,
            dash: Vec::new(),
            fill: "#ffffff".to_string(),
            opacity: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            shadow: None,
            composite_operation: None,
        }
    }
}

/// A named style attribute that can be edited on a single shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAttribute {
    Fill,
    Stroke,
    StrokeWidth,
    Dash,
    LineCap,
    LineJoin,
    Opacity,
    ShadowColor,
    ShadowBlur,
    ShadowOffsetX,
    ShadowOffsetY,
    ShadowOpacity,
}

static ATTRIBUTES_BY_NAME: Lazy<HashMap<&'static str, StyleAttribute>> = Lazy::new(|| {
    StyleAttribute::ALL
        .iter()
        .map(|attribute| (attribute.name(), *attribute))
        .collect()
});

impl StyleAttribute {
    pub const ALL: [StyleAttribute; 12] = [
        StyleAttribute::Fill,
        StyleAttribute::Stroke,
        StyleAttribute::StrokeWidth,
        StyleAttribute::Dash,
        StyleAttribute::LineCap,
        StyleAttribute::LineJoin,
        StyleAttribute::Opacity,
        StyleAttribute::ShadowColor,
        StyleAttribute::ShadowBlur,
        StyleAttribute::ShadowOffsetX,
        StyleAttribute::ShadowOffsetY,
        StyleAttribute::ShadowOpacity,
    ];

    /// Attribute name as written in serialized documents
    pub fn name(&self) -> &'static str {
        match self {
            StyleAttribute::Fill => "fill",
            StyleAttribute::Stroke => "stroke",
            StyleAttribute::StrokeWidth => "strokeWidth",
            StyleAttribute::Dash => "dash",
            StyleAttribute::LineCap => "lineCap",
            StyleAttribute::LineJoin => "lineJoin",
            StyleAttribute::Opacity => "opacity",
            StyleAttribute::ShadowColor => "shadowColor",
            StyleAttribute::ShadowBlur => "shadowBlur",
            StyleAttribute::ShadowOffsetX => "shadowOffsetX",
            StyleAttribute::ShadowOffsetY => "shadowOffsetY",
            StyleAttribute::ShadowOpacity => "shadowOpacity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ATTRIBUTES_BY_NAME.get(name).copied()
    }
}

/// A value for one [`StyleAttribute`].
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Color(String),
    Number(f32),
    Dash(Vec<f32>),
    LineCap(LineCap),
    LineJoin(LineJoin),
}

impl StyleRecord {
    /// Set one attribute, rejecting values of the wrong kind.
    pub fn apply(&mut self, attribute: StyleAttribute, value: StyleValue) -> CanvasResult<()> {
        let invalid = || CanvasError::InvalidStyleValue {
            attribute: attribute.name(),
        };

        match (attribute, value) {
            (StyleAttribute::Fill, StyleValue::Color(c)) => self.fill = c,
            (StyleAttribute::Stroke, StyleValue::Color(c)) => self.stroke = c,
            (StyleAttribute::StrokeWidth, StyleValue::Number(n)) if n.is_finite() && n >= 0.0 => {
                self.stroke_width = n
            }
            (StyleAttribute::Dash, StyleValue::Dash(d)) => self.dash = d,
            (StyleAttribute::LineCap, StyleValue::LineCap(c)) => self.line_cap = c,
            (StyleAttribute::LineJoin, StyleValue::LineJoin(j)) => self.line_join = j,
            (StyleAttribute::Opacity, StyleValue::Number(n)) if (0.0..=1.0).contains(&n) => {
                self.opacity = n
            }
            (StyleAttribute::ShadowColor, StyleValue::Color(c)) => {
                self.shadow.get_or_insert_with(Shadow::default).color = c
            }
            (StyleAttribute::ShadowBlur, StyleValue::Number(n)) if n.is_finite() && n >= 0.0 => {
                self.shadow.get_or_insert_with(Shadow::default).blur = n
            }
            (StyleAttribute::ShadowOffsetX, StyleValue::Number(n)) if n.is_finite() => {
                self.shadow.get_or_insert_with(Shadow::default).offset_x = n
            }
            (StyleAttribute::ShadowOffsetY, StyleValue::Number(n)) if n.is_finite() => {
                self.shadow.get_or_insert_with(Shadow::default).offset_y = n
            }
            (StyleAttribute::ShadowOpacity, StyleValue::Number(n)) if (0.0..=1.0).contains(&n) => {
                self.shadow.get_or_insert_with(Shadow::default).opacity = n
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }

    /// Parse a dash pattern typed as a comma separated list (e.g. `"4, 4"`).
    ///
    /// Entries that are not numbers are dropped.
    pub fn parse_dash(value: &str) -> Vec<f32> {
        value
            .split(',')
            .filter_map(|part| part.trim().parse::<f32>().ok())
            .filter(|n| n.is_finite())
            .collect()
    }
}
