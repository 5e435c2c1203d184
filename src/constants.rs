//! Application-wide constants.
//!
//! Centralizes magic numbers and well-known node names so the controller,
//! the binding manager and the serialization bridge agree on them.

// ============================================================================
// Interaction
// ============================================================================

/// Maximum pointer travel (in scene units) for a press/release pair to count as a click
pub const CLICK_TOLERANCE: f32 = 3.0;

/// Offset applied to duplicated shapes on both axes
pub const DUPLICATE_OFFSET: (f32, f32) = (20.0, 20.0);

/// Transforms producing a box narrower or shorter than this are rejected
pub const MIN_TRANSFORM_SIZE: f32 = 5.0;

/// Vertical gap between the primary selection and its context menu anchor
pub const MENU_OFFSET: f32 = 10.0;

// ============================================================================
// Shape Defaults
// ============================================================================

/// Default font size for text shapes
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Placeholder content for freshly drawn text shapes
pub const DEFAULT_TEXT: &str = "Text";

/// Number of sides for the polygon tool (triangle)
pub const DEFAULT_POLYGON_SIDES: u32 = 3;

/// Largest side of an imported image before it is scaled down
pub const IMAGE_MAX_INITIAL_SIZE: f32 = 300.0;

/// Top-left corner where imported images are placed
pub const IMAGE_ORIGIN: (f32, f32) = (50.0, 50.0);

// ============================================================================
// Node Names
// ============================================================================

/// Name carried by eraser strokes; these stay unbound and fixed
pub const ERASER_NODE_NAME: &str = "eraser";

/// Name of the transient marquee rectangle node
pub const MARQUEE_NODE_NAME: &str = "selectionRectangle";

/// Name given to imported image nodes
pub const IMAGE_NODE_NAME: &str = "image-shape";

/// Class name of the transform-handle widget in serialized trees
pub const TRANSFORMER_CLASS: &str = "Transformer";
