//! Image import - decode dimensions, scale down, place as an image shape.

use crate::constants::IMAGE_NODE_NAME;
use crate::error::CanvasResult;
use crate::session::CanvasSession;
use crate::surface::RenderSurface;
use crate::types::{Shape, ShapeData, ShapeId};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageReader;
use std::io::Cursor;
use tracing::info;

/// Scale `(width, height)` so the longer side is at most `max_dimension`.
///
/// Images that already fit keep their natural size.
pub fn fit_within(width: u32, height: u32, max_dimension: f32) -> (f32, f32) {
    let (w, h) = (width as f32, height as f32);
    if w <= max_dimension && h <= max_dimension {
        return (w, h);
    }

    let aspect_ratio = w / h;
    if w >= h {
        (max_dimension, max_dimension / aspect_ratio)
    } else {
        (max_dimension * aspect_ratio, max_dimension)
    }
}

impl<S: RenderSurface> CanvasSession<S> {
    /// Add an image from encoded bytes (PNG, JPEG, ...).
    ///
    /// The image is stored as a base64 data URL, bound like any other shape
    /// and placed without changing the selection.
    pub fn import_image(&mut self, bytes: &[u8]) -> CanvasResult<ShapeId> {
        let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        let mime = reader
            .format()
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");
        let (natural_w, natural_h) = reader.into_dimensions()?;

        let (width, height) = fit_within(natural_w, natural_h, self.config.image_max_size);
        let (x, y) = self.config.image_origin;
        let src = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));

        let shape = Shape::new(
            ShapeData::Image { x, y, width, height, src },
            self.current_style.clone(),
        )
        .named(IMAGE_NODE_NAME);

        info!(
            "Imported {}x{} image as {}x{}",
            natural_w, natural_h, width, height
        );
        Ok(self.add_shape(shape))
    }
}
