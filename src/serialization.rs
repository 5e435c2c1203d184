//! Scene export and import.
//!
//! Import is validate-then-commit: the whole document is parsed into shapes
//! before the live scene is touched, so a malformed document leaves the
//! session exactly as it was.

use crate::document::{parse_document, shape_to_node, DocumentNode};
use crate::error::CanvasResult;
use crate::profile_scope;
use crate::session::CanvasSession;
use crate::surface::RenderSurface;
use crate::types::Shape;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

impl<S: RenderSurface> CanvasSession<S> {
    /// Serialize the scene as a `Layer` node tree. Does not mutate the scene.
    pub fn export_scene(&self) -> DocumentNode {
        profile_scope!("export_scene");
        DocumentNode::layer(self.scene.shapes().iter().map(shape_to_node).collect())
    }

    pub fn export_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(&self.export_scene())?)
    }

    /// Replace the scene with the shapes of `document`.
    ///
    /// Returns the number of top-level shapes imported.
    pub fn import_scene(&mut self, document: &DocumentNode) -> CanvasResult<usize> {
        profile_scope!("import_scene");

        let shapes = parse_document(document)?;

        self.cancel_interaction();
        for shape in self.scene.clear() {
            if let Err(e) = self.destroy_node(&shape) {
                warn!("{}", e);
            }
        }

        let count = shapes.len();
        for mut shape in shapes {
            self.bindings
                .rebind_tree(&mut shape, &Shape::is_eraser, self.drawing_mode);
            self.surface.add_node(&shape);
            self.scene.push(shape);
        }

        self.scene.selection.clear();
        self.sync_transformer();
        info!("Imported {} shapes", count);
        Ok(count)
    }

    pub fn import_json(&mut self, json: &str) -> CanvasResult<usize> {
        let document: DocumentNode = serde_json::from_str(json)?;
        self.import_scene(&document)
    }

    /// Write the exported scene to `path`, replacing it atomically.
    pub fn save_scene(&self, path: &Path) -> CanvasResult<()> {
        let json = self.export_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;

        debug!("Saved scene to {}", path.display());
        Ok(())
    }

    pub fn load_scene(&mut self, path: &Path) -> CanvasResult<usize> {
        let json = fs::read_to_string(path)?;
        self.import_json(&json)
    }
}
