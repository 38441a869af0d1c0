//! Staging surfaces
//!
//! Before capture a report is attached to a surface as its own top-level
//! node, sized to a physical page with colors forced opaque. The node is
//! owned by a [`StagingGuard`]; dropping the guard detaches it, so the node
//! never outlives the export call whether it succeeds, fails, or is cancelled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maud::html;
use uuid::Uuid;

use crate::document::style::{Rgb, BLACK, WHITE};
use crate::document::{html::render_body, Document};
use crate::error::{VantageError, VantageResult};

/// Marker carried by every staged export node
pub const EXPORT_ELEMENT_ID: &str = "pdf-export-element";

/// CSS pixels per inch
const PX_PER_INCH: f32 = 96.0;

/// Physical frame a staged report is laid out in
#[derive(Debug, Clone, PartialEq)]
pub struct PageFrame {
    pub width_in: f32,
    pub min_height_in: f32,
    pub padding_px: u32,
    pub background: Rgb,
    pub foreground: Rgb,
    pub font_family: &'static str,
}

impl PageFrame {
    /// US Letter, portrait, white paper with black ink
    pub fn letter() -> Self {
        Self {
            width_in: 8.5,
            min_height_in: 11.0,
            padding_px: 40,
            background: WHITE,
            foreground: BLACK,
            font_family: "Inter, sans-serif",
        }
    }

    /// Frame width in CSS pixels (816 for Letter)
    pub fn width_px(&self) -> u32 {
        (self.width_in * PX_PER_INCH).round() as u32
    }

    /// Frame height in CSS pixels (1056 for Letter)
    pub fn height_px(&self) -> u32 {
        (self.min_height_in * PX_PER_INCH).round() as u32
    }

    /// Inline style forcing the frame visible and opaque regardless of ambient theme
    pub fn inline_style(&self) -> String {
        format!(
            "width: {}in; min-height: {}in; padding: {}px; font-family: {}; \
             position: fixed; left: 0; top: 0; z-index: 99999; \
             background-color: {}; color: {}; \
             visibility: visible; opacity: 1; display: block; overflow: visible;",
            self.width_in,
            self.min_height_in,
            self.padding_px,
            self.font_family,
            self.background.hex(),
            self.foreground.hex(),
        )
    }
}

impl Default for PageFrame {
    fn default() -> Self {
        Self::letter()
    }
}

/// A report staged for capture
#[derive(Debug, Clone)]
pub struct StagedNode {
    id: String,
    document: Arc<Document>,
    frame: PageFrame,
}

impl StagedNode {
    /// New node with a unique id carrying the export marker
    pub fn new(document: Arc<Document>, frame: PageFrame) -> Self {
        Self {
            id: format!("{}-{}", EXPORT_ELEMENT_ID, Uuid::new_v4()),
            document,
            frame,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shared_document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    pub fn frame(&self) -> &PageFrame {
        &self.frame
    }

    /// Whether this node carries the export marker
    pub fn is_export_node(&self) -> bool {
        self.id.starts_with(EXPORT_ELEMENT_ID)
    }

    /// Markup of the framed node as it sits on the surface
    pub fn markup(&self) -> String {
        html! {
            div id=(self.id) class=(EXPORT_ELEMENT_ID) style=(self.frame.inline_style()) {
                (render_body(&self.document))
            }
        }
        .into_string()
    }
}

/// A surface staged nodes are attached to
///
/// Implementations must allow concurrent exports to attach and detach their
/// own nodes without touching anyone else's.
pub trait Surface: Send + Sync {
    /// Attach a node at the top level
    fn attach(&self, node: StagedNode) -> VantageResult<()>;

    /// Detach a node, returning it if it was present
    fn detach(&self, id: &str) -> Option<StagedNode>;

    /// Whether a node with this id is attached
    fn contains(&self, id: &str) -> bool;

    /// Number of attached nodes carrying the export marker
    fn staged_count(&self) -> usize;
}

/// In-process surface holding attached nodes in order
#[derive(Debug, Default)]
pub struct MemorySurface {
    nodes: Mutex<Vec<StagedNode>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, Vec<StagedNode>> {
        // A panic while holding the lock cannot leave the Vec half-updated
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ids of all attached nodes
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes().iter().map(|n| n.id.clone()).collect()
    }
}

impl Surface for MemorySurface {
    fn attach(&self, node: StagedNode) -> VantageResult<()> {
        let mut nodes = self.nodes();
        if nodes.iter().any(|n| n.id == node.id) {
            return Err(VantageError::Render(format!(
                "node {} is already staged",
                node.id
            )));
        }
        nodes.push(node);
        Ok(())
    }

    fn detach(&self, id: &str) -> Option<StagedNode> {
        let mut nodes = self.nodes();
        let index = nodes.iter().position(|n| n.id == id)?;
        Some(nodes.remove(index))
    }

    fn contains(&self, id: &str) -> bool {
        self.nodes().iter().any(|n| n.id == id)
    }

    fn staged_count(&self) -> usize {
        self.nodes().iter().filter(|n| n.is_export_node()).count()
    }
}

/// Owns a staged node for the duration of one export
pub struct StagingGuard {
    surface: Arc<dyn Surface>,
    node: StagedNode,
}

impl StagingGuard {
    /// Attach `node` to `surface`; it stays attached until the guard drops
    pub fn stage(surface: Arc<dyn Surface>, node: StagedNode) -> VantageResult<Self> {
        surface.attach(node.clone())?;
        tracing::debug!(node = %node.id, "staged export node");
        Ok(Self { surface, node })
    }

    pub fn node(&self) -> &StagedNode {
        &self.node
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if self.surface.detach(&self.node.id).is_some() {
            tracing::debug!(node = %self.node.id, "detached export node");
        } else {
            tracing::warn!(node = %self.node.id, "export node was already detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::render_report;
    use crate::models::report::fixtures::input;

    fn node() -> StagedNode {
        StagedNode::new(
            Arc::new(render_report(&input("SoHo"), "$")),
            PageFrame::letter(),
        )
    }

    #[test]
    fn test_letter_frame_dimensions() {
        let frame = PageFrame::letter();
        assert_eq!(frame.width_px(), 816);
        assert_eq!(frame.height_px(), 1056);
        let style = frame.inline_style();
        assert!(style.contains("background-color: #FFFFFF"));
        assert!(style.contains("color: #000000"));
        assert!(style.contains("opacity: 1"));
    }

    #[test]
    fn test_node_ids_are_unique_and_marked() {
        let a = node();
        let b = node();
        assert_ne!(a.id(), b.id());
        assert!(a.is_export_node());
        assert!(a.markup().contains(&format!("id=\"{}\"", a.id())));
    }

    #[test]
    fn test_guard_detaches_on_drop() {
        let surface = Arc::new(MemorySurface::new());
        let staged = node();
        let id = staged.id().to_string();

        {
            let guard = StagingGuard::stage(surface.clone(), staged).unwrap();
            assert!(surface.contains(&id));
            assert_eq!(guard.node().id(), id);
            assert_eq!(surface.staged_count(), 1);
        }

        assert!(!surface.contains(&id));
        assert_eq!(surface.staged_count(), 0);
    }

    #[test]
    fn test_guards_only_remove_their_own_node() {
        let surface = Arc::new(MemorySurface::new());
        let first = StagingGuard::stage(surface.clone(), node()).unwrap();
        let second = StagingGuard::stage(surface.clone(), node()).unwrap();
        let second_id = second.node().id().to_string();

        drop(first);
        assert_eq!(surface.node_ids(), vec![second_id]);
        drop(second);
        assert_eq!(surface.staged_count(), 0);
    }

    #[test]
    fn test_duplicate_attach_rejected() {
        let surface = MemorySurface::new();
        let staged = node();
        surface.attach(staged.clone()).unwrap();
        assert!(surface.attach(staged).is_err());
    }
}
