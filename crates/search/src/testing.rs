//! Test fakes shared across modules.

use std::collections::HashMap;

use crate::document::{Document, NodeId};
use crate::tree::{BoundingBox, ComputedStyle, DocumentTree, TreeError};

/// Structure and style come from a [`Document`]; layout comes only from
/// boxes assigned here, so an element keeps its box even under a
/// `display: none` ancestor.
pub struct FixedLayout<'a> {
    document: &'a Document,
    boxes: HashMap<NodeId, BoundingBox>,
}

impl<'a> FixedLayout<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            boxes: HashMap::new(),
        }
    }

    pub fn with_box(mut self, node: NodeId, value: BoundingBox) -> Self {
        self.boxes.insert(node, value);
        self
    }
}

impl DocumentTree for FixedLayout<'_> {
    type NodeId = NodeId;

    fn root(&self) -> NodeId {
        self.document.root()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.document.parent(node)
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>, TreeError> {
        self.document.children(node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.document.text(node)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.document.tag_name(node)
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.document.element_id(node)
    }

    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, TreeError> {
        self.document.computed_style(node)
    }

    fn bounding_box(&self, node: NodeId) -> Result<BoundingBox, TreeError> {
        // Same failures as the document for text and detached nodes.
        self.document.computed_style(node)?;
        Ok(self.boxes.get(&node).copied().unwrap_or_default())
    }
}
