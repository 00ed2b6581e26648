//! Arena-backed document tree with a JSON loader.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::tree::{BoundingBox, ComputedStyle, DocumentTree, TreeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be an element, not a text node")]
    EmptyDocument,
}

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        tag: String,
        id: Option<String>,
        style: ComputedStyle,
        rect: BoundingBox,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
    detached: bool,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NodeSpec {
    Text(String),
    Element(ElementSpec),
}

#[derive(Deserialize)]
struct ElementSpec {
    tag: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    style: ComputedStyle,
    #[serde(default)]
    rect: BoundingBox,
    #[serde(default)]
    children: Vec<NodeSpec>,
}

impl Document {
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element {
                    tag: root_tag.to_string(),
                    id: None,
                    style: ComputedStyle::default(),
                    rect: BoundingBox::default(),
                },
                detached: false,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let spec: NodeSpec = serde_json::from_str(json)?;
        let NodeSpec::Element(root) = spec else {
            return Err(DocumentError::EmptyDocument);
        };

        let mut document = Self::new(&root.tag);
        let root_id = document.root();
        document.apply_element_spec(root_id, &root);
        for child in &root.children {
            document.append_spec(root_id, child);
        }
        Ok(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn append_spec(&mut self, parent: NodeId, spec: &NodeSpec) {
        match spec {
            NodeSpec::Text(text) => {
                self.append_text(parent, text);
            }
            NodeSpec::Element(element) => {
                let node = self.append_element(parent, &element.tag);
                self.apply_element_spec(node, element);
                for child in &element.children {
                    self.append_spec(node, child);
                }
            }
        }
    }

    fn apply_element_spec(&mut self, node: NodeId, spec: &ElementSpec) {
        if let Some(id) = &spec.id {
            self.set_id(node, id);
        }
        self.set_style(node, spec.style.clone());
        self.set_bounding_box(node, spec.rect);
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
            detached: false,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            parent,
            NodeData::Element {
                tag: tag.to_string(),
                id: None,
                style: ComputedStyle::default(),
                rect: BoundingBox::default(),
            },
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeData::Text(text.to_string()))
    }

    pub fn set_id(&mut self, node: NodeId, value: &str) {
        if let NodeData::Element { id, .. } = &mut self.nodes[node.0].data {
            *id = Some(value.to_string());
        }
    }

    pub fn set_style(&mut self, node: NodeId, value: ComputedStyle) {
        if let NodeData::Element { style, .. } = &mut self.nodes[node.0].data {
            *style = value;
        }
    }

    pub fn set_bounding_box(&mut self, node: NodeId, value: BoundingBox) {
        if let NodeData::Element { rect, .. } = &mut self.nodes[node.0].data {
            *rect = value;
        }
    }

    /// Marks a node as removed while leaving it linked into its parent, so a
    /// traversal still reaches it and every query on it fails the way a
    /// node torn out of a live tree mid-scan does.
    pub fn detach(&mut self, node: NodeId) {
        self.nodes[node.0].detached = true;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Short `tag#id` label for an element, or a quoted excerpt for text.
    pub fn describe(&self, node: NodeId) -> String {
        let Some(entry) = self.nodes.get(node.0) else {
            return format!("{node:?}");
        };

        match &entry.data {
            NodeData::Element { tag, id: Some(id), .. } => format!("{tag}#{id}"),
            NodeData::Element { tag, .. } => tag.clone(),
            NodeData::Text(text) => {
                let excerpt: String = text.chars().take(24).collect();
                format!("{excerpt:?}")
            }
        }
    }

    /// An element laid out under `display: none` (its own or an
    /// ancestor's) gets no box, whatever rect it was given.
    fn is_undisplayed(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(entry) = self.nodes.get(id.0) else {
                return false;
            };
            if let NodeData::Element { style, .. } = &entry.data
                && style.display.trim().eq_ignore_ascii_case("none")
            {
                return true;
            }
            current = entry.parent;
        }
        false
    }

    fn live(&self, node: NodeId) -> Result<&Node, TreeError> {
        match self.nodes.get(node.0) {
            Some(entry) if !entry.detached => Ok(entry),
            _ => Err(TreeError::detached(node)),
        }
    }
}

impl DocumentTree for Document {
    type NodeId = NodeId;

    fn root(&self) -> NodeId {
        Document::root(self)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.live(node).ok()?.parent
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>, TreeError> {
        Ok(self.live(node)?.children.clone())
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.live(node).ok()?.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.live(node).ok()?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        match &self.live(node).ok()?.data {
            NodeData::Element { id, .. } => id.as_deref(),
            NodeData::Text(_) => None,
        }
    }

    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, TreeError> {
        match &self.live(node)?.data {
            NodeData::Element { style, .. } => Ok(style.clone()),
            NodeData::Text(_) => Err(TreeError::Style(format!(
                "{node:?} is a text node and has no computed style"
            ))),
        }
    }

    fn bounding_box(&self, node: NodeId) -> Result<BoundingBox, TreeError> {
        match &self.live(node)?.data {
            NodeData::Element { .. } if self.is_undisplayed(node) => {
                Ok(BoundingBox::new(0.0, 0.0))
            }
            NodeData::Element { rect, .. } => Ok(*rect),
            NodeData::Text(_) => Err(TreeError::Layout(format!(
                "{node:?} is a text node and has no box of its own"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentError};
    use crate::tree::{DocumentTree, TextTransform, TreeError, Visibility};

    const SAMPLE: &str = r#"{
        "tag": "html",
        "children": [
            { "tag": "head", "children": [ { "tag": "title", "children": ["Sample"] } ] },
            { "tag": "body", "id": "main", "children": [
                "Intro text",
                { "tag": "p", "style": { "text_transform": "uppercase" }, "children": ["shout"] },
                { "tag": "div", "style": { "visibility": "hidden" }, "rect": { "width": 0, "height": 0 } }
            ] }
        ]
    }"#;

    #[test]
    fn loads_nested_json() {
        let doc = Document::from_json(SAMPLE).unwrap();
        let root = doc.root();
        assert_eq!(doc.tag_name(root), Some("html"));

        let top = doc.children(root).unwrap();
        assert_eq!(top.len(), 2);
        let body = top[1];
        assert_eq!(doc.element_id(body), Some("main"));

        let body_children = doc.children(body).unwrap();
        assert_eq!(doc.text(body_children[0]), Some("Intro text"));
        assert_eq!(
            doc.computed_style(body_children[1]).unwrap().text_transform,
            TextTransform::Uppercase
        );

        let hidden = body_children[2];
        assert_eq!(
            doc.computed_style(hidden).unwrap().visibility,
            Visibility::Hidden
        );
        assert!(doc.bounding_box(hidden).unwrap().is_empty());
        assert_eq!(doc.parent(hidden), Some(body));
    }

    #[test]
    fn undisplayed_subtrees_have_no_boxes() {
        let doc = Document::from_json(
            r#"{"tag": "body", "children": [
                {"tag": "div", "style": {"display": "none"}, "children": [
                    {"tag": "span", "rect": {"width": 40, "height": 12}, "children": ["secret"]}
                ]},
                {"tag": "div", "style": {"opacity": 0}, "children": [{"tag": "span"}]}
            ]}"#,
        )
        .unwrap();
        let body = doc.root();
        let [undisplayed, faded] = doc.children(body).unwrap()[..] else {
            panic!("expected two containers");
        };
        let span = doc.children(undisplayed).unwrap()[0];
        let faded_span = doc.children(faded).unwrap()[0];

        assert!(doc.bounding_box(undisplayed).unwrap().is_empty());
        assert!(doc.bounding_box(span).unwrap().is_empty());
        assert!(!doc.bounding_box(body).unwrap().is_empty());
        // Only display affects layout.
        assert!(!doc.bounding_box(faded_span).unwrap().is_empty());
    }

    #[test]
    fn text_root_is_rejected() {
        let err = Document::from_json(r#""just text""#).unwrap_err();
        assert!(matches!(err, DocumentError::EmptyDocument));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = Document::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert_eq!(doc.tag_name(doc.root()), Some("html"));

        let missing = Document::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, DocumentError::Io(_)));
    }

    #[test]
    fn detached_nodes_fail_every_query() {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        let text = doc.append_text(body, "gone");
        doc.detach(body);

        assert!(matches!(doc.children(body), Err(TreeError::Detached(_))));
        assert!(doc.computed_style(body).is_err());
        assert!(doc.bounding_box(body).is_err());
        assert_eq!(doc.tag_name(body), None);
        // The child itself is still reachable.
        assert_eq!(doc.text(text), Some("gone"));
        assert_eq!(doc.children(doc.root()).unwrap(), vec![body]);
    }

    #[test]
    fn describe_labels_nodes() {
        let mut doc = Document::new("html");
        let p = doc.append_element(doc.root(), "p");
        doc.set_id(p, "intro");
        let text = doc.append_text(p, "hello");

        assert_eq!(doc.describe(doc.root()), "html");
        assert_eq!(doc.describe(p), "p#intro");
        assert_eq!(doc.describe(text), "\"hello\"");
    }
}
