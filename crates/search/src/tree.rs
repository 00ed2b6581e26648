//! Read-only capability over a rendered, styled document tree.
//!
//! The engine never walks a concrete DOM. Everything it needs (structure,
//! text, tags, computed style and layout) is asked through [`DocumentTree`],
//! so a live renderer, the in-memory [`crate::Document`] or a test fake can
//! all be searched the same way.

use std::fmt::Debug;

use serde::Deserialize;
use thiserror::Error;

/// Element id reserved for the search overlay itself. Nothing inside an
/// element carrying this id is ever treated as searchable text.
pub const OVERLAY_ID: &str = "__findlight_overlay__";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} is no longer attached to the document")]
    Detached(String),

    #[error("style computation failed: {0}")]
    Style(String),

    #[error("layout unavailable: {0}")]
    Layout(String),
}

impl TreeError {
    pub fn detached(node: impl Debug) -> Self {
        Self::Detached(format!("{node:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

/// Case-altering `text-transform` values. Length-changing transforms are
/// not representable, which keeps transformed offsets valid in the
/// original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: Visibility,
    pub opacity: f32,
    pub clip: String,
    pub clip_path: String,
    pub text_transform: TextTransform,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "inline".to_string(),
            visibility: Visibility::Visible,
            opacity: 1.0,
            clip: "auto".to_string(),
            clip_path: "none".to_string(),
            text_transform: TextTransform::None,
        }
    }
}

impl ComputedStyle {
    pub fn hidden() -> Self {
        Self {
            display: "none".to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Abstract access to a document tree.
///
/// Nodes are either elements (`tag_name` is `Some`) or text nodes (`text`
/// is `Some`). Style and layout queries are fallible because a live tree
/// can change underneath a scan; callers skip the affected node instead of
/// aborting.
pub trait DocumentTree {
    type NodeId: Copy + Eq + Debug;

    fn root(&self) -> Self::NodeId;

    fn parent(&self, node: Self::NodeId) -> Option<Self::NodeId>;

    /// Children in document order.
    fn children(&self, node: Self::NodeId) -> Result<Vec<Self::NodeId>, TreeError>;

    fn text(&self, node: Self::NodeId) -> Option<&str>;

    fn tag_name(&self, node: Self::NodeId) -> Option<&str>;

    fn element_id(&self, node: Self::NodeId) -> Option<&str>;

    fn computed_style(&self, node: Self::NodeId) -> Result<ComputedStyle, TreeError>;

    fn bounding_box(&self, node: Self::NodeId) -> Result<BoundingBox, TreeError>;

    fn is_element(&self, node: Self::NodeId) -> bool {
        self.tag_name(node).is_some()
    }
}
