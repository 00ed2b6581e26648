//! Decides whether text in the tree is presently visible to a user.
//!
//! Two kinds of checks exist. Exclusion (non-rendering tags and the search
//! overlay) applies to every ancestor of a text node. Rendering checks
//! (box, display, visibility, opacity, clipping) apply only to the text's
//! direct owning element; hidden containers further up are not inspected.

use crate::tree::{ComputedStyle, DocumentTree, OVERLAY_ID, TreeError, Visibility};

/// Tags whose content is never rendered as page text.
const SPECIAL_TAGS: &[&str] = &["script", "style", "noscript", "meta", "head", "title"];

/// `clip-path` shapes that collapse an element to nothing.
const COLLAPSED_CLIP_PATHS: &[&str] = &[
    "rect(0px, 0px, 0px, 0px)",
    "inset(0% 0% 0% 0%)",
    "inset(0px 0px 0px 0px)",
    "circle(0px",
    "ellipse(0px 0px",
    "polygon()",
    "path(\"\")",
    "path('')",
];

pub fn is_special_tag(tag: &str) -> bool {
    SPECIAL_TAGS
        .iter()
        .any(|special| special.eq_ignore_ascii_case(tag))
}

/// True for elements whose whole subtree is excluded from searching: the
/// non-rendering tags and the overlay container.
pub fn is_excluded<T: DocumentTree>(tree: &T, element: T::NodeId) -> bool {
    if tree.element_id(element) == Some(OVERLAY_ID) {
        return true;
    }

    tree.tag_name(element).is_some_and(is_special_tag)
}

pub fn style_is_visible(style: &ComputedStyle) -> bool {
    if style.display.trim().eq_ignore_ascii_case("none") {
        return false;
    }

    if style.visibility != Visibility::Visible {
        return false;
    }

    if !(style.opacity > 0.0) {
        return false;
    }

    let clip = style.clip.trim();
    if !clip.is_empty() && clip != "auto" && clip.contains("rect(0") {
        return false;
    }

    !COLLAPSED_CLIP_PATHS
        .iter()
        .any(|shape| style.clip_path.contains(shape))
}

/// Geometric and style visibility of a single element, ignoring ancestors.
pub fn is_rendered<T: DocumentTree>(tree: &T, element: T::NodeId) -> Result<bool, TreeError> {
    if tree.bounding_box(element)?.is_empty() {
        return Ok(false);
    }

    Ok(style_is_visible(&tree.computed_style(element)?))
}

/// Full check for an element: rendered itself, and neither it nor any
/// ancestor is excluded.
pub fn is_element_visible<T: DocumentTree>(
    tree: &T,
    element: T::NodeId,
) -> Result<bool, TreeError> {
    if has_excluded_ancestor_or_self(tree, element) {
        return Ok(false);
    }

    is_rendered(tree, element)
}

/// A text node is visible when its owning element is rendered and no
/// element between it and the root is excluded.
pub fn is_text_visible<T: DocumentTree>(tree: &T, text: T::NodeId) -> Result<bool, TreeError> {
    let Some(owner) = tree.parent(text) else {
        return Ok(false);
    };

    if !tree.is_element(owner) {
        return Ok(false);
    }

    is_element_visible(tree, owner)
}

fn has_excluded_ancestor_or_self<T: DocumentTree>(tree: &T, node: T::NodeId) -> bool {
    let mut current = Some(node);
    while let Some(element) = current {
        if is_excluded(tree, element) {
            return true;
        }
        current = tree.parent(element);
    }
    false
}
