//! In-document find for Findlight.
//!
//! Walks a rendered document tree, matches visible text against a literal or
//! regex keyword and tracks which match is active. Rendering is delegated to
//! [`HighlightSink`] and [`ScrollSink`] implementations.

mod classifier;
mod document;
mod engine;
mod locator;
mod matcher;
mod pattern;
mod scanner;
mod sink;
mod state;
#[cfg(test)]
mod testing;
mod tree;
mod visibility;

pub use classifier::{has_balanced_brackets, is_meaningful_regex};
pub use document::{Document, DocumentError, NodeId};
pub use engine::FindEngine;
pub use locator::{apply_transform, find_ranges, locate};
pub use matcher::{Direction, HighlightSet, MatchSpan};
pub use pattern::{CompiledPattern, SearchOptions};
pub use scanner::{TextSegment, TreeScanner, scan};
pub use sink::{HighlightSink, NullSink, ScrollBehavior, ScrollSink};
pub use state::SearchSession;
pub use tree::{
    BoundingBox, ComputedStyle, DocumentTree, OVERLAY_ID, TextTransform, TreeError, Visibility,
};
pub use visibility::{
    is_element_visible, is_excluded, is_rendered, is_special_tag, is_text_visible,
    style_is_visible,
};
