//! Depth-first walk yielding visible text segments in document order.

use crate::tree::{DocumentTree, TextTransform, TreeError};
use crate::visibility::{is_excluded, style_is_visible};

/// One contiguous text unit and the element that owns (and styles) it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment<'a, N> {
    pub node: N,
    pub owner: N,
    pub text: &'a str,
    pub transform: TextTransform,
}

struct Frame<N> {
    node: N,
    parent: Option<N>,
}

/// Lazy, single-pass scanner over a [`DocumentTree`].
///
/// Excluded subtrees (non-rendering tags, the overlay) are pruned when
/// first reached, so each node is visited at most once. Whitespace-only
/// text and text whose owning element is not rendered are skipped. A node
/// that fails a tree query is skipped with a warning and the walk goes on.
pub struct TreeScanner<'a, T: DocumentTree> {
    tree: &'a T,
    stack: Vec<Frame<T::NodeId>>,
    last_owner: Option<(T::NodeId, Option<TextTransform>)>,
}

impl<'a, T: DocumentTree> TreeScanner<'a, T> {
    pub fn new(tree: &'a T) -> Self {
        Self {
            tree,
            stack: vec![Frame {
                node: tree.root(),
                parent: None,
            }],
            last_owner: None,
        }
    }

    /// `Some(transform)` when text owned by `owner` is visible.
    fn owner_state(&mut self, owner: T::NodeId) -> Option<TextTransform> {
        if let Some((cached, state)) = self.last_owner
            && cached == owner
        {
            return state;
        }

        let state = match self.evaluate_owner(owner) {
            Ok(state) => state,
            Err(error) => {
                log::warn!("Skipping text owned by {:?}: {}", owner, error);
                None
            }
        };
        self.last_owner = Some((owner, state));
        state
    }

    fn evaluate_owner(&self, owner: T::NodeId) -> Result<Option<TextTransform>, TreeError> {
        if self.tree.bounding_box(owner)?.is_empty() {
            return Ok(None);
        }

        let style = self.tree.computed_style(owner)?;
        Ok(style_is_visible(&style).then_some(style.text_transform))
    }
}

impl<'a, T: DocumentTree> Iterator for TreeScanner<'a, T> {
    type Item = TextSegment<'a, T::NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;

        while let Some(Frame { node, parent }) = self.stack.pop() {
            if let Some(text) = tree.text(node) {
                if text.trim().is_empty() {
                    continue;
                }

                let Some(owner) = parent else {
                    continue;
                };

                if let Some(transform) = self.owner_state(owner) {
                    return Some(TextSegment {
                        node,
                        owner,
                        text,
                        transform,
                    });
                }
                continue;
            }

            if tree.is_element(node) && is_excluded(tree, node) {
                continue;
            }

            match tree.children(node) {
                Ok(children) => self.stack.extend(children.into_iter().rev().map(|child| Frame {
                    node: child,
                    parent: Some(node),
                })),
                Err(error) => log::warn!("Skipping subtree at {:?}: {}", node, error),
            }
        }

        None
    }
}

pub fn scan<T: DocumentTree>(tree: &T) -> TreeScanner<'_, T> {
    TreeScanner::new(tree)
}
