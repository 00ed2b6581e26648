//! Terminal rendering of highlights.
//!
//! The worker thread paints into a shared [`HighlightBoard`] through
//! [`BoardSink`]; the host reads the board back and renders it with ANSI
//! 256-color backgrounds.

use std::{fmt::Write as _, sync::Arc};

use findlight_search::{
    Document, DocumentTree, HighlightSet, HighlightSink, MatchSpan, NodeId, ScrollBehavior,
    ScrollSink,
};
use parking_lot::Mutex;

const RESET: &str = "\x1b[0m";
const SCROLL_MARKER: &str = ">";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightBoard {
    highlights: HighlightSet<NodeId>,
    scrolled: Option<(NodeId, ScrollBehavior)>,
}

impl HighlightBoard {
    pub fn spans(&self) -> &[MatchSpan<NodeId>] {
        self.highlights.spans()
    }

    pub fn active(&self) -> usize {
        self.highlights.active_index()
    }

    pub fn scrolled(&self) -> Option<(NodeId, ScrollBehavior)> {
        self.scrolled
    }

    /// `current/total`, `0/0` when nothing is highlighted.
    pub fn statistic(&self) -> String {
        let (active, total) = self.highlights.position().unwrap_or((0, 0));
        format!("{}/{}", active, total)
    }
}

pub type SharedBoard = Arc<Mutex<HighlightBoard>>;

/// Highlight and scroll sink writing into a [`SharedBoard`].
#[derive(Debug, Clone, Default)]
pub struct BoardSink {
    board: SharedBoard,
}

impl BoardSink {
    pub fn new(board: SharedBoard) -> Self {
        Self { board }
    }
}

impl HighlightSink<NodeId> for BoardSink {
    fn paint(&mut self, spans: &[MatchSpan<NodeId>]) {
        self.board.lock().highlights = HighlightSet::from_spans(spans.to_vec());
    }

    fn paint_active(&mut self, ordinal: usize, _span: &MatchSpan<NodeId>) {
        self.board.lock().highlights.navigate(ordinal as i64);
    }

    fn clear(&mut self) {
        *self.board.lock() = HighlightBoard::default();
    }
}

impl ScrollSink<NodeId> for BoardSink {
    fn scroll_into_view(&mut self, owner: NodeId, behavior: ScrollBehavior) {
        self.board.lock().scrolled = Some((owner, behavior));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub highlight: u8,
    pub active: u8,
}

/// Renders the statistic line followed by every text segment that holds at
/// least one match, in document order. The segment owning the scroll target
/// is prefixed with `>`.
pub fn render_board(board: &HighlightBoard, document: &Document, palette: Palette) -> String {
    let mut out = board.statistic();
    out.push('\n');

    let highlights = &board.highlights;
    let active_segment = highlights.active_span().map(|span| span.segment);
    let scrolled_owner = board.scrolled().map(|(owner, _)| owner);

    let mut segments: Vec<(NodeId, NodeId)> = Vec::new();
    for span in highlights.spans() {
        if segments.last().map(|(segment, _)| *segment) != Some(span.segment) {
            segments.push((span.segment, span.owner));
        }
    }

    for (segment, owner) in segments {
        let marker = if scrolled_owner == Some(owner) && active_segment == Some(segment) {
            SCROLL_MARKER
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {}: {}",
            marker,
            document.describe(owner),
            paint_segment(document, highlights, segment, palette)
        );
    }

    out
}

fn paint_segment(
    document: &Document,
    highlights: &HighlightSet<NodeId>,
    segment: NodeId,
    palette: Palette,
) -> String {
    let Some(text) = document.text(segment) else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in highlights.spans_in(segment) {
        if span.start < cursor || span.end > text.len() {
            continue;
        }

        out.push_str(&text[cursor..span.start]);
        let color = if highlights.is_active_match(segment, span.start) {
            palette.active
        } else {
            palette.highlight
        };
        let _ = write!(out, "\x1b[30;48;5;{}m{}{}", color, span.text, RESET);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
