use crate::matcher::MatchSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scroll, used when a fresh search lands on its first match.
    Smooth,
    /// Immediate jump, used while stepping between matches.
    Instant,
}

/// Paints match highlights. `paint` receives the whole set at once;
/// `paint_active` moves the distinct "active" highlight.
pub trait HighlightSink<N> {
    fn paint(&mut self, spans: &[MatchSpan<N>]);

    fn paint_active(&mut self, ordinal: usize, span: &MatchSpan<N>);

    /// Removes every highlight. Must be safe to call when nothing is
    /// painted.
    fn clear(&mut self);
}

pub trait ScrollSink<N> {
    fn scroll_into_view(&mut self, owner: N, behavior: ScrollBehavior);
}

impl<N, F> ScrollSink<N> for F
where
    F: FnMut(N, ScrollBehavior),
{
    fn scroll_into_view(&mut self, owner: N, behavior: ScrollBehavior) {
        self(owner, behavior)
    }
}

/// Sink for headless searches that only need counts and spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<N> HighlightSink<N> for NullSink {
    fn paint(&mut self, _spans: &[MatchSpan<N>]) {}

    fn paint_active(&mut self, _ordinal: usize, _span: &MatchSpan<N>) {}

    fn clear(&mut self) {}
}

impl<N> ScrollSink<N> for NullSink {
    fn scroll_into_view(&mut self, _owner: N, _behavior: ScrollBehavior) {}
}
