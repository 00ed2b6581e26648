#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn delta(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// One located match. Offsets are UTF-8 byte offsets into the segment's
/// original text and always fall on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan<N> {
    pub segment: N,
    pub owner: N,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl<N: Copy + Eq> MatchSpan<N> {
    pub fn new(segment: N, owner: N, start: usize, end: usize, text: impl Into<String>) -> Self {
        debug_assert!(start < end, "empty or inverted span {start}..{end}");
        Self {
            segment,
            owner,
            start,
            end,
            text: text.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, segment: N, offset: usize) -> bool {
        self.segment == segment && offset >= self.start && offset < self.end
    }
}

/// Ordered matches from one search plus the 1-based active ordinal
/// (0 when there are no matches).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSet<N> {
    spans: Vec<MatchSpan<N>>,
    active: usize,
}

impl<N> Default for HighlightSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> HighlightSet<N> {
    pub fn new() -> Self {
        Self {
            spans: Vec::new(),
            active: 0,
        }
    }

    pub fn from_spans(spans: Vec<MatchSpan<N>>) -> Self {
        let active = if spans.is_empty() { 0 } else { 1 };
        Self { spans, active }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[MatchSpan<N>] {
        &self.spans
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_span(&self) -> Option<&MatchSpan<N>> {
        self.active.checked_sub(1).and_then(|i| self.spans.get(i))
    }

    /// `(active, total)`, as shown in a "3/7" counter.
    pub fn position(&self) -> Option<(usize, usize)> {
        (self.active > 0).then_some((self.active, self.spans.len()))
    }

    /// Maps a requested ordinal onto `1..=len`: anything below 1 lands on
    /// the last match, anything past the end lands on the first.
    pub fn wrap_ordinal(&self, target: i64) -> usize {
        let len = self.spans.len();
        if len == 0 {
            return 0;
        }

        if target < 1 {
            len
        } else if target > len as i64 {
            1
        } else {
            target as usize
        }
    }

    pub fn navigate(&mut self, target: i64) -> usize {
        self.active = self.wrap_ordinal(target);
        self.active
    }

    pub fn advance(&mut self, direction: Direction) -> usize {
        if self.spans.is_empty() {
            return 0;
        }
        self.navigate(self.active as i64 + direction.delta())
    }

    pub fn matched_texts(&self) -> Vec<String> {
        self.spans.iter().map(|span| span.text.clone()).collect()
    }
}

impl<N: Copy + Eq> HighlightSet<N> {
    pub fn spans_in(&self, segment: N) -> impl Iterator<Item = &MatchSpan<N>> {
        self.spans.iter().filter(move |span| span.segment == segment)
    }

    pub fn is_active_match(&self, segment: N, offset: usize) -> bool {
        self.active_span()
            .map(|span| span.contains(segment, offset))
            .unwrap_or(false)
    }
}
