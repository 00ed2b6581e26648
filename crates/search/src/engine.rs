use crate::locator::locate;
use crate::matcher::{Direction, HighlightSet, MatchSpan};
use crate::pattern::{CompiledPattern, SearchOptions};
use crate::scanner::scan;
use crate::sink::{HighlightSink, ScrollBehavior, ScrollSink};
use crate::state::SearchSession;
use crate::tree::DocumentTree;

/// Search-and-highlight engine for one document.
///
/// The engine owns the document accessor and the two rendering
/// collaborators, plus at most one [`SearchSession`]. Every operation is
/// synchronous and infallible: bad patterns and broken tree nodes reduce
/// to fewer (or zero) matches.
pub struct FindEngine<T: DocumentTree, H, S> {
    tree: T,
    highlighter: H,
    scroller: S,
    session: Option<SearchSession<T::NodeId>>,
}

impl<T, H, S> FindEngine<T, H, S>
where
    T: DocumentTree,
    H: HighlightSink<T::NodeId>,
    S: ScrollSink<T::NodeId>,
{
    pub fn new(tree: T, highlighter: H, scroller: S) -> Self {
        Self {
            tree,
            highlighter,
            scroller,
            session: None,
        }
    }

    /// Runs a full scan and returns the number of matches.
    ///
    /// Any previous session and its highlights are discarded first. With at
    /// least one match the first one becomes active and is scrolled into
    /// view.
    pub fn execute_search(&mut self, options: SearchOptions) -> usize {
        self.clear_highlights();

        if options.is_blank() {
            log::debug!("Ignoring blank search keyword");
            return 0;
        }

        log::debug!("Search config: {:?}", options);

        let pattern = CompiledPattern::compile(&options);
        let spans = if pattern.is_none() {
            Vec::new()
        } else {
            collect_spans(&self.tree, &pattern)
        };

        let session = SearchSession::new(options, pattern, HighlightSet::from_spans(spans));
        let count = session.match_count();

        if let Some(first) = session.results().active_span() {
            self.highlighter.paint(session.results().spans());
            self.highlighter.paint_active(1, first);
            self.scroller
                .scroll_into_view(first.owner, ScrollBehavior::Smooth);
        }

        log::debug!(
            "Search for {:?} found {} matches",
            session.options().keyword,
            count
        );
        self.session = Some(session);
        count
    }

    /// Drops the current session and every highlight. Idempotent.
    pub fn clear_highlights(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Discarded previous search session");
        }
        self.highlighter.clear();
    }

    /// Activates the match at `target` (1-based) after applying the
    /// wraparound rule, and returns the resulting ordinal (0 without
    /// matches).
    pub fn navigate(&mut self, target: i64) -> usize {
        let Some(session) = self.session.as_mut() else {
            return 0;
        };

        let index = session.results_mut().navigate(target);
        if let Some(span) = session.results().active_span() {
            self.highlighter.paint_active(index, span);
            self.scroller
                .scroll_into_view(span.owner, ScrollBehavior::Instant);
        }
        index
    }

    pub fn advance(&mut self, direction: Direction) -> usize {
        if self.match_count() == 0 {
            return 0;
        }

        let current = self.active_index() as i64;
        match direction {
            Direction::Forward => self.navigate(current + 1),
            Direction::Backward => self.navigate(current - 1),
        }
    }

    /// Replaces the searched document. The current session is cleared
    /// first because its spans point into the old tree.
    pub fn replace_document(&mut self, tree: T) -> T {
        self.clear_highlights();
        std::mem::replace(&mut self.tree, tree)
    }
}

impl<T: DocumentTree, H, S> FindEngine<T, H, S> {
    /// Matched strings in highlight order; only populated when the last
    /// search used a meaningful regex.
    pub fn matched_texts(&self) -> &[String] {
        self.session
            .as_ref()
            .map(SearchSession::matched_texts)
            .unwrap_or(&[])
    }

    pub fn match_count(&self) -> usize {
        self.session
            .as_ref()
            .map(SearchSession::match_count)
            .unwrap_or(0)
    }

    pub fn active_index(&self) -> usize {
        self.session
            .as_ref()
            .map(|session| session.results().active_index())
            .unwrap_or(0)
    }

    pub fn session(&self) -> Option<&SearchSession<T::NodeId>> {
        self.session.as_ref()
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    pub fn scroller(&self) -> &S {
        &self.scroller
    }
}

fn collect_spans<T: DocumentTree>(tree: &T, pattern: &CompiledPattern) -> Vec<MatchSpan<T::NodeId>> {
    scan(tree)
        .flat_map(|segment| locate(&segment, pattern))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, NodeId};
    use crate::sink::NullSink;
    use crate::tree::{ComputedStyle, OVERLAY_ID, TextTransform};

    #[derive(Debug, Default)]
    struct Recorder {
        painted: Vec<(NodeId, usize, usize)>,
        active: Vec<usize>,
        clears: usize,
    }

    impl HighlightSink<NodeId> for Recorder {
        fn paint(&mut self, spans: &[MatchSpan<NodeId>]) {
            self.painted = spans
                .iter()
                .map(|span| (span.segment, span.start, span.end))
                .collect();
        }

        fn paint_active(&mut self, ordinal: usize, _span: &MatchSpan<NodeId>) {
            self.active.push(ordinal);
        }

        fn clear(&mut self) {
            self.painted.clear();
            self.active.clear();
            self.clears += 1;
        }
    }

    #[derive(Debug, Default)]
    struct Scrolls(Vec<(NodeId, ScrollBehavior)>);

    impl ScrollSink<NodeId> for Scrolls {
        fn scroll_into_view(&mut self, owner: NodeId, behavior: ScrollBehavior) {
            self.0.push((owner, behavior));
        }
    }

    fn recording_engine(doc: Document) -> FindEngine<Document, Recorder, Scrolls> {
        FindEngine::new(doc, Recorder::default(), Scrolls::default())
    }

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        let p = doc.append_element(body, "p");
        let text = doc.append_text(p, "Cat cat CAT");
        (doc, p, text)
    }

    #[test]
    fn scenario_cat_counts() {
        let (doc, _, text) = sample();
        let mut engine = FindEngine::new(doc, Recorder::default(), NullSink);

        assert_eq!(engine.execute_search(SearchOptions::new("cat")), 3);
        assert_eq!(
            engine.highlighter().painted,
            vec![(text, 0, 3), (text, 4, 7), (text, 8, 11)]
        );
        assert_eq!(engine.active_index(), 1);

        let sensitive = SearchOptions::new("cat").with_case_sensitive(true);
        assert_eq!(engine.execute_search(sensitive), 1);
        assert_eq!(engine.highlighter().painted, vec![(text, 4, 7)]);
    }

    #[test]
    fn first_match_scrolls_smoothly_and_navigation_instantly() {
        let (doc, p, _) = sample();
        let mut engine = recording_engine(doc);

        engine.execute_search(SearchOptions::new("cat"));
        engine.advance(Direction::Forward);

        assert_eq!(
            engine.scroller().0,
            vec![(p, ScrollBehavior::Smooth), (p, ScrollBehavior::Instant)]
        );
    }

    #[test]
    fn closures_work_as_scroll_sinks() {
        let (doc, p, _) = sample();
        let mut seen = Vec::new();
        {
            let sink = |owner: NodeId, behavior: ScrollBehavior| seen.push((owner, behavior));
            let mut engine = FindEngine::new(doc, NullSink, sink);
            engine.execute_search(SearchOptions::new("cat"));
        }
        assert_eq!(seen, vec![(p, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn invalid_regex_returns_zero() {
        let (doc, _, _) = sample();
        let mut engine = recording_engine(doc);

        let options = SearchOptions::new("(unbalanced").with_regex(true);
        assert_eq!(engine.execute_search(options), 0);
        assert!(engine.highlighter().painted.is_empty());
        assert_eq!(engine.navigate(3), 0);
        assert!(engine.session().unwrap().pattern().is_none());
    }

    #[test]
    fn whole_word_does_not_rescue_a_malformed_regex() {
        let mut doc = Document::new("html");
        doc.append_text(doc.root(), "xy");
        let mut engine = FindEngine::new(doc, NullSink, NullSink);

        let options = SearchOptions::new("x)(y")
            .with_regex(true)
            .with_whole_word(true);
        assert_eq!(engine.execute_search(options), 0);
    }

    #[test]
    fn blank_keyword_skips_scan() {
        let (doc, _, _) = sample();
        let mut engine = recording_engine(doc);

        assert_eq!(engine.execute_search(SearchOptions::new("   ")), 0);
        assert!(engine.session().is_none());
        assert_eq!(engine.highlighter().clears, 1);
    }

    #[test]
    fn broad_regex_counts_but_lists_nothing() {
        let (doc, _, _) = sample();
        let mut engine = recording_engine(doc);

        let count = engine.execute_search(SearchOptions::new(".").with_regex(true));
        assert_eq!(count, "Cat cat CAT".chars().count());
        assert_eq!(engine.highlighter().painted.len(), count);
        assert!(engine.matched_texts().is_empty());
    }

    #[test]
    fn meaningful_regex_lists_matches_in_order() {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        doc.append_text(body, "call 555-1234 or");
        let p = doc.append_element(body, "p");
        doc.append_text(p, "555-9876 today");
        let mut engine = FindEngine::new(doc, NullSink, NullSink);

        let count = engine.execute_search(SearchOptions::new(r"\d{3}-\d{4}").with_regex(true));
        assert_eq!(count, 2);
        assert_eq!(engine.matched_texts(), ["555-1234", "555-9876"]);
    }

    #[test]
    fn scenario_navigation_wraps() {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        doc.append_text(body, "x x x x x");
        let mut engine = recording_engine(doc);

        assert_eq!(engine.execute_search(SearchOptions::new("x")), 5);
        assert_eq!(engine.navigate(5), 5);
        assert_eq!(engine.navigate(6), 1);
        assert_eq!(engine.navigate(0), 5);
        assert_eq!(engine.highlighter().active, vec![1, 5, 1, 5]);
    }

    #[test]
    fn advance_cycles_and_inverts() {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        doc.append_text(body, "a b a b a");
        let mut engine = FindEngine::new(doc, NullSink, NullSink);
        assert_eq!(engine.execute_search(SearchOptions::new("a")), 3);

        for _ in 0..3 {
            engine.advance(Direction::Forward);
        }
        assert_eq!(engine.active_index(), 1);
        assert_eq!(engine.advance(Direction::Backward), 3);
        assert_eq!(engine.advance(Direction::Forward), 1);
    }

    #[test]
    fn single_match_wraps_to_itself() {
        let (doc, _, _) = sample();
        let mut engine = FindEngine::new(doc, NullSink, NullSink);
        assert_eq!(engine.execute_search(SearchOptions::new("cat").with_case_sensitive(true)), 1);
        assert_eq!(engine.advance(Direction::Forward), 1);
        assert_eq!(engine.advance(Direction::Backward), 1);
    }

    #[test]
    fn no_session_navigation_returns_zero() {
        let (doc, _, _) = sample();
        let mut engine = FindEngine::new(doc, NullSink, NullSink);
        for target in [-1, 0, 1, 7] {
            assert_eq!(engine.navigate(target), 0);
        }
        assert_eq!(engine.advance(Direction::Forward), 0);

        engine.execute_search(SearchOptions::new("dog"));
        assert_eq!(engine.navigate(4), 0);
        assert_eq!(engine.advance(Direction::Backward), 0);
    }

    #[test]
    fn clear_is_idempotent() {
        let (doc, _, _) = sample();
        let mut engine = recording_engine(doc);
        engine.execute_search(SearchOptions::new("cat"));

        engine.clear_highlights();
        assert!(engine.session().is_none());
        assert!(engine.highlighter().painted.is_empty());
        assert_eq!(engine.match_count(), 0);

        engine.clear_highlights();
        assert!(engine.session().is_none());
        assert!(engine.highlighter().painted.is_empty());
        assert_eq!(engine.match_count(), 0);
        assert_eq!(engine.active_index(), 0);
    }

    #[test]
    fn new_search_replaces_previous_highlights() {
        let (doc, _, text) = sample();
        let mut engine = recording_engine(doc);
        engine.execute_search(SearchOptions::new("cat"));
        engine.navigate(3);

        assert_eq!(engine.execute_search(SearchOptions::new("CAT").with_case_sensitive(true)), 1);
        assert_eq!(engine.highlighter().painted, vec![(text, 8, 11)]);
        assert_eq!(engine.highlighter().active, vec![1]);
        assert_eq!(engine.active_index(), 1);

        assert_eq!(engine.execute_search(SearchOptions::new("zebra")), 0);
        assert!(engine.highlighter().painted.is_empty());
    }

    #[test]
    fn hidden_and_script_text_is_never_matched() {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        let hidden = doc.append_element(body, "div");
        doc.set_style(hidden, ComputedStyle::hidden());
        doc.append_text(hidden, "needle");
        let script = doc.append_element(body, "script");
        let deep = doc.append_element(script, "span");
        doc.append_text(deep, "needle");
        let overlay = doc.append_element(body, "div");
        doc.set_id(overlay, OVERLAY_ID);
        doc.append_text(overlay, "needle");
        doc.append_text(body, "one needle");

        let mut engine = FindEngine::new(doc, NullSink, NullSink);
        assert_eq!(engine.execute_search(SearchOptions::new("needle")), 1);
    }

    #[test]
    fn text_under_an_undisplayed_ancestor_is_never_matched() {
        let doc = Document::from_json(
            r#"{"tag": "body", "children": [
                {"tag": "div", "style": {"display": "none"}, "children": [
                    {"tag": "span", "children": ["secret"]}
                ]},
                {"tag": "p", "children": ["no secrets here"]}
            ]}"#,
        )
        .unwrap();
        let mut engine = FindEngine::new(doc, NullSink, NullSink);

        assert_eq!(engine.execute_search(SearchOptions::new("secret")), 1);
        let span = &engine.session().unwrap().results().spans()[0];
        assert_eq!(span.start, 3);
    }

    #[test]
    fn spans_follow_document_order_across_segments() {
        let mut doc = Document::new("html");
        let body = doc.append_element(doc.root(), "body");
        let first = doc.append_text(body, "ab ab");
        let p = doc.append_element(body, "p");
        let second = doc.append_text(p, "ab");
        let mut engine = FindEngine::new(doc, NullSink, NullSink);

        engine.execute_search(SearchOptions::new("ab"));
        let spans: Vec<_> = engine
            .session()
            .unwrap()
            .results()
            .spans()
            .iter()
            .map(|span| (span.segment, span.start))
            .collect();
        assert_eq!(spans, vec![(first, 0), (first, 3), (second, 0)]);
    }

    #[test]
    fn text_transform_affects_case_sensitive_matching() {
        let mut doc = Document::new("html");
        let shout = doc.append_element(doc.root(), "p");
        doc.set_style(
            shout,
            ComputedStyle {
                text_transform: TextTransform::Uppercase,
                ..ComputedStyle::default()
            },
        );
        let text = doc.append_text(shout, "warning: low disk");
        let mut engine = FindEngine::new(doc, NullSink, NullSink);

        let options = SearchOptions::new("LOW").with_case_sensitive(true);
        assert_eq!(engine.execute_search(options), 1);
        let span = engine.session().unwrap().results().active_span().unwrap().clone();
        assert_eq!((span.segment, span.start, span.end), (text, 9, 12));
        assert_eq!(span.text, "LOW");
    }

    #[test]
    fn replacing_document_clears_session() {
        let (doc, _, _) = sample();
        let mut engine = recording_engine(doc);
        assert_eq!(engine.execute_search(SearchOptions::new("cat")), 3);

        let old = engine.replace_document(Document::new("html"));
        assert!(engine.session().is_none());
        assert_eq!(engine.navigate(1), 0);
        assert_eq!(old.len(), 4);
        assert_eq!(engine.tree().len(), 1);
    }
}
