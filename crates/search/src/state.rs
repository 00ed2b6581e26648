use crate::classifier::is_meaningful_regex;
use crate::matcher::HighlightSet;
use crate::pattern::{CompiledPattern, SearchOptions};

/// Everything one search produced: its options, the compiled pattern and
/// the resulting highlight set. A session is replaced wholesale by the
/// next search and dropped on clear; it is never patched in place.
#[derive(Debug, Clone)]
pub struct SearchSession<N> {
    options: SearchOptions,
    pattern: CompiledPattern,
    results: HighlightSet<N>,
    matched_texts: Vec<String>,
}

impl<N> SearchSession<N> {
    pub fn new(options: SearchOptions, pattern: CompiledPattern, results: HighlightSet<N>) -> Self {
        // Listing every matched string is only offered for real regexes.
        let matched_texts = if options.use_regex && is_meaningful_regex(&options.keyword) {
            results.matched_texts()
        } else {
            Vec::new()
        };

        Self {
            options,
            pattern,
            results,
            matched_texts,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn results(&self) -> &HighlightSet<N> {
        &self.results
    }

    /// Mutable access for navigation. Spans cannot be added or removed
    /// through `HighlightSet`, only the active ordinal moves.
    pub fn results_mut(&mut self) -> &mut HighlightSet<N> {
        &mut self.results
    }

    pub fn matched_texts(&self) -> &[String] {
        &self.matched_texts
    }

    pub fn match_count(&self) -> usize {
        self.results.len()
    }
}
