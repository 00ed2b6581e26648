use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// ASCII-only word boundary: letters outside `[A-Za-z0-9_]` count as
/// non-word characters.
const WORD_BOUNDARY: &str = r"(?-u:\b)";

/// One search request as typed by the user. `keyword` is kept verbatim;
/// only the emptiness check looks at its trimmed form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub keyword: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub use_regex: bool,
}

impl SearchOptions {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn with_whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    pub fn with_regex(mut self, value: bool) -> Self {
        self.use_regex = value;
        self
    }

    /// True when the keyword is empty or whitespace only, which means
    /// "no search" rather than "search for nothing".
    pub fn is_blank(&self) -> bool {
        self.keyword.trim().is_empty()
    }
}

/// Search pattern derived from [`SearchOptions`].
///
/// Compilation never fails outward: a blank keyword or a malformed regex
/// produces the "no pattern" sentinel, which matches nothing.
#[derive(Debug, Clone, Default)]
pub struct CompiledPattern {
    regex: Option<Regex>,
}

impl CompiledPattern {
    pub fn none() -> Self {
        Self { regex: None }
    }

    pub fn compile(options: &SearchOptions) -> Self {
        if options.is_blank() {
            return Self::none();
        }

        let body = if options.use_regex {
            options.keyword.clone()
        } else {
            regex::escape(&options.keyword)
        };

        // The wrapper's group could absorb a stray `)(` pair, so the body
        // has to stand on its own first.
        if options.whole_word
            && let Err(error) = RegexBuilder::new(&body).build()
        {
            return Self::rejected(options, &error);
        }

        let source = if options.whole_word {
            format!("{WORD_BOUNDARY}(?:{body}){WORD_BOUNDARY}")
        } else {
            body
        };

        match RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
        {
            Ok(regex) => Self { regex: Some(regex) },
            Err(error) => Self::rejected(options, &error),
        }
    }

    fn rejected(options: &SearchOptions, error: &regex::Error) -> Self {
        log::warn!(
            "Rejecting search pattern {:?}: {}",
            options.keyword,
            error
        );
        Self::none()
    }

    pub fn is_none(&self) -> bool {
        self.regex.is_none()
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    /// The final regex source, after escaping and word-boundary wrapping.
    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }
}
