//! Heuristic gate deciding whether a regex is "meaningful" enough to list
//! every matched string. The thresholds are fixed constants, not derived
//! from a grammar.

use std::sync::LazyLock;

use regex::Regex;

/// Characters whose presence marks a pattern as using regex syntax.
const METACHARACTERS: &[char] = &[
    '\\', '^', '$', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|',
];

/// Tokens counted when deciding whether a pattern is just plain text.
const STRUCTURAL_TOKENS: &[char] = &['[', ']', '{', '}', '(', ')', '|', '+', '*', '?'];

const PLAIN_TEXT_MAX_LEN: usize = 3;
const PLAIN_TEXT_MAX_CONSTRUCTS: usize = 1;

const REDUNDANT_QUANTIFIER_IDIOMS: &[&str] = &[".*?", ".+?", ".?"];

/// Canonical forms that match (almost) any input.
static OVERLY_BROAD: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^\.[*+?]?$",
        r"^\[\\?s\\?S\][*+?]?$",
        r"^\[\\?S\\?s\][*+?]?$",
        r"^\[\\?w\\?W\][*+?]?$",
        r"^\[\\?W\\?w\][*+?]?$",
        r"^\[\\?d\\?D\][*+?]?$",
        r"^\[\\?D\\?d\][*+?]?$",
        r"^\[\\u0000-\\uFFFF\][*+?]?$",
        r"^\[\^\\?r?\\?n\]\*$",
    ]
    .into_iter()
    .filter_map(|source| Regex::new(source).ok())
    .collect()
});

/// Returns true only for a non-blank, syntactically valid regex that uses
/// regex syntax, has balanced brackets and is neither overly broad, nearly
/// plain text, nor a bare quantifier idiom.
pub fn is_meaningful_regex(pattern: &str) -> bool {
    if pattern.trim().is_empty() {
        return false;
    }

    if Regex::new(pattern).is_err() {
        return false;
    }

    if !pattern.contains(METACHARACTERS) {
        return false;
    }

    if !has_balanced_brackets(pattern) {
        return false;
    }

    let body = strip_anchors(pattern);
    !is_overly_broad(body) && !is_essentially_plain_text(body) && !is_redundant_quantifier(body)
}

/// Stack-based bracket check where a backslash escapes exactly the next
/// character.
pub fn has_balanced_brackets(pattern: &str) -> bool {
    let mut stack = Vec::new();
    let mut escaped = false;

    for ch in pattern.chars() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '(' | '[' | '{' => stack.push(ch),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }

    stack.is_empty()
}

/// Drops one leading `^` and one trailing `$`.
fn strip_anchors(pattern: &str) -> &str {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    body.strip_suffix('$').unwrap_or(body)
}

fn is_overly_broad(body: &str) -> bool {
    OVERLY_BROAD.iter().any(|regex| regex.is_match(body))
}

fn is_essentially_plain_text(body: &str) -> bool {
    if body.chars().count() > PLAIN_TEXT_MAX_LEN {
        return false;
    }

    let mut constructs = 0;
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            // An escaped pair is a single literal.
            chars.next();
            continue;
        }
        if STRUCTURAL_TOKENS.contains(&ch) {
            constructs += 1;
        }
    }

    constructs <= PLAIN_TEXT_MAX_CONSTRUCTS
}

fn is_redundant_quantifier(body: &str) -> bool {
    REDUNDANT_QUANTIFIER_IDIOMS.contains(&body)
}
