//! Finds every non-overlapping match of a compiled pattern in one segment.

use std::{borrow::Cow, ops::Range};

use regex::Regex;

use crate::matcher::MatchSpan;
use crate::pattern::CompiledPattern;
use crate::scanner::TextSegment;
use crate::tree::TextTransform;

/// Applies a case-altering `text-transform` without moving any byte
/// offset. A character whose case mapping would change its encoded length
/// (or expand into several characters, like `ß` → `SS`) is left as is.
pub fn apply_transform(text: &str, transform: TextTransform) -> Cow<'_, str> {
    match transform {
        TextTransform::None => Cow::Borrowed(text),
        TextTransform::Uppercase => Cow::Owned(
            text.chars()
                .map(|ch| same_width(ch, ch.to_uppercase()))
                .collect(),
        ),
        TextTransform::Lowercase => Cow::Owned(
            text.chars()
                .map(|ch| same_width(ch, ch.to_lowercase()))
                .collect(),
        ),
        TextTransform::Capitalize => {
            let mut previous_is_word = false;
            Cow::Owned(
                text.chars()
                    .map(|ch| {
                        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
                        let mapped = if is_word && !previous_is_word {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        };
                        previous_is_word = is_word;
                        mapped
                    })
                    .collect(),
            )
        }
    }
}

fn same_width(original: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(ch), None) if ch.len_utf8() == original.len_utf8() => ch,
        _ => original,
    }
}

/// Byte ranges of all non-empty, non-overlapping matches, left to right.
///
/// Scanning resumes at the end of each match. An empty match advances the
/// cursor by one character so the scan always terminates; empty matches are
/// never reported.
pub fn find_ranges(haystack: &str, regex: &Regex) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut position = 0;

    while position <= haystack.len() {
        let Some(found) = regex.find_at(haystack, position) else {
            break;
        };

        if found.is_empty() {
            match haystack[found.end()..].chars().next() {
                Some(ch) => position = found.end() + ch.len_utf8(),
                None => break,
            }
            continue;
        }

        ranges.push(found.range());
        position = found.end();
    }

    ranges
}

/// Locates matches in a segment. The pattern is tested against the
/// transformed (displayed) text; offsets are valid in the original text and
/// `text` holds what the user sees.
pub fn locate<N: Copy + Eq>(
    segment: &TextSegment<'_, N>,
    pattern: &CompiledPattern,
) -> Vec<MatchSpan<N>> {
    let Some(regex) = pattern.regex() else {
        return Vec::new();
    };

    let displayed = apply_transform(segment.text, segment.transform);
    find_ranges(&displayed, regex)
        .into_iter()
        .map(|range| {
            MatchSpan::new(
                segment.node,
                segment.owner,
                range.start,
                range.end,
                &displayed[range],
            )
        })
        .collect()
}
