use findlight_search::{has_balanced_brackets, is_meaningful_regex};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexCheck {
    pub valid: bool,
    pub error: Option<String>,
    pub balanced: bool,
    pub meaningful: bool,
}

pub fn check(pattern: &str) -> RegexCheck {
    let error = regex_error(pattern);
    RegexCheck {
        valid: error.is_none(),
        error,
        balanced: has_balanced_brackets(pattern),
        meaningful: is_meaningful_regex(pattern),
    }
}

fn regex_error(pattern: &str) -> Option<String> {
    if pattern.trim().is_empty() {
        return Some("pattern is blank".to_string());
    }
    Regex::new(pattern).err().map(|error| error.to_string())
}

pub fn run(pattern: &str) {
    let result = check(pattern);

    println!("Pattern:    {}", pattern);
    match &result.error {
        None => println!("Valid:      yes"),
        Some(error) => println!("Valid:      no\n{}", error),
    }
    println!("Balanced:   {}", yes_no(result.balanced));
    println!("Meaningful: {}", yes_no(result.meaningful));

    if result.valid && !result.meaningful {
        println!();
        println!("Matches are still highlighted, but matched texts are not listed.");
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
