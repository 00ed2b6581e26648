use std::fmt::Write as _;

use anyhow::Context;
use findlight_search::{Document, FindEngine, NullSink, SearchOptions};
use serde::Serialize;

use crate::SearchArgs;
use crate::config::SearchDefaults;

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub count: usize,
    pub matches: Vec<MatchEntry>,
    pub matched_texts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchEntry {
    pub ordinal: usize,
    pub owner: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

pub fn run(args: SearchArgs) -> anyhow::Result<()> {
    let document = Document::from_path(&args.file)
        .with_context(|| format!("failed to load document {}", args.file.display()))?;

    log::debug!("Loaded {} nodes from {}", document.len(), args.file.display());

    let options = search_options(&args, SearchDefaults::load());
    log::debug!("Searching with {:?}", options);
    let report = search_document(document, options);
    log::debug!("{} matches", report.count);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

/// Command-line flags switch toggles on; the config file supplies the rest.
pub fn search_options(args: &SearchArgs, defaults: SearchDefaults) -> SearchOptions {
    SearchOptions::new(args.keyword.as_str())
        .with_case_sensitive(args.case_sensitive || defaults.case_sensitive)
        .with_whole_word(args.whole_word || defaults.whole_word)
        .with_regex(args.regex || defaults.regex)
}

pub fn search_document(document: Document, options: SearchOptions) -> SearchReport {
    let mut engine = FindEngine::new(document, NullSink, NullSink);
    let count = engine.execute_search(options);

    let matches = engine
        .session()
        .map(|session| {
            session
                .results()
                .spans()
                .iter()
                .enumerate()
                .map(|(index, span)| MatchEntry {
                    ordinal: index + 1,
                    owner: engine.tree().describe(span.owner),
                    start: span.start,
                    end: span.end,
                    text: span.text.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    SearchReport {
        count,
        matches,
        matched_texts: engine.matched_texts().to_vec(),
    }
}

pub fn format_report(report: &SearchReport) -> String {
    let mut out = String::new();
    for entry in &report.matches {
        let _ = writeln!(
            out,
            "{:>4}  {:<16} {}..{}  {}",
            entry.ordinal, entry.owner, entry.start, entry.end, entry.text
        );
    }
    let _ = writeln!(out, "{} matches", report.count);

    if !report.matched_texts.is_empty() {
        out.push_str("\nMatched texts:\n");
        for text in &report.matched_texts {
            let _ = writeln!(out, "  {}", text);
        }
    }
    out
}
