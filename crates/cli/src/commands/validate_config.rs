use anyhow::{Context, anyhow, bail};

use crate::config::{config_path, parse_bool};

const BOOL_KEYS: &[&str] = &[
    "case_sensitive",
    "whole_word",
    "regex",
    "use_regex",
    "show_matched_texts",
];

const SIZE_KEYS: &[(&str, usize, usize)] = &[("history_size", 1, 100), ("pin_size", 1, 20)];

const COLOR_KEYS: &[&str] = &["highlight_color", "active_highlight_color"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate(contents: &str) -> Validation {
    let mut result = Validation::default();

    for (line_num, line) in contents.lines().enumerate() {
        let line_num = line_num + 1;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            result.errors.push(format!(
                "Line {}: Invalid syntax. Expected 'key = value'",
                line_num
            ));
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        let name = key.to_ascii_lowercase();
        let name = name.as_str();

        if BOOL_KEYS.contains(&name) {
            if parse_bool(value).is_none() {
                result.errors.push(format!(
                    "Line {}: {} must be 'true' or 'false'",
                    line_num, key
                ));
            }
            continue;
        }

        if let Some((_, min, max)) = SIZE_KEYS.iter().find(|(size_key, _, _)| *size_key == name) {
            match value.parse::<usize>() {
                Ok(size) if size < *min || size > *max => result.warnings.push(format!(
                    "Line {}: {} = {} is outside {}..={} and will be clamped",
                    line_num, key, size, min, max
                )),
                Ok(_) => {}
                Err(_) => result.errors.push(format!(
                    "Line {}: {} must be a positive integer",
                    line_num, key
                )),
            }
            continue;
        }

        if COLOR_KEYS.contains(&name) {
            if value.parse::<u8>().is_err() {
                result.errors.push(format!(
                    "Line {}: {} must be an ANSI color index between 0 and 255",
                    line_num, key
                ));
            }
            continue;
        }

        result
            .warnings
            .push(format!("Line {}: Unknown key '{}'", line_num, key));
    }

    result
}

pub fn run() -> anyhow::Result<()> {
    let path = config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;

    println!("Config file: {}", path.display());

    if !path.exists() {
        println!("Status: File does not exist (using defaults)");
        println!("Result: Valid");
        return Ok(());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let result = validate(&contents);

    // Print results
    if result.errors.is_empty() && result.warnings.is_empty() {
        println!("Status: Valid");
        return Ok(());
    }

    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &result.errors {
            println!("  {}", error);
        }
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  {}", warning);
        }
    }

    println!();
    if result.is_valid() {
        println!("Result: Valid (with warnings)");
        Ok(())
    } else {
        println!("Result: Invalid");
        bail!("{} error(s) in {}", result.errors.len(), path.display())
    }
}
