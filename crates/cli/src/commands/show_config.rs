use anyhow::{Context, anyhow};

use crate::config::config_path;

const DEFAULT_VALUES: &[(&str, &str)] = &[
    ("case_sensitive", "false"),
    ("whole_word", "false"),
    ("regex", "false"),
    ("history_size", "20"),
    ("pin_size", "5"),
    ("highlight_color", "226"),
    ("active_highlight_color", "208"),
    ("show_matched_texts", "true"),
];

pub fn run() -> anyhow::Result<()> {
    let path = config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;

    if !path.exists() {
        println!("# Config file: {} (not created yet)", path.display());
        println!("# Using default configuration");
        println!();
        print_defaults();
        return Ok(());
    }

    println!("# Config file: {}", path.display());
    println!();

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    if contents.trim().is_empty() {
        println!("# (empty file - using defaults)");
        println!();
        print_defaults();
    } else {
        print!("{}", contents);
        if !contents.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn print_defaults() {
    println!("# Default values:");
    for (key, value) in DEFAULT_VALUES {
        println!("{key} = {value}");
    }
}
