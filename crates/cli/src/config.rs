use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Returns the path to the config file
pub fn config_path() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return Some(Path::new(&xdg_config_home).join("findlight").join("config.txt"));
    }

    dirs::home_dir().map(|p| p.join(".config").join("findlight").join("config.txt"))
}

/// Default search toggles read from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchDefaults {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
}

impl SearchDefaults {
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            log::warn!("Could not determine config directory; using default search toggles");
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_contents(&contents),
            Err(error) => {
                log::debug!("No search defaults from {}: {}", path.display(), error);
                Self::default()
            }
        }
    }

    pub fn from_contents(contents: &str) -> Self {
        let mut defaults = Self::default();

        for (key, value) in config_entries(contents) {
            let Some(enabled) = parse_bool(value) else {
                continue;
            };

            match key.to_ascii_lowercase().as_str() {
                "case_sensitive" => defaults.case_sensitive = enabled,
                "whole_word" => defaults.whole_word = enabled,
                "regex" | "use_regex" => defaults.regex = enabled,
                _ => {}
            }
        }

        defaults
    }
}

/// `(key, value)` pairs of every non-comment `key = value` line.
pub fn config_entries(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|line| {
        let trimmed = line.trim();

        // Skip comments and empty lines
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        trimmed
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    })
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchDefaults, config_entries};

    #[test]
    fn reads_search_toggles() {
        let defaults = SearchDefaults::from_contents(
            "# toggles\ncase_sensitive = true\nuse_regex = yes\nwhole_word = nope\n",
        );

        assert_eq!(
            defaults,
            SearchDefaults {
                case_sensitive: true,
                whole_word: false,
                regex: true,
            }
        );
    }

    #[test]
    fn entries_skip_comments_and_malformed_lines() {
        let entries: Vec<_> = config_entries("# a = b\n\nkey = value\nbroken line\n x=1=2 ").collect();
        assert_eq!(entries, vec![("key", "value"), ("x", "1=2")]);
    }
}
