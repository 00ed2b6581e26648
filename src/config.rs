use std::{
    env, fs,
    path::{Path, PathBuf},
};

use findlight_search::SearchOptions;

const DEFAULT_HISTORY_SIZE: usize = 20;
const MAX_HISTORY_SIZE: usize = 100;
const DEFAULT_PIN_SIZE: usize = 5;
const MAX_PIN_SIZE: usize = 20;
const DEFAULT_HIGHLIGHT_COLOR: u8 = 226;
const DEFAULT_ACTIVE_HIGHLIGHT_COLOR: u8 = 208;

const DEFAULT_CONFIG: &str = "# Default search toggles\n\
# case_sensitive = false\n\
# whole_word = false\n\
# regex = false\n\
# Number of recent searches kept in memory (max 100)\n\
history_size = 20\n\
# Number of pinned searches (max 20)\n\
pin_size = 5\n\
# Highlight colors as ANSI 256-color indices\n\
highlight_color = 226\n\
active_highlight_color = 208\n\
# List every matched string after a regex search\n\
# show_matched_texts = true\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
    pub history_size: usize,
    pub pin_size: usize,
    pub highlight_color: u8,
    pub active_highlight_color: u8,
    pub show_matched_texts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            regex: false,
            history_size: DEFAULT_HISTORY_SIZE,
            pin_size: DEFAULT_PIN_SIZE,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            active_highlight_color: DEFAULT_ACTIVE_HIGHLIGHT_COLOR,
            show_matched_texts: true,
        }
    }
}

impl AppConfig {
    pub fn load_or_create() -> Self {
        let Some(path) = ensure_config_file() else {
            return Self::default();
        };

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_contents(&contents),
            Err(error) => {
                log::warn!("Failed to read config {}: {}", path.display(), error);
                Self::default()
            }
        }
    }

    fn from_contents(contents: &str) -> Self {
        let mut config = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if key.eq_ignore_ascii_case("case_sensitive")
                && let Some(enabled) = parse_bool(value)
            {
                config.case_sensitive = enabled;
            }

            if key.eq_ignore_ascii_case("whole_word")
                && let Some(enabled) = parse_bool(value)
            {
                config.whole_word = enabled;
            }

            if (key.eq_ignore_ascii_case("regex") || key.eq_ignore_ascii_case("use_regex"))
                && let Some(enabled) = parse_bool(value)
            {
                config.regex = enabled;
            }

            if key.eq_ignore_ascii_case("history_size")
                && let Ok(size) = value.parse::<usize>()
            {
                config.history_size = size.clamp(1, MAX_HISTORY_SIZE);
            }

            if key.eq_ignore_ascii_case("pin_size")
                && let Ok(size) = value.parse::<usize>()
            {
                config.pin_size = size.clamp(1, MAX_PIN_SIZE);
            }

            if key.eq_ignore_ascii_case("highlight_color")
                && let Ok(color) = value.parse::<u8>()
            {
                config.highlight_color = color;
            }

            if key.eq_ignore_ascii_case("active_highlight_color")
                && let Ok(color) = value.parse::<u8>()
            {
                config.active_highlight_color = color;
            }

            if key.eq_ignore_ascii_case("show_matched_texts")
                && let Some(show) = parse_bool(value)
            {
                config.show_matched_texts = show;
            }
        }

        config
    }

    /// Search options for `keyword` with the configured default toggles.
    pub fn search_options(&self, keyword: &str) -> SearchOptions {
        SearchOptions::new(keyword)
            .with_case_sensitive(self.case_sensitive)
            .with_whole_word(self.whole_word)
            .with_regex(self.regex)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn ensure_config_file() -> Option<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(error) = fs::write(&path, DEFAULT_CONFIG) {
            log::warn!("Failed to write default config {}: {}", path.display(), error);
        }
    }
    Some(path)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return Some(Path::new(&xdg_config_home).join("findlight/config.txt"));
    }

    dirs::home_dir().map(|home| home.join(".config/findlight/config.txt"))
}
