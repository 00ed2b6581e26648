use std::fmt::Write as _;

use findlight_search::{Document, SearchOptions};

use crate::bridge::FindClient;
use crate::commands::{CommandArgument, HostCommand, Input, help_text};
use crate::config::AppConfig;
use crate::history::SearchList;
use crate::render::{Palette, SharedBoard, render_board};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Output(String),
    Quit,
}

/// Line-driven find session over one document.
pub struct Host {
    client: FindClient,
    board: SharedBoard,
    document: Document,
    palette: Palette,
    show_matched_texts: bool,
    options: SearchOptions,
    current: usize,
    history: SearchList,
    pins: SearchList,
}

impl Host {
    /// `document` is the render copy; the worker behind `client` searches
    /// its own copy of the same tree.
    pub fn new(client: FindClient, board: SharedBoard, document: Document, config: &AppConfig) -> Self {
        Self {
            client,
            board,
            document,
            palette: Palette {
                highlight: config.highlight_color,
                active: config.active_highlight_color,
            },
            show_matched_texts: config.show_matched_texts,
            options: config.search_options(""),
            current: 0,
            history: SearchList::new(config.history_size),
            pins: SearchList::new(config.pin_size),
        }
    }

    #[cfg(test)]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    #[cfg(test)]
    pub fn history(&self) -> &SearchList {
        &self.history
    }

    #[cfg(test)]
    pub fn pins(&self) -> &SearchList {
        &self.pins
    }

    pub async fn handle_line(&mut self, line: &str) -> Step {
        match Input::parse(line) {
            Input::Search(keyword) => {
                self.options.keyword = keyword.to_string();
                Step::Output(self.run_search().await)
            }
            Input::Command(command, argument) => self.run_command(command, argument).await,
            Input::Unknown(name) => Step::Output(format!("unknown command :{name} (try :help)\n")),
        }
    }

    async fn run_command(&mut self, command: HostCommand, argument: &str) -> Step {
        if let CommandArgument::Required(name) = command.spec().argument
            && argument.is_empty()
        {
            return Step::Output(format!("usage: :{} {}\n", command.spec().name, name));
        }

        let output = match command {
            HostCommand::Next => {
                self.record_history();
                self.current = self.client.go_next(self.current).await;
                self.render()
            }
            HostCommand::Previous => {
                self.record_history();
                self.current = self.client.go_prev(self.current).await;
                self.render()
            }
            HostCommand::ToggleCase => {
                self.options.case_sensitive = !self.options.case_sensitive;
                self.toggled().await
            }
            HostCommand::ToggleWord => {
                self.options.whole_word = !self.options.whole_word;
                self.toggled().await
            }
            HostCommand::ToggleRegex => {
                self.options.use_regex = !self.options.use_regex;
                self.toggled().await
            }
            HostCommand::Clear => {
                self.client.remove_highlights().await;
                self.current = 0;
                self.render()
            }
            HostCommand::Texts => list_texts(&self.client.matched_texts().await),
            HostCommand::History if argument.eq_ignore_ascii_case("clear") => {
                self.history.clear();
                "cleared recent searches\n".to_string()
            }
            HostCommand::History => list_searches(&self.history, "no recent searches"),
            HostCommand::Recall => match nth(&self.history, argument) {
                Some(options) => {
                    self.options = options;
                    self.run_search().await
                }
                None => format!("no recent search {argument}\n"),
            },
            HostCommand::Pin => {
                if self.options.is_blank() {
                    "nothing to pin\n".to_string()
                } else {
                    self.pins.record(self.options.clone());
                    format!("pinned {:?}\n", self.options.keyword)
                }
            }
            HostCommand::Pins => list_searches(&self.pins, "no pinned searches"),
            HostCommand::Unpin => {
                if self.pins.remove(argument) {
                    format!("unpinned {argument:?}\n")
                } else {
                    format!("{argument:?} is not pinned\n")
                }
            }
            HostCommand::UsePin => match nth(&self.pins, argument) {
                Some(options) => {
                    self.options = options;
                    self.record_history();
                    self.run_search().await
                }
                None => format!("no pinned search {argument}\n"),
            },
            HostCommand::Help => help_text(),
            HostCommand::Quit => {
                self.client.shutdown().await;
                return Step::Quit;
            }
        };

        Step::Output(output)
    }

    async fn run_search(&mut self) -> String {
        let count = self.client.search(self.options.clone()).await;
        self.current = if count > 0 { 1 } else { 0 };
        log::debug!("Host search {:?}: {} matches", self.options.keyword, count);

        let mut output = self.render();
        if self.show_matched_texts && self.options.use_regex && count > 0 {
            let texts = self.client.matched_texts().await;
            if !texts.is_empty() {
                output.push_str(&list_texts(&texts));
            }
        }
        output
    }

    async fn toggled(&mut self) -> String {
        self.record_history();
        let mut output = format!(
            "case={} word={} regex={}\n",
            on_off(self.options.case_sensitive),
            on_off(self.options.whole_word),
            on_off(self.options.use_regex)
        );
        if !self.options.is_blank() {
            output.push_str(&self.run_search().await);
        }
        output
    }

    fn record_history(&mut self) {
        if !self.options.is_blank() {
            self.history.record(self.options.clone());
        }
    }

    fn render(&self) -> String {
        render_board(&self.board.lock(), &self.document, self.palette)
    }
}

/// Entry `argument` of `list`, counted from 1.
fn nth(list: &SearchList, argument: &str) -> Option<SearchOptions> {
    let index = argument.parse::<usize>().ok()?.checked_sub(1)?;
    list.get(index).cloned()
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn list_texts(texts: &[String]) -> String {
    if texts.is_empty() {
        return "no matched texts\n".to_string();
    }

    let mut out = String::new();
    for (index, text) in texts.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, text);
    }
    out
}

fn list_searches(list: &SearchList, empty: &str) -> String {
    if list.is_empty() {
        return format!("{empty}\n");
    }

    let mut out = String::new();
    for (index, options) in list.iter().enumerate() {
        let mut flags = Vec::new();
        if options.case_sensitive {
            flags.push("case");
        }
        if options.whole_word {
            flags.push("word");
        }
        if options.use_regex {
            flags.push("regex");
        }
        let _ = write!(out, "  {}. {:?}", index + 1, options.keyword);
        if !flags.is_empty() {
            let _ = write!(out, " [{}]", flags.join(","));
        }
        out.push('\n');
    }
    out
}
