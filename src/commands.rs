const COMMAND_PREFIX: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandArgument {
    None,
    Required(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: HostCommand,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub argument: CommandArgument,
    pub description: &'static str,
}

const fn command(
    command: HostCommand,
    name: &'static str,
    aliases: &'static [&'static str],
    argument: CommandArgument,
    description: &'static str,
) -> CommandSpec {
    CommandSpec {
        command,
        name,
        aliases,
        argument,
        description,
    }
}

macro_rules! define_commands {
    ($(($variant:ident, $name:literal, $aliases:expr, $argument:expr, $description:literal)),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HostCommand {
            $( $variant, )+
        }

        const COMMAND_SPECS: &[CommandSpec] = &[
            $(command(HostCommand::$variant, $name, $aliases, $argument, $description),)+
        ];

        impl HostCommand {
            pub fn specs() -> &'static [CommandSpec] {
                COMMAND_SPECS
            }

            #[cfg(test)]
            pub fn all() -> impl std::iter::ExactSizeIterator<Item = Self> + Clone {
                COMMAND_SPECS.iter().map(|spec| spec.command)
            }

            pub fn from_name(name: &str) -> Option<Self> {
                let normalized = name.trim().to_ascii_lowercase();
                COMMAND_SPECS.iter().find_map(|spec| {
                    (spec.name == normalized || spec.aliases.contains(&normalized.as_str()))
                        .then_some(spec.command)
                })
            }

            pub fn spec(self) -> &'static CommandSpec {
                &COMMAND_SPECS[self as usize]
            }
        }
    };
}

define_commands!(
    (Next, "next", &["n"], CommandArgument::None, "Go to the next match"),
    (Previous, "prev", &["p", "previous"], CommandArgument::None, "Go to the previous match"),
    (ToggleCase, "case", &[], CommandArgument::None, "Toggle case-sensitive matching"),
    (ToggleWord, "word", &[], CommandArgument::None, "Toggle whole-word matching"),
    (ToggleRegex, "regex", &[], CommandArgument::None, "Toggle regex mode"),
    (Clear, "clear", &[], CommandArgument::None, "Remove all highlights"),
    (Texts, "texts", &[], CommandArgument::None, "List matched texts of the last regex search"),
    (History, "history", &[], CommandArgument::None, "List recent searches (:history clear empties it)"),
    (Recall, "recall", &[], CommandArgument::Required("N"), "Run recent search N again"),
    (Pin, "pin", &[], CommandArgument::None, "Pin the current search"),
    (Pins, "pins", &[], CommandArgument::None, "List pinned searches"),
    (Unpin, "unpin", &[], CommandArgument::Required("KEYWORD"), "Remove a pinned search"),
    (UsePin, "usepin", &[], CommandArgument::Required("N"), "Run pinned search N"),
    (Help, "help", &["?"], CommandArgument::None, "Show this command list"),
    (Quit, "quit", &["q", "exit"], CommandArgument::None, "Exit"),
);

/// One line of host input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// A new keyword to search for.
    Search(&'a str),
    Command(HostCommand, &'a str),
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    /// An empty line steps to the next match and a line starting with `:` is
    /// a command. A doubled `::` searches for the rest with one `:` kept.
    /// Anything else is taken verbatim as the keyword.
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Self::Command(HostCommand::Next, "");
        }

        let Some(rest) = line.strip_prefix(COMMAND_PREFIX) else {
            return Self::Search(line);
        };
        if rest.starts_with(COMMAND_PREFIX) {
            return Self::Search(rest);
        }

        let rest = rest.trim();
        let (name, argument) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match HostCommand::from_name(name) {
            Some(command) => Self::Command(command, argument.trim()),
            None => Self::Unknown(name),
        }
    }
}

pub fn help_text() -> String {
    HostCommand::specs()
        .iter()
        .map(|spec| {
            let usage = match spec.argument {
                CommandArgument::None => format!("{COMMAND_PREFIX}{}", spec.name),
                CommandArgument::Required(arg) => format!("{COMMAND_PREFIX}{} {arg}", spec.name),
            };
            format!("  {usage:<16} {}\n", spec.description)
        })
        .chain(std::iter::once(format!(
            "  {:<16} Search for a keyword starting with {COMMAND_PREFIX}\n",
            format!("{COMMAND_PREFIX}{COMMAND_PREFIX}TEXT")
        )))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{HostCommand, Input, help_text};
    use std::collections::HashSet;

    #[test]
    fn command_catalog_contains_unique_names() {
        let mut seen = HashSet::new();
        for spec in HostCommand::specs() {
            assert!(seen.insert(spec.name), "duplicate name {}", spec.name);
            for alias in spec.aliases {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
            }
        }

        assert_eq!(HostCommand::specs().len(), HostCommand::all().count());
    }

    #[test]
    fn spec_lookup_matches_variant() {
        for command in HostCommand::all() {
            assert_eq!(command.spec().command, command);
        }
    }

    #[test]
    fn parses_plain_lines_as_keywords() {
        assert_eq!(Input::parse("cat"), Input::Search("cat"));
        assert_eq!(Input::parse(" cat \n"), Input::Search(" cat "));
        assert_eq!(Input::parse(r"\d+"), Input::Search(r"\d+"));
    }

    #[test]
    fn empty_line_means_next() {
        assert_eq!(Input::parse(""), Input::Command(HostCommand::Next, ""));
        assert_eq!(Input::parse("   \r\n"), Input::Command(HostCommand::Next, ""));
    }

    #[test]
    fn parses_commands_aliases_and_arguments() {
        assert_eq!(Input::parse(":next"), Input::Command(HostCommand::Next, ""));
        assert_eq!(Input::parse(":P"), Input::Command(HostCommand::Previous, ""));
        assert_eq!(Input::parse(":recall 3"), Input::Command(HostCommand::Recall, "3"));
        assert_eq!(
            Input::parse(":unpin  two words "),
            Input::Command(HostCommand::Unpin, "two words")
        );
        assert_eq!(Input::parse(":bogus"), Input::Unknown("bogus"));
        assert_eq!(Input::parse(":usepin 2"), Input::Command(HostCommand::UsePin, "2"));
    }

    #[test]
    fn doubled_prefix_searches_for_a_literal_colon() {
        assert_eq!(Input::parse("::next"), Input::Search(":next"));
        assert_eq!(Input::parse(":::"), Input::Search("::"));
        assert_eq!(Input::parse("::"), Input::Search(":"));
        assert_eq!(Input::parse("a::b"), Input::Search("a::b"));
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for spec in HostCommand::specs() {
            assert!(help.contains(&format!(":{}", spec.name)));
        }
        assert!(help.contains(":recall N"));
        assert!(help.contains("::TEXT"));
    }
}
