//! Interactive commands accepted on stdin.
//!
//! The first word of a line selects the command (case-insensitive via
//! `strum`), the remainder carries its arguments. `add` separates text from
//! category with a `|` so quote text may contain spaces.

use std::path::PathBuf;

use quote_common::{QuoteError, Result};
use strum_macros::{Display, EnumString};

/// Default file name for exports.
pub const EXPORT_FILE: &str = "quotes.json";

/// Command keyword, parsed from the first word of an input line.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum CommandKind {
    /// Show a random quote, optionally from one category.
    Show,
    /// Add a quote: `add <text> | <category>`.
    Add,
    /// Set the persisted category filter.
    Filter,
    /// List all stored quotes.
    List,
    /// Show the quote last displayed in this session.
    Last,
    /// Import quotes from a JSON file.
    Import,
    /// Export all quotes to a JSON file.
    Export,
    /// Run one sync cycle immediately.
    Sync,
    /// Print the command summary.
    Help,
    /// Exit the program.
    Quit,
}

/// Fully parsed command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a random quote, filtered by the given category when present.
    Show(Option<String>),
    /// Add one quote.
    Add {
        /// Quote text (may contain spaces).
        text: String,
        /// Category label.
        category: String,
    },
    /// Persist a new category filter (`all` clears it).
    Filter(String),
    /// List the whole store.
    List,
    /// Show the session's last-viewed quote.
    Last,
    /// Import a JSON array of quotes from the given file.
    Import(PathBuf),
    /// Export all quotes to the given file (default `quotes.json`).
    Export(PathBuf),
    /// Trigger a sync cycle.
    Sync,
    /// Print the command summary.
    Help,
    /// Exit.
    Quit,
}

/// Parses one input line into a [`Command`].
pub fn parse_line(line: &str) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let kind: CommandKind = word
        .parse()
        .map_err(|_| QuoteError::Validation(format!("Unknown command: {}", word)))?;

    let command = match kind {
        CommandKind::Show => Command::Show(if rest.is_empty() {
            None
        } else {
            Some(String::from(rest))
        }),
        CommandKind::Add => {
            let (text, category) = rest.split_once('|').ok_or_else(|| {
                QuoteError::Validation(String::from("Usage: add <text> | <category>"))
            })?;
            Command::Add {
                text: String::from(text.trim()),
                category: String::from(category.trim()),
            }
        }
        CommandKind::Filter => {
            if rest.is_empty() {
                return Err(QuoteError::Validation(String::from(
                    "Usage: filter <category|all>",
                )));
            }
            Command::Filter(String::from(rest))
        }
        CommandKind::List => Command::List,
        CommandKind::Last => Command::Last,
        CommandKind::Import => {
            if rest.is_empty() {
                return Err(QuoteError::Validation(String::from("Usage: import <path>")));
            }
            Command::Import(PathBuf::from(rest))
        }
        CommandKind::Export => Command::Export(if rest.is_empty() {
            PathBuf::from(EXPORT_FILE)
        } else {
            PathBuf::from(rest)
        }),
        CommandKind::Sync => Command::Sync,
        CommandKind::Help => Command::Help,
        CommandKind::Quit => Command::Quit,
    };
    Ok(command)
}

/// One-screen command summary printed by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  show [category]          show a random quote (uses the saved filter by default)
  add <text> | <category>  add a new quote
  filter <category|all>    set and persist the category filter
  list                     list all quotes
  last                     show the quote last viewed this session
  import <path>            import quotes from a JSON array file
  export [path]            export all quotes (default quotes.json)
  sync                     run one sync cycle now
  help                     this summary
  quit                     exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_parse_case_insensitively() {
        assert_eq!(parse_line("SHOW").unwrap(), Command::Show(None));
        assert_eq!(parse_line("Quit").unwrap(), Command::Quit);
    }

    #[test]
    fn show_takes_an_optional_category() {
        assert_eq!(
            parse_line("show Life").unwrap(),
            Command::Show(Some(String::from("Life")))
        );
    }

    #[test]
    fn add_splits_text_and_category_on_pipe() {
        assert_eq!(
            parse_line("add Do or do not. | Motivation").unwrap(),
            Command::Add {
                text: String::from("Do or do not."),
                category: String::from("Motivation"),
            }
        );
    }

    #[test]
    fn add_without_pipe_is_a_usage_error() {
        assert!(parse_line("add just some words").is_err());
    }

    #[test]
    fn export_defaults_to_quotes_json() {
        assert_eq!(
            parse_line("export").unwrap(),
            Command::Export(PathBuf::from(EXPORT_FILE))
        );
    }

    #[test]
    fn unknown_word_is_rejected() {
        assert!(parse_line("frobnicate").is_err());
    }
}
