//! Explorer command parsing.

use std::path::PathBuf;

use logwatch_core::{RetrievalMode, Sample};
use logwatch_explorer::EvidenceSort;
use logwatch_ui::{Category, Event, View};

use crate::AppError;

/// Help text listing every explorer command.
pub const HELP: &str = "\
commands:
  sample low|med|high        load a bundled sample (clears the current result)
  load <file>                replace the input with the contents of a file
  input                      print the current input payload
  mode vector|hybrid         retrieval mode for the next submission
  submit                     send the input to the analysis service
  wait                       block until the pending submission resolves
  view overview|signals|evidence
  find signals|actions|evidence [text]   set a search query (empty clears it)
  quoted on|off              evidence: only items with a quote
  sort distance|title        evidence ordering
  toggle <n>                 expand/collapse the quote of evidence #n
  show                       re-render the current view
  health                     probe the analysis service
  policy <file>              print the location of a policy document
  help                       this text
  quit                       leave";

/// One parsed explorer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a bundled sample.
    Sample(Sample),
    /// Load input text from a file.
    Load(PathBuf),
    /// Print the input payload.
    Input,
    /// Change retrieval mode.
    Mode(RetrievalMode),
    /// Submit the input.
    Submit,
    /// Wait for the pending submission.
    Wait,
    /// Navigate.
    View(View),
    /// Set a category query.
    Find(Category, String),
    /// Evidence quoted-only toggle.
    Quoted(bool),
    /// Evidence ordering.
    Sort(EvidenceSort),
    /// Toggle an evidence quote.
    Toggle(usize),
    /// Re-render.
    Show,
    /// Probe the service.
    Health,
    /// Locate a policy document.
    Policy(String),
    /// Print help.
    Help,
    /// Exit.
    Quit,
}

impl Command {
    /// Session event for commands that map directly onto one.
    ///
    /// `Load`, `Input`, `Wait`, `Show`, `Health`, `Policy`, `Help` and `Quit`
    /// are handled by the shell and return `None`.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Self::Sample(sample) => Some(Event::SampleSelected(sample)),
            Self::Mode(mode) => Some(Event::RetrievalModeChanged(mode)),
            Self::Submit => Some(Event::SubmitRequested),
            Self::View(view) => Some(Event::ViewSelected(view)),
            Self::Find(category, text) => Some(Event::QueryChanged(category, text)),
            Self::Quoted(only_quoted) => Some(Event::OnlyQuotedChanged(only_quoted)),
            Self::Sort(sort) => Some(Event::EvidenceSortChanged(sort)),
            Self::Toggle(index) => Some(Event::QuoteToggled(index)),
            Self::Load(_)
            | Self::Input
            | Self::Wait
            | Self::Show
            | Self::Health
            | Self::Policy(_)
            | Self::Help
            | Self::Quit => None,
        }
    }
}

/// Parses one input line. Blank lines parse to [`Command::Show`].
///
/// # Errors
/// Returns [`AppError::Command`] for unknown commands or missing arguments,
/// and the matching parse error for invalid argument values.
pub fn parse_command(line: &str) -> Result<Command, AppError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "" | "show" => Command::Show,
        "sample" => Command::Sample(required(name, rest)?.parse()?),
        "load" => Command::Load(PathBuf::from(required(name, rest)?)),
        "input" => Command::Input,
        "mode" => Command::Mode(required(name, rest)?.parse()?),
        "submit" | "analyze" => Command::Submit,
        "wait" => Command::Wait,
        "view" => Command::View(required(name, rest)?.parse()?),
        "find" => {
            let (category, text) = match rest.split_once(char::is_whitespace) {
                Some((category, text)) => (category, text.trim()),
                None => (required(name, rest)?, ""),
            };
            Command::Find(category.parse()?, text.to_string())
        }
        "quoted" => Command::Quoted(parse_switch(required(name, rest)?)?),
        "sort" => Command::Sort(required(name, rest)?.parse()?),
        "toggle" => {
            let raw = required(name, rest)?;
            let index = raw
                .trim_start_matches('#')
                .parse()
                .map_err(|_| AppError::Command(format!("toggle expects an item number, got '{raw}'")))?;
            Command::Toggle(index)
        }
        "health" => Command::Health,
        "policy" => Command::Policy(required(name, rest)?.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(AppError::Command(format!(
                "unknown command '{other}', type 'help' for a list"
            )));
        }
    };

    Ok(command)
}

fn required<'a>(name: &str, rest: &'a str) -> Result<&'a str, AppError> {
    if rest.is_empty() {
        return Err(AppError::Command(format!("'{name}' needs an argument")));
    }
    Ok(rest)
}

fn parse_switch(raw: &str) -> Result<bool, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(AppError::Command(format!("expected on or off, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_without_text_clears_query() {
        let command = parse_command("find evidence").expect("should parse");
        assert_eq!(command, Command::Find(Category::Evidence, String::new()));
    }

    #[test]
    fn find_keeps_inner_spaces() {
        let command = parse_command("find signals  login burst ").expect("should parse");
        assert_eq!(
            command,
            Command::Find(Category::Signals, "login burst".to_string())
        );
    }
}
