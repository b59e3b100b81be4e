/// Line-oriented editor commands for the interactive shell.
use thiserror::Error;

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(String),
    Clear,
    Undo,
    Redo,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

/// Shell help text, one command per line.
pub const HELP: &str = "\
add <title>   add a song to the end of the playlist
remove <id>   remove the song with this id
clear         remove every song
undo          undo the last change
redo          redo the last undone change
list          show the playlist
help          show this help
quit          leave the shell";

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// The command word is case-insensitive; the argument is kept verbatim
/// apart from surrounding whitespace.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" | "a" => Command::Add(required(rest, "add")?),
        "remove" | "rm" => Command::Remove(required(rest, "remove")?),
        "clear" => Command::Clear,
        "undo" | "u" => Command::Undo,
        "redo" | "r" => Command::Redo,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn required(arg: &str, command: &'static str) -> Result<String, ParseError> {
    if arg.is_empty() {
        Err(ParseError::MissingArgument(command))
    } else {
        Ok(arg.to_string())
    }
}
