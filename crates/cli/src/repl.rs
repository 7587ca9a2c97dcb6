//! Interpreting a line typed at the `you>` prompt.

use crate::cli::K_RANGE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Exit,
    /// `:history`
    History,
    /// `:k N` with N in range.
    SetK(usize),
    /// A `:`-command that could not be understood; carries the message to show.
    Invalid(String),
    Question(String),
}

pub fn parse(line: &str) -> ReplInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplInput::Empty;
    }
    match trimmed {
        "exit" | "quit" | ":exit" | ":quit" => return ReplInput::Exit,
        ":history" | ":h" => return ReplInput::History,
        _ => {}
    }

    if let Some(rest) = trimmed.strip_prefix(":k") {
        let value = rest.trim();
        return match value.parse::<i64>() {
            Ok(k) if K_RANGE.contains(&k) => ReplInput::SetK(k as usize),
            _ => ReplInput::Invalid(format!(
                "k must be a number from {} to {}",
                K_RANGE.start(),
                K_RANGE.end()
            )),
        };
    }
    if trimmed.starts_with(':') {
        return ReplInput::Invalid(format!(
            "unknown command '{trimmed}' (try :k N, :history, exit)"
        ));
    }

    ReplInput::Question(trimmed.to_string())
}
