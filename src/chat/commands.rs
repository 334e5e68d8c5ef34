//! Slash command interpretation for the chat input.
//!
//! Input that starts with `/` is matched against a fixed command table. The
//! interpreter decides which commands to offer for autocompletion and whether
//! the input is exactly one of them, which the input uses to highlight itself.

/// A command the user can run from the chat input.
///
/// These commands act on the chat and are never sent to the agent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SlashCommand {
    /// Start a new, empty chat.
    Clear,

    /// Summarize the current conversation.
    Compact,
}

/// Every command, in the order they are offered.
pub const SLASH_COMMANDS: [SlashCommand; 2] = [SlashCommand::Clear, SlashCommand::Compact];

impl SlashCommand {
    /// Returns the literal token, including the leading slash.
    pub fn token(&self) -> &'static str {
        match self {
            SlashCommand::Clear => "/clear",
            SlashCommand::Compact => "/compact",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            SlashCommand::Clear => "Start a new, empty chat",
            SlashCommand::Compact => "Summarize the current conversation",
        }
    }

    /// Returns the command whose token is exactly `token`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chatpad::chat::SlashCommand;
    /// assert_eq!(SlashCommand::from_token("/clear"), Some(SlashCommand::Clear));
    /// assert_eq!(SlashCommand::from_token("/CLEAR"), None);
    /// assert_eq!(SlashCommand::from_token("clear"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        SLASH_COMMANDS.into_iter().find(|cmd| cmd.token() == token)
    }

    fn name(&self) -> &'static str {
        &self.token()[1..]
    }
}

impl std::fmt::Display for SlashCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// What the input text means with respect to slash commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMatch {
    /// Commands offered for completion, in table order.
    pub filtered: Vec<SlashCommand>,

    /// Whether the autocomplete panel is shown.
    pub open: bool,

    /// Whether the input is exactly a command token.
    pub valid: bool,
}

impl CommandMatch {
    fn closed() -> Self {
        Self {
            filtered: SLASH_COMMANDS.to_vec(),
            open: false,
            valid: false,
        }
    }

    /// Returns the first offered command when the panel is open.
    pub fn first(&self) -> Option<SlashCommand> {
        if self.open {
            self.filtered.first().copied()
        } else {
            None
        }
    }
}

impl Default for CommandMatch {
    fn default() -> Self {
        Self::closed()
    }
}

/// Interprets `input` against the command table.
///
/// The search is a case-insensitive substring match on the command name; the
/// validity check is a case-sensitive comparison with the full token.
///
/// # Examples
///
/// ```
/// # use chatpad::chat::{SlashCommand, evaluate};
/// let m = evaluate("/c");
/// assert!(m.open);
/// assert!(!m.valid);
/// assert_eq!(m.filtered, vec![SlashCommand::Clear, SlashCommand::Compact]);
///
/// assert!(!evaluate("hello /clear").open);
/// ```
pub fn evaluate(input: &str) -> CommandMatch {
    let Some(rest) = input.strip_prefix('/') else {
        return CommandMatch::closed();
    };
    let search_term = rest.to_lowercase();
    let filtered: Vec<SlashCommand> = SLASH_COMMANDS
        .into_iter()
        .filter(|cmd| cmd.name().contains(search_term.as_str()))
        .collect();
    let open = !filtered.is_empty();
    let valid = SlashCommand::from_token(input).is_some();
    CommandMatch {
        filtered,
        open,
        valid,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for cmd in SLASH_COMMANDS {
        text.push_str(&format!("\n  {:<10} {}", cmd.token(), cmd.description()));
    }
    text
}
