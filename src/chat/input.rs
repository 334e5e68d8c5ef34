//! The chat input controller.
//!
//! The controller turns keystrokes in a text area into actions: run a slash
//! command, submit the message, or let a newline through. It does not decide
//! whether submission is allowed; the page computes that and passes it in.

use std::time::Duration;

use crate::chat::commands::{CommandMatch, SlashCommand, evaluate};
use crate::chat::placeholder::PlaceholderRotation;
use crate::observability::INPUT_COMMANDS;

/// A key press the controller cares about.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    /// The Enter key.
    Enter,

    /// Any other key; handled by the text area itself.
    Other,
}

/// A key press together with the Shift modifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub key: Key,

    /// Whether Shift was held.
    pub shift: bool,
}

impl KeyPress {
    /// Enter without modifiers.
    pub const ENTER: KeyPress = KeyPress {
        key: Key::Enter,
        shift: false,
    };

    /// Enter with Shift held.
    pub const SHIFT_ENTER: KeyPress = KeyPress {
        key: Key::Enter,
        shift: true,
    };
}

/// What the caller should do in response to a key press.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Run a slash command. The message is not submitted.
    Execute(SlashCommand),

    /// Submit the message.
    Submit,

    /// Let the text area insert a newline.
    Newline,

    /// Nothing to do; the default newline has been suppressed if it was Enter.
    Ignored,
}

/// Binds a text area to slash commands and submission.
pub struct ChatInputController {
    input: String,
    commands: CommandMatch,
    placeholder: PlaceholderRotation,
}

impl ChatInputController {
    /// Creates a controller rotating through `placeholder_examples`.
    ///
    /// The rotation does not run until [`ChatInputController::mount`] is called.
    pub fn new<I, S>(placeholder_examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: String::new(),
            commands: CommandMatch::default(),
            placeholder: PlaceholderRotation::new(placeholder_examples),
        }
    }

    /// Starts the placeholder rotation from the first example.
    pub fn mount(&mut self, placeholder_interval: Duration) {
        self.placeholder.start(placeholder_interval);
    }

    /// Stops the placeholder rotation.
    pub fn unmount(&mut self) {
        self.placeholder.stop();
    }

    /// Replaces the input text and re-interprets it.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.commands = evaluate(&self.input);
    }

    /// Returns the input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the current slash-command interpretation.
    pub fn commands(&self) -> &CommandMatch {
        &self.commands
    }

    /// Returns true while the autocomplete panel is shown.
    pub fn is_autocomplete_open(&self) -> bool {
        self.commands.open
    }

    /// Returns the commands offered in the autocomplete panel.
    pub fn filtered_commands(&self) -> &[SlashCommand] {
        &self.commands.filtered
    }

    /// Returns true when the input is exactly a command, for highlighting.
    pub fn is_valid_command(&self) -> bool {
        self.commands.valid
    }

    /// Returns the placeholder currently shown.
    pub fn placeholder(&self) -> &str {
        self.placeholder.current()
    }

    /// Returns the placeholder rotation.
    pub fn placeholder_rotation(&self) -> &PlaceholderRotation {
        &self.placeholder
    }

    /// Decides what a key press does.
    ///
    /// Enter without Shift runs the first offered command while the panel is
    /// open, even when the input is only a partial match. Otherwise it submits
    /// unless `submit_disabled`.
    pub fn handle_key(&self, press: KeyPress, submit_disabled: bool) -> InputAction {
        match press {
            KeyPress {
                key: Key::Enter,
                shift: false,
            } => {
                if let Some(command) = self.commands.first() {
                    INPUT_COMMANDS.click();
                    tracing::debug!(%command, "running slash command from enter");
                    return InputAction::Execute(command);
                }
                if submit_disabled {
                    InputAction::Ignored
                } else {
                    InputAction::Submit
                }
            }
            KeyPress {
                key: Key::Enter,
                shift: true,
            } => InputAction::Newline,
            KeyPress {
                key: Key::Other, ..
            } => InputAction::Ignored,
        }
    }

    /// Runs the command at `index` in the autocomplete panel, as a click would.
    pub fn select_command(&self, index: usize) -> Option<InputAction> {
        if !self.commands.open {
            return None;
        }
        let command = *self.commands.filtered.get(index)?;
        INPUT_COMMANDS.click();
        tracing::debug!(%command, "running slash command from selection");
        Some(InputAction::Execute(command))
    }
}
