//! Output rendering for the terminal front end.
//!
//! This module provides a trait-based rendering abstraction so that the same
//! page state can be drawn with or without ANSI styling.

use std::io::{self, Stdout, Write};

use crate::chat::commands::SlashCommand;
use crate::chat::page::{ChatStatus, InputView};
use crate::types::{Message, MessagePart, MessageRole};

/// ANSI escape code for dim text (used for reasoning and placeholders).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for reasoning).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for tool names).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for blue text (used for recognized commands).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for green text (used for the user's messages).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for magenta text (used for system messages).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// Trait for rendering chat page output.
pub trait Renderer: Send {
    /// Print one message of the history.
    fn print_message(&mut self, message: &Message);

    /// Print the prompts offered by the empty state.
    fn print_suggestions(&mut self, prompts: &[String]);

    /// Print a summary of the input state, with the command panel when open.
    fn print_input_status(&mut self, view: &InputView);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print the history, one message after another.
    fn print_history(&mut self, messages: &[Message]) {
        for message in messages {
            self.print_message(message);
        }
    }
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_color {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn role_label(&self, role: MessageRole) -> String {
        match role {
            MessageRole::User => self.paint(ANSI_GREEN, "You"),
            MessageRole::Agent => "Agent".to_string(),
            MessageRole::System => self.paint(ANSI_MAGENTA, "System"),
        }
    }

    fn format_part(&self, part: &MessagePart) -> String {
        match part {
            MessagePart::Text { text } => text.clone(),
            MessagePart::Reasoning { text } => {
                if self.use_color {
                    format!("{ANSI_DIM}{ANSI_ITALIC}{text}{ANSI_RESET}")
                } else {
                    format!("[thinking] {text}")
                }
            }
            MessagePart::ToolInvocation {
                tool_name, output, ..
            } => {
                let status = if output.is_some() { "done" } else { "running" };
                format!("{} ({status})", self.paint(ANSI_CYAN, &format!("[tool: {tool_name}]")))
            }
            MessagePart::File { media_type, url } => format!("[file: {url} ({media_type})]"),
        }
    }

    fn autocomplete_lines(&self, commands: &[SlashCommand]) -> Vec<String> {
        let mut lines = vec!["Commands (Enter runs the first)".to_string()];
        for (index, cmd) in commands.iter().enumerate() {
            let token = self.paint(ANSI_BLUE, &format!("{:<10}", cmd.token()));
            lines.push(format!("  {}. {token} {}", index + 1, cmd.description()));
        }
        lines
    }

    fn input_status_lines(&self, view: &InputView) -> Vec<String> {
        let status = match view.status {
            ChatStatus::Ready => "ready",
            ChatStatus::Submitted => "submitted",
            ChatStatus::Streaming => "streaming",
        };
        let input = if view.highlight {
            self.paint(ANSI_BLUE, &view.input)
        } else {
            format!("{:?}", view.input)
        };
        let mut lines = vec![format!(
            "[{status}] input: {input} submit: {} rerun: {}",
            if view.disabled { "disabled" } else { "enabled" },
            if view.rerun_disabled { "disabled" } else { "enabled" },
        )];
        if let Some(commands) = &view.autocomplete {
            lines.extend(self.autocomplete_lines(commands));
        }
        lines.push(self.paint(ANSI_DIM, &view.placeholder));
        lines
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &Message) {
        println!("{}:", self.role_label(message.role));
        for part in &message.parts {
            println!("  {}", self.format_part(part));
        }
        self.flush();
    }

    fn print_suggestions(&mut self, prompts: &[String]) {
        println!("Try one of these (type #N to send it):");
        for (index, prompt) in prompts.iter().enumerate() {
            println!("  #{} {}", index + 1, prompt);
        }
        self.flush();
    }

    fn print_input_status(&mut self, view: &InputView) {
        for line in self.input_status_lines(view) {
            println!("{line}");
        }
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("\nError: {error}");
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }
}
