//! Terminal front end for the chat page.
//!
//! Each line typed at the prompt becomes the chat input followed by Enter, so
//! slash commands, drafts and submission gating behave as they do in the
//! desktop input. The page runs against an offline agent session.
//!
//! # Usage
//!
//! ```bash
//! # Start with a model selected
//! chatpad-chat --model llama3.2
//!
//! # Keep drafts between runs
//! chatpad-chat --model llama3.2 --drafts ~/.chatpad-drafts.json
//!
//! # Load settings from a file
//! chatpad-chat --config chatpad.yaml
//!
//! # Start on the empty state with suggested prompts
//! chatpad-chat --model llama3.2 --no-chat
//! ```
//!
//! # Input
//!
//! - `/clear`, `/compact` (or any prefix of them) - run a slash command
//! - a line ending in `\` - Shift+Enter; keep typing on the next line
//! - `#N` - send suggested prompt N while the chat is empty
//! - `:type <text>` - put text in the input without pressing Enter and show the
//!   command panel; `:pick N` then runs entry N of the panel
//! - `:rerun`, `:stop`, `:model <name>`, `:history`, `:status`, `:help`, `:quit`

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use chatpad::chat::{
    ChatArgs, ChatConfig, ChatPage, ChatStores, InputAction, KeyPress, PlainTextRenderer,
    Renderer, SlashCommand, help_text,
};
use chatpad::{
    AgentSession, Chat, DraftStore, JsonDraftStore, LocalAgentSession, MemoryDraftStore,
    MemoryModelStore, MemoryToolsStore,
};

/// Main entry point for the chatpad-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let (args, _) = ChatArgs::from_command_line_relaxed("chatpad-chat [OPTIONS]");
    let config = match args.config.clone() {
        Some(path) => ChatConfig::from_file(&path)?.apply_args(&args),
        None => ChatConfig::from(args),
    };
    let use_color = config.use_color;

    let drafts: Box<dyn DraftStore> = match &config.drafts_path {
        Some(path) => Box::new(JsonDraftStore::open(path.clone())?),
        None => Box::new(MemoryDraftStore::new()),
    };
    let models = match &config.model {
        Some(model) => MemoryModelStore::with_model(model.clone()),
        None => MemoryModelStore::default(),
    };
    let stores = ChatStores {
        drafts,
        tools: Box::new(MemoryToolsStore::default()),
        models: Box::new(models),
    };
    let agent = match config.chat_id {
        Some(id) => LocalAgentSession::with_chat(Chat::new(id)),
        None => LocalAgentSession::new(),
    };

    let mut page = ChatPage::new(agent, stores, config);
    page.mount();
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("chatpad (type :help for help, :quit to exit)\n");
    show_page(&page, &mut renderer);

    let mut pending = String::new();
    loop {
        if interrupted.swap(false, Ordering::Relaxed)
            && let Err(err) = page.stop().await
        {
            renderer.print_error(&err.to_string());
        }

        let prompt = if pending.is_empty() { "> " } else { ". " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if let Err(err) = page.stop().await {
                    renderer.print_error(&err.to_string());
                }
                pending.clear();
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        };
        let _ = rl.add_history_entry(line.as_str());

        if pending.is_empty() && line.starts_with(':') {
            if !run_meta_command(&mut page, &mut renderer, line.trim()).await {
                println!("Goodbye!");
                break;
            }
            continue;
        }
        if pending.is_empty()
            && page.shows_suggestions()
            && let Some(index) = parse_suggestion(&line)
        {
            let Some(prompt) = page.suggested_prompts().get(index).cloned() else {
                renderer.print_error(&format!("No suggestion #{}", index + 1));
                continue;
            };
            match page.select_prompt(&prompt).await {
                Ok(()) => renderer.print_history(page.display_messages()),
                Err(err) => renderer.print_error(&err.to_string()),
            }
            continue;
        }

        let (text, press) = match line.strip_suffix('\\') {
            Some(head) => (head, KeyPress::SHIFT_ENTER),
            None => (line.as_str(), KeyPress::ENTER),
        };
        pending.push_str(text);
        if let Err(err) = page.input_changed(&pending) {
            renderer.print_error(&err.to_string());
            continue;
        }
        let before = page.agent().messages().len();
        match page.handle_key(press).await {
            Ok(InputAction::Newline) => {
                pending.push('\n');
                if let Err(err) = page.input_changed(&pending) {
                    renderer.print_error(&err.to_string());
                }
            }
            Ok(InputAction::Execute(command)) => {
                pending.clear();
                match command {
                    SlashCommand::Clear => renderer.print_info("Conversation cleared."),
                    SlashCommand::Compact => {
                        renderer.print_info("Conversation compacted.");
                        renderer.print_history(page.display_messages());
                    }
                }
            }
            Ok(InputAction::Submit) => {
                pending.clear();
                let messages = page.display_messages();
                renderer.print_history(&messages[before.min(messages.len())..]);
            }
            Ok(InputAction::Ignored) => {
                pending.clear();
                explain_ignored(&page, &mut renderer);
            }
            Err(err) => {
                pending.clear();
                renderer.print_error(&err.to_string());
            }
        }
    }

    page.unmount();
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Returns false when the session should end.
async fn run_meta_command(
    page: &mut ChatPage<LocalAgentSession>,
    renderer: &mut PlainTextRenderer,
    line: &str,
) -> bool {
    let mut parts = line[1..].splitn(2, ' ');
    let command = parts.next().unwrap_or_default().to_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());
    match command.as_str() {
        "quit" | "exit" | "q" => return false,
        "help" | "?" => {
            for line in help_text().lines() {
                println!("    {}", line);
            }
            println!("    :type <text>       Type without pressing Enter");
            println!("    :pick <n>          Run entry n of the command panel");
            println!("    :rerun             Replay the first message of the chat");
            println!("    :stop              Stop the reply in progress");
            println!("    :model <name>      Select a model (no argument clears it)");
            println!("    :history           Show the conversation");
            println!("    :status            Show the input state");
            println!("    :quit              Exit");
        }
        "type" => match page.input_changed(argument.unwrap_or_default()) {
            Ok(()) => renderer.print_input_status(&page.input_view()),
            Err(err) => renderer.print_error(&err.to_string()),
        },
        "pick" => {
            let Some(index) = argument
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
            else {
                renderer.print_error("Usage: :pick <n>");
                return true;
            };
            match page.select_command(index).await {
                Ok(Some(_)) => renderer.print_history(page.display_messages()),
                Ok(None) => renderer.print_error("No such entry in the command panel."),
                Err(err) => renderer.print_error(&err.to_string()),
            }
        }
        "rerun" => match page.rerun_agent().await {
            Ok(()) => renderer.print_history(page.display_messages()),
            Err(err) => renderer.print_error(&err.to_string()),
        },
        "stop" => {
            if let Err(err) = page.stop().await {
                renderer.print_error(&err.to_string());
            }
        }
        "model" => {
            page.stores_mut().models.set_selected_model(argument.map(str::to_string));
            match argument {
                Some(model) => renderer.print_info(&format!("Model set to {model}")),
                None => renderer.print_info("Model cleared."),
            }
        }
        "history" => show_page(page, renderer),
        "status" => renderer.print_input_status(&page.input_view()),
        _ => renderer.print_error(&format!("Unknown command: :{command}")),
    }
    true
}

fn show_page(page: &ChatPage<LocalAgentSession>, renderer: &mut PlainTextRenderer) {
    if page.shows_suggestions() {
        renderer.print_suggestions(page.suggested_prompts());
    } else {
        renderer.print_history(page.display_messages());
    }
    renderer.print_input_status(&page.input_view());
}

fn explain_ignored(page: &ChatPage<LocalAgentSession>, renderer: &mut PlainTextRenderer) {
    let view = page.input_view();
    if view.input.trim().is_empty() {
        return;
    }
    if !page.stores().models.has_selected_model() {
        renderer.print_error("No model selected. Use :model <name>.");
    } else if view.is_loading || view.is_submitting {
        renderer.print_error("A reply is still in progress.");
    } else {
        renderer.print_error("Message not sent.");
    }
}

fn parse_suggestion(line: &str) -> Option<usize> {
    let number: usize = line.trim().strip_prefix('#')?.parse().ok()?;
    number.checked_sub(1)
}
