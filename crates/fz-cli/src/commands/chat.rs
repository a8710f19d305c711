//! Chat command: the fan assistant, answered by the data service.

use std::fmt::Write as _;

use anyhow::Result;
use fz_api::ChatMessage;

use crate::Source;

/// What `fz chat` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    History,
    Clear,
}

fn speaker(kind: &str) -> &str {
    match kind {
        "human" => "You",
        "ai" => "Assistant",
        other => other,
    }
}

pub fn format_history(messages: &[ChatMessage]) -> String {
    let mut output = String::new();
    if messages.is_empty() {
        writeln!(output, "No messages yet.").unwrap();
        return output;
    }
    for message in messages {
        writeln!(output, "{}: {}", speaker(&message.kind), message.content.trim()).unwrap();
    }
    output
}

/// Runs the chat command.
pub fn run(source: &Source, fan_id: u32, action: ChatAction) -> Result<()> {
    match action {
        ChatAction::Send(message) => {
            let reply = source.chat(fan_id, &message)?;
            println!("{}", reply.trim());
        }
        ChatAction::History => {
            print!("{}", format_history(&source.chat_history(fan_id)?));
        }
        ChatAction::Clear => {
            source.clear_chat_history(fan_id)?;
            println!("Chat history cleared for fan {fan_id}.");
        }
    }
    Ok(())
}
