//! Chat bot answering wireless client status queries

pub mod command;
pub mod responder;

pub use command::{parse_command, BotCommand};
pub use responder::{status_message, BotError, BotReply, BotResponder, ChatEvent};
