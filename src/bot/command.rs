//! Chat command classification

/// What a message addressed to the bot asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Help,
    /// Second space-delimited word is the username
    Status { username: String },
    Unknown,
}

/// Classify the message text.
///
/// The text starts with the bot's display name because the bot is mentioned.
pub fn parse_command(text: &str, bot_name: &str) -> BotCommand {
    let lowered = text.trim().to_lowercase();
    let bot = bot_name.to_lowercase();

    if lowered == format!("{bot} help") || lowered == format!("{bot} manage") {
        return BotCommand::Help;
    }

    if lowered.contains("status") {
        let username = text.trim().split(' ').nth(1).unwrap_or_default();
        return BotCommand::Status {
            username: username.to_string(),
        };
    }

    BotCommand::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_keywords() {
        assert_eq!(parse_command("WhatsOp help", "WhatsOp"), BotCommand::Help);
        assert_eq!(parse_command("whatsop MANAGE", "WhatsOp"), BotCommand::Help);
        assert_eq!(parse_command("WhatsOp help me", "WhatsOp"), BotCommand::Unknown);
    }

    #[test]
    fn test_status_takes_second_token() {
        assert_eq!(
            parse_command("WhatsOp Alice status", "WhatsOp"),
            BotCommand::Status {
                username: "Alice".to_string()
            }
        );
        assert_eq!(
            parse_command("WhatsOp Status", "WhatsOp"),
            BotCommand::Status {
                username: "Status".to_string()
            }
        );
        assert_eq!(
            parse_command("status", "WhatsOp"),
            BotCommand::Status {
                username: String::new()
            }
        );
    }

    #[test]
    fn test_anything_else_is_unknown() {
        assert_eq!(parse_command("WhatsOp hello", "WhatsOp"), BotCommand::Unknown);
        assert_eq!(parse_command("", "WhatsOp"), BotCommand::Unknown);
    }
}
