//! Chat command handling.

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Chat, ChatId};
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;
use tracing::debug;

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show the id of this chat")]
    Id,
}

impl Command {
    /// Name used in logs.
    pub fn handler_name(&self) -> &'static str {
        match self {
            Command::Id => "command-id",
        }
    }
}

/// The chat a command was sent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversation {
    pub id: ChatId,
    /// One-to-one chat with the bot.
    pub private: bool,
}

impl Conversation {
    pub fn of(chat: &Chat) -> Self {
        Self {
            id: chat.id,
            private: chat.is_private(),
        }
    }
}

/// Reply text for `command`, or `None` when it is not answered in this chat.
///
/// Commands are only answered in private chats.
pub fn reply_for(command: &Command, conversation: &Conversation) -> Option<String> {
    if !conversation.private {
        return None;
    }
    match command {
        Command::Id => Some(format!("Ваш чат id - {}", conversation.id.0)),
    }
}

/// Update handler tree: private messages that parse as a [`Command`].
pub fn schema() -> UpdateHandler<RequestError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .filter_command::<Command>()
        .endpoint(handle_command)
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> ResponseResult<()> {
    debug!(handler = cmd.handler_name(), chat_id = %msg.chat.id, "Handling command");

    if let Some(reply) = reply_for(&cmd, &Conversation::of(&msg.chat)) {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}
