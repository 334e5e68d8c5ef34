mod chat;
mod message;

pub use chat::{Chat, ChatId};
pub use message::{Message, MessagePart, MessageRole, first_user_message};
