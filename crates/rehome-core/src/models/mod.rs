pub mod conversation;
pub mod message;
pub mod pet;

pub use conversation::{Conversation, ConversationStatus, Participant};
pub use message::{Message, MessageStatus, OutgoingMessage};
pub use pet::PetContext;
