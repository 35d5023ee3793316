//! The loaded message thread for the selected conversation.

use crate::models::{Message, PetContext};

/// A fully resolved thread: both the ordered messages and the pet
/// context arrived. Partial state is never exposed; until both reads
/// resolve, the previous thread (or none) stays in place.
#[derive(Debug, Clone)]
pub struct LoadedThread {
    pub conversation_id: String,
    pub messages: Vec<Message>,
    pub pet: PetContext,
}

impl LoadedThread {
    pub fn new(conversation_id: String, mut messages: Vec<Message>, pet: PetContext) -> Self {
        sort_messages(&mut messages);
        Self {
            conversation_id,
            messages,
            pet,
        }
    }

    /// Append the canonical server copy of a just-sent message.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }
}

/// Oldest first. The sort must be stable: the backend's arrival order
/// is the tiebreak for equal timestamps.
pub fn sort_messages(messages: &mut [Message]) {
    messages.sort_by_key(|m| m.sent_at);
}

/// Monotonically increasing tag for in-flight thread loads. A load
/// started for one selection is discarded on arrival unless it is
/// still the newest one issued; without this, a slow fetch for a
/// previously selected conversation would overwrite the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadGeneration(pub u64);

impl LoadGeneration {
    pub fn next(self) -> Self {
        LoadGeneration(self.0 + 1)
    }
}
