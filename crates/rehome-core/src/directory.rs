//! The ordered conversation directory.
//!
//! Holds the last successfully fetched list. A failed refresh never
//! clears it: stale-but-valid rows beat a blank sidebar.

use crate::models::{Conversation, ConversationStatus};

/// Client-side narrowing of the directory for the search box and the
/// status dropdown. Matching is against participant labels (name or
/// email) and the pet's name.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilter {
    pub query: Option<String>,
    pub status: Option<ConversationStatus>,
}

impl DirectoryFilter {
    pub fn matches(&self, conversation: &Conversation) -> bool {
        if let Some(status) = self.status {
            if conversation.status != status {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                conversation.pet_name.to_lowercase().contains(&query)
                    || conversation.participants.iter().any(|p| p.matches(&query))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ConversationDirectory {
    conversations: Vec<Conversation>,
}

/// Descending by last activity; ties broken by id ascending so equal
/// timestamps still order deterministically.
pub fn sort_conversations(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| {
        b.last_message_at
            .cmp(&a.last_message_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

impl ConversationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held list with a fresh fetch result. Only called on
    /// success; error paths leave the previous list in place.
    pub fn replace(&mut self, mut conversations: Vec<Conversation>) {
        sort_conversations(&mut conversations);
        self.conversations = conversations;
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    pub fn filtered(&self, filter: &DirectoryFilter) -> Vec<Conversation> {
        self.conversations
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
