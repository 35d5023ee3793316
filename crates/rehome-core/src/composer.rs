//! Outgoing drafts and send preconditions.
//!
//! Drafts are kept per conversation so switching the selection does
//! not lose typed text, and a failed send leaves the draft untouched
//! for retry. All preconditions are checked locally; an invalid send
//! never reaches the network.

use std::collections::HashMap;

use chrono::Utc;

use crate::error::{CoreError, Result};
use crate::identity::Viewer;
use crate::models::{Conversation, OutgoingMessage};

#[derive(Debug)]
pub struct Composer {
    drafts: HashMap<String, String>,
    can_create_messages: bool,
}

impl Composer {
    pub fn new(can_create_messages: bool) -> Self {
        Self {
            drafts: HashMap::new(),
            can_create_messages,
        }
    }

    pub fn set_draft(&mut self, conversation_id: &str, text: impl Into<String>) {
        self.drafts.insert(conversation_id.to_string(), text.into());
    }

    pub fn draft(&self, conversation_id: &str) -> &str {
        self.drafts
            .get(conversation_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Called only after the server confirmed the send.
    pub fn clear_draft(&mut self, conversation_id: &str) {
        self.drafts.remove(conversation_id);
    }

    /// Validate the draft for `conversation` and build the POST body.
    /// Rejects locally on missing permission, a closed conversation,
    /// or a draft that is empty after trimming.
    pub fn prepare(&self, conversation: &Conversation, viewer: &Viewer) -> Result<OutgoingMessage> {
        if !self.can_create_messages {
            return Err(CoreError::NotPermitted);
        }
        if conversation.is_closed() {
            return Err(CoreError::ConversationClosed(conversation.id.clone()));
        }
        let text = self.draft(&conversation.id).trim().to_string();
        if text.is_empty() {
            return Err(CoreError::EmptyDraft);
        }
        Ok(OutgoingMessage {
            conversation_id: conversation.id.clone(),
            sender_id: viewer.id.clone(),
            text,
            sent_at: Utc::now(),
        })
    }
}
