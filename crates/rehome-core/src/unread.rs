//! Viewer-relative unread badge.
//!
//! The decision lives here and nowhere else: render code must not
//! re-derive "is this sender a teammate" from participant lists.

use crate::identity::Viewer;
use crate::models::Conversation;

/// Badge value for a directory row.
///
/// The raw counter is shown only when the last message came from the
/// other side of the conversation. A message sent by the viewer, or by
/// any teammate on a rescue org's staff roster, suppresses the badge
/// entirely; an org is one principal even though many staff act for it.
pub fn unread_badge(conversation: &Conversation, viewer: &Viewer) -> u32 {
    if viewer.is_own_message(&conversation.last_message_by) {
        0
    } else {
        conversation.unread_count
    }
}
