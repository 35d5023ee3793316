use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Sent,
    Delivered,
    Read,
}

/// A single message in a conversation thread. Immutable once created;
/// the core never edits or deletes messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Server-assigned id.
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub status: MessageStatus,
}

impl Message {
    pub fn sender_label(&self) -> &str {
        self.sender_name.as_deref().unwrap_or("Unknown")
    }
}

/// Body of `POST messages`. The server's canonical [`Message`] response
/// is what gets appended to the thread, never this draft shape, so
/// server-assigned fields (`id`, final `sentAt`, `status`) cannot drift.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub conversation_id: String,
    pub sender_id: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_format() {
        let json = r#"{
            "id": "m1",
            "conversationId": "c1",
            "senderId": "u1",
            "senderName": "Emily Davis",
            "text": "Hello!",
            "sentAt": "2026-03-01T12:00:00Z",
            "status": "read"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.status, MessageStatus::Read);
        assert_eq!(message.sender_label(), "Emily Davis");
    }

    #[test]
    fn test_message_defaults() {
        // Older backend records carry neither senderName nor status.
        let json = r#"{
            "id": "m1",
            "conversationId": "c1",
            "senderId": "u1",
            "text": "Hello!",
            "sentAt": "2026-03-01T12:00:00Z"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.status, MessageStatus::Sent);
        assert_eq!(message.sender_label(), "Unknown");
    }

    #[test]
    fn test_outgoing_message_serializes_camel_case() {
        let outgoing = OutgoingMessage {
            conversation_id: "c1".to_string(),
            sender_id: "u1".to_string(),
            text: "Hi".to_string(),
            sent_at: "2026-03-01T12:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&outgoing).unwrap();
        assert_eq!(value["conversationId"], "c1");
        assert_eq!(value["senderId"], "u1");
        assert!(value["sentAt"].is_string());
    }
}
