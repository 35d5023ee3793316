use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Viewer;

/// How many characters of the last message a directory row shows.
const PREVIEW_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    /// Terminal within this core. A closed conversation can no longer
    /// be opened or written to; reopening is not defined here.
    Closed,
}

/// One side of a conversation, resolved at the ingestion boundary into
/// a tagged union rather than shape-sniffed at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Participant {
    #[serde(rename_all = "camelCase")]
    Adopter {
        id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    RescueOrg {
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Participant {
    pub fn id(&self) -> &str {
        match self {
            Participant::Adopter { id, .. } => id,
            Participant::RescueOrg { id, .. } => id,
        }
    }

    /// Display label, total over missing data: an adopter falls back
    /// from name to email, an organization has only its name, and
    /// anything absent resolves to "Unknown".
    pub fn label(&self) -> String {
        match self {
            Participant::Adopter { name, email, .. } => present(name)
                .or_else(|| present(email))
                .unwrap_or("Unknown")
                .to_string(),
            Participant::RescueOrg { name, .. } => {
                present(name).unwrap_or("Unknown").to_string()
            }
        }
    }

    /// Short role chip shown next to the label.
    pub fn role_label(&self) -> &'static str {
        match self {
            Participant::Adopter { .. } => "adopter",
            Participant::RescueOrg { .. } => "rescue",
        }
    }

    /// Case-insensitive match for the directory search box. Adopters
    /// match on name or email, organizations on name.
    pub fn matches(&self, query_lower: &str) -> bool {
        let hit = |value: &Option<String>| {
            present(value)
                .map(|v| v.to_lowercase().contains(query_lower))
                .unwrap_or(false)
        };
        match self {
            Participant::Adopter { name, email, .. } => hit(name) || hit(email),
            Participant::RescueOrg { name, .. } => hit(name),
        }
    }
}

/// A message thread between an adopter and a rescue organization,
/// always tied to one pet. Created elsewhere (the contact flow); this
/// core only reads it and advances its `last_message*` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub pet_id: String,
    #[serde(default)]
    pub pet_name: String,
    pub participants: Vec<Participant>,
    pub status: ConversationStatus,
    #[serde(default)]
    pub last_message_text: String,
    pub last_message_at: DateTime<Utc>,
    /// Id of the individual sender (a staff member id for the rescue
    /// side, never the org id).
    pub last_message_by: String,
    /// Raw unread counter as stored for this viewer's side. Whether a
    /// badge is shown is decided per viewer, see [`crate::unread`].
    #[serde(default)]
    pub unread_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn is_closed(&self) -> bool {
        self.status == ConversationStatus::Closed
    }

    /// Whether the viewer (or any of their teammates) participates.
    pub fn involves(&self, viewer: &Viewer) -> bool {
        self.participants
            .iter()
            .any(|p| viewer.is_own_message(p.id()))
    }

    /// Ordered display labels for all participants.
    pub fn participant_labels(&self) -> Vec<String> {
        self.participants.iter().map(Participant::label).collect()
    }

    /// Truncated last-message preview for directory rows.
    pub fn preview(&self) -> String {
        let mut preview: String = self.last_message_text.chars().take(PREVIEW_LEN).collect();
        if self.last_message_text.chars().count() > PREVIEW_LEN {
            preview.push_str("...");
        }
        preview
    }
}
