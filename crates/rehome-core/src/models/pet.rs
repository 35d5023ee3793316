use serde::{Deserialize, Serialize};

/// Read-only pet details shown in the thread header. Owned by the
/// external Pet collaborator; this core only fetches and displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetContext {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    /// Species ("dog", "cat", ...). `type` on the wire.
    #[serde(rename = "type", default)]
    pub species: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
