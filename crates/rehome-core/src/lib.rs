//! Conversation and messaging core for the rehoming platform.
//!
//! Client-resident state machine sitting between a REST backend and a
//! presentation layer: it resolves who the viewer is (a lone adopter
//! or a rescue organization with a staff roster), keeps an ordered
//! conversation directory, computes viewer-relative unread badges,
//! loads message threads with their pet context, and gates sending on
//! conversation lifecycle and permissions.

pub mod api;
pub mod composer;
pub mod config;
pub mod directory;
pub mod error;
pub mod identity;
pub mod models;
pub mod runtime;
pub mod thread;
pub mod unread;

pub use api::ApiClient;
pub use composer::Composer;
pub use config::CoreConfig;
pub use directory::{ConversationDirectory, DirectoryFilter};
pub use error::{CoreError, Result};
pub use identity::{IdentityResolver, StaticIdentity, Viewer, ViewerKind};
pub use models::{
    Conversation, ConversationStatus, Message, MessageStatus, OutgoingMessage, Participant,
    PetContext,
};
pub use runtime::{ChatRuntime, OpenOutcome};
pub use thread::LoadedThread;
pub use unread::unread_badge;
