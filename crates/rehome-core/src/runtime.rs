//! Single-threaded orchestrator for the messaging core.
//!
//! All shared state lives in one `Rc<RefCell<CoreState>>` owned here
//! and exposed to presentation layers only through cloning accessors.
//! Backend calls are async and never block the event loop; state is
//! never borrowed across an await point.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::composer::Composer;
use crate::config::CoreConfig;
use crate::directory::{ConversationDirectory, DirectoryFilter};
use crate::error::{CoreError, Result};
use crate::identity::{IdentityResolver, Viewer};
use crate::models::{Conversation, Message};
use crate::thread::{LoadGeneration, LoadedThread};
use crate::unread::unread_badge;

/// Result of [`ChatRuntime::open_conversation`]. A superseded load is
/// not an error: the user simply selected something else while the
/// fetch was in flight, and the stale result was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Superseded,
}

struct CoreState {
    directory: ConversationDirectory,
    composer: Composer,
    selected: Option<String>,
    generation: LoadGeneration,
    thread: Option<LoadedThread>,
}

pub struct ChatRuntime {
    api: ApiClient,
    identity: Rc<dyn IdentityResolver>,
    viewer: Viewer,
    state: Rc<RefCell<CoreState>>,
}

impl Clone for ChatRuntime {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            identity: self.identity.clone(),
            viewer: self.viewer.clone(),
            state: self.state.clone(),
        }
    }
}

impl ChatRuntime {
    pub fn new(
        config: &CoreConfig,
        identity: Rc<dyn IdentityResolver>,
        can_create_messages: bool,
    ) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let viewer = identity.viewer();
        Ok(Self {
            api,
            identity,
            viewer,
            state: Rc::new(RefCell::new(CoreState {
                directory: ConversationDirectory::new(),
                composer: Composer::new(can_create_messages),
                selected: None,
                generation: LoadGeneration(0),
                thread: None,
            })),
        })
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Report a failure to the identity collaborator when it is an
    /// authorization failure, then hand it back to the caller.
    fn surface(&self, err: CoreError) -> CoreError {
        if matches!(err, CoreError::Unauthorized) {
            self.identity.force_logout();
        }
        err
    }

    // ── Conversation Directory ─────────────────────────────────

    /// Re-fetch the directory. Idempotent against unchanged backend
    /// state. On failure the previously fetched list is retained.
    pub async fn refresh_directory(&self) -> Result<()> {
        let fetched = self
            .api
            .list_conversations(&self.viewer)
            .await
            .map_err(|e| self.surface(e))?;

        let mut conversations = fetched;
        // The backend already scopes the query; keep the participant
        // check anyway so a misrouted record can never show up.
        conversations.retain(|c| c.involves(&self.viewer));

        self.state.borrow_mut().directory.replace(conversations);
        Ok(())
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        self.state.borrow().directory.conversations().to_vec()
    }

    pub fn filtered_conversations(&self, filter: &DirectoryFilter) -> Vec<Conversation> {
        self.state.borrow().directory.filtered(filter)
    }

    /// Badge value for a directory row; 0 for ids not in the directory.
    pub fn unread_badge(&self, conversation_id: &str) -> u32 {
        let state = self.state.borrow();
        state
            .directory
            .get(conversation_id)
            .map(|c| unread_badge(c, &self.viewer))
            .unwrap_or(0)
    }

    // ── Selection and thread loading ───────────────────────────

    /// Open a conversation: lifecycle guard, concurrent thread and pet
    /// fetch, stale-load discard, then best-effort mark-read and a
    /// directory refresh.
    pub async fn open_conversation(&self, conversation_id: &str) -> Result<OpenOutcome> {
        let pet_id = {
            let state = self.state.borrow();
            let conversation = state.directory.get(conversation_id).ok_or_else(|| {
                CoreError::UnknownConversation(conversation_id.to_string())
            })?;
            // Lifecycle guard: a closed conversation cannot be selected,
            // so neither the thread load nor the composer runs for it.
            if conversation.is_closed() {
                return Err(CoreError::ConversationClosed(conversation_id.to_string()));
            }
            conversation.pet_id.clone()
        };

        let generation = {
            let mut state = self.state.borrow_mut();
            state.selected = Some(conversation_id.to_string());
            state.generation = state.generation.next();
            state.generation
        };

        // Both reads are issued together; the thread is not ready
        // until both resolve.
        let (messages, pet) = tokio::join!(
            self.api.list_messages(conversation_id),
            self.api.get_pet(&pet_id)
        );

        // Another selection may have been made while we were waiting.
        // Stale results must not touch the newer selection's state.
        if self.state.borrow().generation != generation {
            info!(conversation_id, "discarding superseded thread load");
            return Ok(OpenOutcome::Superseded);
        }

        let (messages, pet) = match (messages, pet) {
            (Ok(messages), Ok(pet)) => (messages, pet),
            (Err(e), _) | (_, Err(e)) => {
                // Show an explicit empty/error state rather than a
                // thread paired with the wrong pet context.
                self.state.borrow_mut().thread = None;
                return Err(self.surface(e));
            }
        };

        self.state.borrow_mut().thread = Some(LoadedThread::new(
            conversation_id.to_string(),
            messages,
            pet,
        ));

        // Read receipts are best-effort: log and keep the thread.
        match self.api.mark_read(conversation_id, self.viewer.kind).await {
            Ok(()) => {}
            Err(CoreError::Unauthorized) => {
                return Err(self.surface(CoreError::Unauthorized));
            }
            Err(e) => warn!(conversation_id, error = %e, "mark-read failed"),
        }

        // Refresh so the zeroed counter and any new activity land in
        // the directory; a failed refresh keeps the stale list.
        match self.refresh_directory().await {
            Ok(()) => {}
            Err(CoreError::Unauthorized) => return Err(CoreError::Unauthorized),
            Err(e) => warn!(error = %e, "directory refresh after open failed"),
        }

        Ok(OpenOutcome::Opened)
    }

    pub fn selected_conversation(&self) -> Option<String> {
        self.state.borrow().selected.clone()
    }

    /// The currently loaded thread, if the latest load has resolved.
    pub fn current_thread(&self) -> Option<LoadedThread> {
        self.state.borrow().thread.clone()
    }

    // ── Composer ───────────────────────────────────────────────

    pub fn set_draft(&self, conversation_id: &str, text: impl Into<String>) {
        self.state
            .borrow_mut()
            .composer
            .set_draft(conversation_id, text);
    }

    pub fn draft(&self, conversation_id: &str) -> String {
        self.state.borrow().composer.draft(conversation_id).to_string()
    }

    /// Send the current draft for `conversation_id`. On success the
    /// server's canonical message is appended to the loaded thread,
    /// the draft is cleared, and the directory is refreshed (in that
    /// order, so the directory never trails the confirmed send). On
    /// failure the draft is preserved for retry.
    pub async fn send_message(&self, conversation_id: &str) -> Result<Message> {
        let outgoing = {
            let state = self.state.borrow();
            let conversation = state.directory.get(conversation_id).ok_or_else(|| {
                CoreError::UnknownConversation(conversation_id.to_string())
            })?;
            state.composer.prepare(conversation, &self.viewer)?
        };

        let message = self
            .api
            .send_message(&outgoing)
            .await
            .map_err(|e| self.surface(e))?;

        {
            let mut state = self.state.borrow_mut();
            state.composer.clear_draft(conversation_id);
            if let Some(thread) = state
                .thread
                .as_mut()
                .filter(|t| t.conversation_id == conversation_id)
            {
                thread.append(message.clone());
            }
        }

        // Sequenced after the send resolved, never concurrently with it.
        match self.refresh_directory().await {
            Ok(()) => {}
            Err(CoreError::Unauthorized) => return Err(CoreError::Unauthorized),
            Err(e) => warn!(error = %e, "directory refresh after send failed"),
        }

        Ok(message)
    }
}
