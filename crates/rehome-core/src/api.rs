//! REST client for the platform backend.
//!
//! Five calls, matching the backend contracts the core depends on.
//! Exact response schemas are the backend's concern; these methods only
//! require the field shapes the models deserialize.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::identity::{Viewer, ViewerKind};
use crate::models::{Conversation, Message, OutgoingMessage, PetContext};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &CoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base: config.api_base.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}/{}", self.base, path));
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Map 401 to [`CoreError::Unauthorized`] and any other non-2xx to
    /// [`CoreError::Api`], consuming the body as the error message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CoreError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    /// `GET conversations?viewerKind=..&participantId=..`
    pub async fn list_conversations(&self, viewer: &Viewer) -> Result<Vec<Conversation>> {
        debug!(viewer_id = %viewer.id, "fetching conversation directory");
        let response = self
            .request(reqwest::Method::GET, "conversations")
            .query(&[
                ("viewerKind", viewer.kind.as_query()),
                ("participantId", viewer.id.as_str()),
            ])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `GET messages?conversationId=..`. Order is whatever the backend
    /// returns; callers re-sort.
    pub async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        debug!(conversation_id, "fetching message thread");
        let response = self
            .request(reqwest::Method::GET, "messages")
            .query(&[("conversationId", conversation_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `POST messages`, returning the server's canonical record.
    pub async fn send_message(&self, outgoing: &OutgoingMessage) -> Result<Message> {
        debug!(conversation_id = %outgoing.conversation_id, "sending message");
        let response = self
            .request(reqwest::Method::POST, "messages")
            .json(outgoing)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// `PUT conversations/{id}/read`. Acknowledgement only; the body
    /// carries the viewer kind so the backend zeroes the right counter.
    pub async fn mark_read(&self, conversation_id: &str, viewer_kind: ViewerKind) -> Result<()> {
        debug!(conversation_id, "marking conversation read");
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("conversations/{conversation_id}/read"),
            )
            .json(&serde_json::json!({ "viewerKind": viewer_kind.as_query() }))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// `GET pets/{id}` from the external Pet collaborator.
    pub async fn get_pet(&self, pet_id: &str) -> Result<PetContext> {
        debug!(pet_id, "fetching pet context");
        let response = self
            .request(reqwest::Method::GET, &format!("pets/{pet_id}"))
            .send()
            .await?;
        Self::decode(response).await
    }
}
