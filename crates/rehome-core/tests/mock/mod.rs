//! Minimal in-process stand-in for the platform's REST backend.
//!
//! Serves the five endpoint shapes the core depends on, with switches
//! for the failure modes exercised by the tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;

#[derive(Default)]
struct Inner {
    conversations: Vec<Value>,
    messages: HashMap<String, Vec<Value>>,
    pets: HashMap<String, Value>,
    gates: HashMap<String, Arc<Notify>>,
    mark_read_calls: Vec<(String, String)>,
    message_fetches: usize,
    message_posts: usize,
    next_message_id: u64,
    unauthorized: bool,
    fail_conversations: bool,
    fail_send: bool,
    fail_mark_read: bool,
}

type Shared = Arc<Mutex<Inner>>;

pub struct MockBackend {
    inner: Shared,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_message_id: 100,
                ..Inner::default()
            })),
        }
    }

    pub async fn serve(&self) -> SocketAddr {
        let app = Router::new()
            .route("/conversations", get(list_conversations))
            .route("/conversations/:id/read", put(mark_read))
            .route("/messages", get(list_messages).post(post_message))
            .route("/pets/:id", get(get_pet))
            .with_state(self.inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    pub fn add_conversation(&self, conversation: Value) {
        self.inner.lock().unwrap().conversations.push(conversation);
    }

    pub fn add_message(&self, message: Value) {
        let conversation_id = message["conversationId"].as_str().unwrap().to_string();
        self.inner
            .lock()
            .unwrap()
            .messages
            .entry(conversation_id)
            .or_default()
            .push(message);
    }

    pub fn add_pet(&self, pet: Value) {
        let id = pet["id"].as_str().unwrap().to_string();
        self.inner.lock().unwrap().pets.insert(id, pet);
    }

    /// Hold every message fetch for `conversation_id` until the
    /// returned notify is signalled.
    pub fn gate_messages(&self, conversation_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner
            .lock()
            .unwrap()
            .gates
            .insert(conversation_id.to_string(), gate.clone());
        gate
    }

    pub fn set_unauthorized(&self, value: bool) {
        self.inner.lock().unwrap().unauthorized = value;
    }

    pub fn set_fail_conversations(&self, value: bool) {
        self.inner.lock().unwrap().fail_conversations = value;
    }

    pub fn set_fail_send(&self, value: bool) {
        self.inner.lock().unwrap().fail_send = value;
    }

    pub fn set_fail_mark_read(&self, value: bool) {
        self.inner.lock().unwrap().fail_mark_read = value;
    }

    pub fn mark_read_calls(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().mark_read_calls.clone()
    }

    pub fn message_fetches(&self) -> usize {
        self.inner.lock().unwrap().message_fetches
    }

    pub fn message_posts(&self) -> usize {
        self.inner.lock().unwrap().message_posts
    }
}

async fn list_conversations(State(state): State<Shared>) -> Response {
    let inner = state.lock().unwrap();
    if inner.unauthorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if inner.fail_conversations {
        return (StatusCode::INTERNAL_SERVER_ERROR, "directory unavailable").into_response();
    }
    Json(inner.conversations.clone()).into_response()
}

async fn list_messages(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (gate, reply) = {
        let mut inner = state.lock().unwrap();
        inner.message_fetches += 1;
        if inner.unauthorized {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        let conversation_id = params.get("conversationId").cloned().unwrap_or_default();
        (
            inner.gates.get(&conversation_id).cloned(),
            inner
                .messages
                .get(&conversation_id)
                .cloned()
                .unwrap_or_default(),
        )
    };
    if let Some(gate) = gate {
        gate.notified().await;
    }
    Json(reply).into_response()
}

async fn post_message(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut inner = state.lock().unwrap();
    inner.message_posts += 1;
    if inner.unauthorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if inner.fail_send {
        return (StatusCode::INTERNAL_SERVER_ERROR, "send rejected").into_response();
    }

    let id = format!("m{}", inner.next_message_id);
    inner.next_message_id += 1;
    let conversation_id = body["conversationId"].as_str().unwrap_or_default().to_string();
    let message = json!({
        "id": id,
        "conversationId": conversation_id,
        "senderId": body["senderId"],
        "text": body["text"],
        "sentAt": body["sentAt"],
        "status": "sent",
    });

    inner
        .messages
        .entry(conversation_id.clone())
        .or_default()
        .push(message.clone());
    for conversation in &mut inner.conversations {
        if conversation["id"] == conversation_id.as_str() {
            conversation["lastMessageText"] = body["text"].clone();
            conversation["lastMessageBy"] = body["senderId"].clone();
            conversation["lastMessageAt"] = body["sentAt"].clone();
        }
    }

    Json(message).into_response()
}

async fn mark_read(
    State(state): State<Shared>,
    Path(conversation_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut inner = state.lock().unwrap();
    if inner.unauthorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if inner.fail_mark_read {
        return (StatusCode::INTERNAL_SERVER_ERROR, "read receipt failed").into_response();
    }
    let viewer_kind = body["viewerKind"].as_str().unwrap_or_default().to_string();
    inner.mark_read_calls.push((conversation_id.clone(), viewer_kind));
    for conversation in &mut inner.conversations {
        if conversation["id"] == conversation_id.as_str() {
            conversation["unreadCount"] = json!(0);
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn get_pet(State(state): State<Shared>, Path(pet_id): Path<String>) -> Response {
    let inner = state.lock().unwrap();
    if inner.unauthorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match inner.pets.get(&pet_id) {
        Some(pet) => Json(pet.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "pet not found").into_response(),
    }
}

// ── Fixture builders ───────────────────────────────────────────

pub fn conversation(
    id: &str,
    pet_id: &str,
    adopter_id: &str,
    last_message_by: &str,
    unread_count: u32,
    status: &str,
    last_message_at: &str,
) -> Value {
    json!({
        "id": id,
        "petId": pet_id,
        "petName": "Biscuit",
        "participants": [
            {
                "kind": "adopter",
                "id": adopter_id,
                "name": "Emily Davis",
                "email": "emily@example.com",
            },
            {
                "kind": "rescueOrg",
                "id": "org-1",
                "name": "Happy Tails Rescue",
            },
        ],
        "status": status,
        "lastMessageText": "Last words",
        "lastMessageAt": last_message_at,
        "lastMessageBy": last_message_by,
        "unreadCount": unread_count,
        "createdAt": last_message_at,
        "updatedAt": last_message_at,
    })
}

pub fn message(id: &str, conversation_id: &str, sender_id: &str, text: &str, sent_at: &str) -> Value {
    json!({
        "id": id,
        "conversationId": conversation_id,
        "senderId": sender_id,
        "senderName": "Sender",
        "text": text,
        "sentAt": sent_at,
        "status": "sent",
    })
}

pub fn pet(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "images": ["https://cdn.example.org/pet.jpg"],
        "shortDescription": "A very good pet",
        "type": "dog",
        "status": "available",
    })
}
