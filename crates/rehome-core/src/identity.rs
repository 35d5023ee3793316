//! Who is looking at the directory.
//!
//! The platform has two kinds of authenticated principal: a lone adopter,
//! and a rescue organization whose staff members all act on the org's
//! behalf. Authorship checks ("did we send this?") must account for the
//! whole staff roster, not just the signed-in id.

use std::cell::Cell;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerKind {
    Adopter,
    /// A rescue organization. The backend's query parameter for this
    /// kind is the historical short form "Rescue".
    #[serde(rename = "Rescue")]
    RescueOrg,
}

impl ViewerKind {
    /// Value sent as the `viewerKind` query/body parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            ViewerKind::Adopter => "Adopter",
            ViewerKind::RescueOrg => "Rescue",
        }
    }
}

/// The authenticated actor, immutable for the duration of a session.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub kind: ViewerKind,
    pub id: String,
    /// Staff member ids belonging to this viewer's organization.
    /// Always empty for adopters.
    pub staff_roster: HashSet<String>,
}

impl Viewer {
    pub fn adopter(id: impl Into<String>) -> Self {
        Self {
            kind: ViewerKind::Adopter,
            id: id.into(),
            staff_roster: HashSet::new(),
        }
    }

    pub fn rescue_org(
        id: impl Into<String>,
        staff_roster: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            kind: ViewerKind::RescueOrg,
            id: id.into(),
            staff_roster: staff_roster.into_iter().collect(),
        }
    }

    /// True when `sender_id` should count as "us": the viewer itself,
    /// or any teammate on the staff roster.
    pub fn is_own_message(&self, sender_id: &str) -> bool {
        self.id == sender_id || self.staff_roster.contains(sender_id)
    }
}

/// External auth collaborator. The core never reads a global session;
/// the resolver is injected into [`crate::runtime::ChatRuntime`].
pub trait IdentityResolver {
    fn viewer(&self) -> Viewer;

    /// Called when any backend call comes back 401. Session teardown
    /// itself is the collaborator's job, not the core's.
    fn force_logout(&self);
}

/// Resolver backed by a fixed viewer, for frontends that authenticate
/// up front (and for tests).
pub struct StaticIdentity {
    viewer: Viewer,
    logged_out: Cell<bool>,
}

impl StaticIdentity {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            logged_out: Cell::new(false),
        }
    }

    pub fn is_logged_out(&self) -> bool {
        self.logged_out.get()
    }
}

impl IdentityResolver for StaticIdentity {
    fn viewer(&self) -> Viewer {
        self.viewer.clone()
    }

    fn force_logout(&self) {
        self.logged_out.set(true);
    }
}
