use std::fmt;

use uuid::Uuid;

use super::identity::Identity;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn is_read(self) -> bool {
        matches!(self, Action::Read)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Read => write!(f, "read"),
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// What a request is acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Categories, genres and titles.
    Catalog,
    /// Review or comment collections, before a specific object is known.
    ReviewThread,
    Review { author_id: Uuid },
    Comment { author_id: Uuid },
    /// The administrative user listing and any account other than one's own.
    UserDirectory,
    /// The caller's own account through the self-service endpoint.
    OwnAccount,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Catalog => write!(f, "catalog"),
            Resource::ReviewThread => write!(f, "review thread"),
            Resource::Review { .. } => write!(f, "review"),
            Resource::Comment { .. } => write!(f, "comment"),
            Resource::UserDirectory => write!(f, "user directory"),
            Resource::OwnAccount => write!(f, "own account"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No credential was presented; the caller should authenticate.
    Unauthenticated,
    /// A credential was presented but it does not grant this action.
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn into_result(self) -> AppResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(DenyReason::Unauthenticated) => Err(AppError::Unauthorized(
                "Authentication credentials were not provided".to_string(),
            )),
            Decision::Deny(DenyReason::Forbidden) => Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            )),
        }
    }
}

/// Decide whether `identity` may perform `action` on `resource`.
///
/// Pure: no storage access, so ownership must already be resolved into the
/// resource value.
pub fn authorize(identity: &Identity, resource: &Resource, action: Action) -> Decision {
    let caps = identity.capabilities();

    let require_auth = |granted: bool| {
        if !caps.is_authenticated {
            Decision::Deny(DenyReason::Unauthenticated)
        } else if granted {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::Forbidden)
        }
    };

    match resource {
        Resource::Catalog if action.is_read() => Decision::Allow,
        Resource::Catalog => require_auth(caps.is_admin),

        Resource::ReviewThread if action.is_read() => Decision::Allow,
        Resource::ReviewThread => require_auth(true),

        Resource::Review { author_id } | Resource::Comment { author_id } => {
            if action.is_read() {
                return Decision::Allow;
            }
            let is_author = identity
                .principal()
                .is_some_and(|principal| principal.user_id == *author_id);
            require_auth(is_author || caps.is_moderator || caps.is_admin)
        }

        Resource::UserDirectory => require_auth(caps.is_admin),

        Resource::OwnAccount => require_auth(matches!(action, Action::Read | Action::Update)),
    }
}

/// [`authorize`] plus logging, mapped onto the error taxonomy.
pub fn ensure(identity: &Identity, resource: &Resource, action: Action) -> AppResult<()> {
    let decision = authorize(identity, resource, action);
    if !decision.is_allowed() {
        LogContext::access_denied(identity.label(), &action.to_string(), &resource.to_string());
    }
    decision.into_result()
}
