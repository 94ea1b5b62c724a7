use uuid::Uuid;

use crate::modules::users::domain::{User, UserRole};

/// The authenticated account behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub is_superuser: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            is_superuser: user.is_superuser,
        }
    }
}

/// Who is asking. Anonymous requests carry no credential at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Identity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(principal) => Some(principal),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Identity::Anonymous => Capabilities::default(),
            Identity::Authenticated(principal) => Capabilities {
                is_authenticated: true,
                is_admin: principal.is_superuser || principal.role == UserRole::Admin,
                is_moderator: principal.role == UserRole::Moderator,
            },
        }
    }

    /// Display label for logs.
    pub fn label(&self) -> &str {
        match self {
            Identity::Anonymous => "anonymous",
            Identity::Authenticated(principal) => &principal.username,
        }
    }
}

/// Flat capability set derived from an identity's role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub is_moderator: bool,
}
