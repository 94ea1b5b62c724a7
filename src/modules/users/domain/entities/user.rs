use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::users::domain::value_objects::UserRole;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            bio: String::new(),
            role,
            is_superuser: false,
            date_joined: Utc::now(),
        }
    }

    pub fn with_superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }

    /// Admin role or the superuser escape hatch.
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.role == UserRole::Admin
    }

    pub fn is_moderator(&self) -> bool {
        self.role == UserRole::Moderator
    }
}

/// Hash of the most recently dispatched confirmation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredConfirmation {
    pub code_hash: String,
    pub issued_at: DateTime<Utc>,
}
