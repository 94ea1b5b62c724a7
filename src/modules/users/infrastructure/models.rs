use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::users::domain::{User, UserRole};
use crate::schema::users;

// ============= USER MODELS =============

// For reading from database; confirmation columns are loaded separately
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserModel {
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

// For inserting new users
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserModel<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub bio: &'a str,
    pub role: UserRole,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

// For updating profile fields (excludes id, superuser flag and date_joined)
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
pub struct UserChangeset<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub bio: &'a str,
    pub role: UserRole,
}

// Confirmation code columns; None clears them
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct ConfirmationChangeset {
    pub confirmation_code_hash: Option<String>,
    pub confirmation_sent_at: Option<DateTime<Utc>>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            bio: model.bio,
            role: model.role,
            is_superuser: model.is_superuser,
            date_joined: model.date_joined,
        }
    }
}

impl<'a> From<&'a User> for NewUserModel<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: user.id,
            username: &user.username,
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
            bio: &user.bio,
            role: user.role,
            is_superuser: user.is_superuser,
            date_joined: user.date_joined,
        }
    }
}

impl<'a> From<&'a User> for UserChangeset<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
            bio: &user.bio,
            role: user.role,
        }
    }
}
