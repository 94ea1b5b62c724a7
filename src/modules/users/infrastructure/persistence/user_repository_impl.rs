use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::users::domain::{StoredConfirmation, User, UserRepository};
use crate::modules::users::infrastructure::models::{
    ConfirmationChangeset, NewUserModel, UserChangeset, UserModel,
};
use crate::schema::users;
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::query::{contains_pattern, unique_violation};
use crate::shared::utils::TimedOperation;
use crate::shared::Database;

pub struct UserRepositoryImpl {
    db: Arc<Database>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

fn filtered(search: Option<&str>) -> users::BoxedQuery<'static, Pg> {
    let mut query = users::table.into_boxed();
    if let Some(search) = search {
        query = query.filter(users::username.ilike(contains_pattern(search)));
    }
    query
}

/// Map username/email collisions onto the offending field.
fn translate_write_error(err: diesel::result::Error) -> AppError {
    match unique_violation(&err).as_deref() {
        Some("users_username_key") => {
            AppError::field("username", "A user with that username already exists")
        }
        Some("users_email_key") => {
            AppError::field("email", "A user with that email already exists")
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        let id = *id;
        self.db
            .with_connection(move |conn| {
                let model = users::table
                    .find(id)
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()?;
                Ok(model.map(User::from))
            })
            .await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let username = username.to_string();
        self.db
            .with_connection(move |conn| {
                let model = users::table
                    .filter(users::username.eq(username))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()?;
                Ok(model.map(User::from))
            })
            .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_string();
        self.db
            .with_connection(move |conn| {
                let model = users::table
                    .filter(users::email.eq(email))
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
                    .optional()?;
                Ok(model.map(User::from))
            })
            .await
    }

    async fn list(&self, search: Option<String>, page: PageRequest) -> AppResult<Page<User>> {
        self.db
            .with_connection(move |conn| {
                let timer = TimedOperation::new("list", "users");

                let total: i64 = filtered(search.as_deref()).count().get_result(conn)?;
                let models = filtered(search.as_deref())
                    .order(users::username.asc())
                    .limit(page.limit())
                    .offset(page.offset())
                    .select(UserModel::as_select())
                    .load::<UserModel>(conn)?;

                timer.finish();
                Ok(Page::new(
                    models.into_iter().map(User::from).collect(),
                    total as u64,
                ))
            })
            .await
    }

    async fn insert(&self, user: &User) -> AppResult<User> {
        let user = user.clone();
        self.db
            .with_connection(move |conn| {
                let model = diesel::insert_into(users::table)
                    .values(NewUserModel::from(&user))
                    .returning(UserModel::as_returning())
                    .get_result::<UserModel>(conn)
                    .map_err(translate_write_error)?;
                Ok(User::from(model))
            })
            .await
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let user = user.clone();
        self.db
            .with_connection(move |conn| {
                let model = diesel::update(users::table.find(user.id))
                    .set(UserChangeset::from(&user))
                    .returning(UserModel::as_returning())
                    .get_result::<UserModel>(conn)
                    .map_err(translate_write_error)?;
                Ok(User::from(model))
            })
            .await
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        let id = *id;
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(users::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("User {} not found", id)));
                }
                Ok(())
            })
            .await
    }

    async fn store_confirmation(
        &self,
        id: &Uuid,
        confirmation: StoredConfirmation,
    ) -> AppResult<()> {
        let id = *id;
        self.db
            .with_connection(move |conn| {
                diesel::update(users::table.find(id))
                    .set(ConfirmationChangeset {
                        confirmation_code_hash: Some(confirmation.code_hash),
                        confirmation_sent_at: Some(confirmation.issued_at),
                    })
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn consume_confirmation(
        &self,
        id: &Uuid,
        code_hash: &str,
        issued_after: DateTime<Utc>,
    ) -> AppResult<bool> {
        let id = *id;
        let code_hash = code_hash.to_string();
        self.db
            .with_connection(move |conn| {
                // Single conditional UPDATE; concurrent exchanges race on the row lock
                let consumed = diesel::update(
                    users::table
                        .find(id)
                        .filter(users::confirmation_code_hash.eq(code_hash))
                        .filter(users::confirmation_sent_at.ge(issued_after)),
                )
                .set(ConfirmationChangeset {
                    confirmation_code_hash: None,
                    confirmation_sent_at: None,
                })
                .execute(conn)?;
                Ok(consumed == 1)
            })
            .await
    }
}
