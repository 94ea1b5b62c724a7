use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::reviews::domain::{Comment, CommentDetails, CommentRepository};
use crate::modules::reviews::infrastructure::models::CommentModel;
use crate::schema::{comments, reviews, users};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::TimedOperation;
use crate::shared::Database;

pub struct CommentRepositoryImpl {
    db: Arc<Database>,
}

impl CommentRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

type DetailsRow = (CommentModel, String, String);

fn into_details((model, review_text, author_username): DetailsRow) -> CommentDetails {
    CommentDetails {
        comment: Comment::from(model),
        review_text,
        author_username,
    }
}

fn load_details(conn: &mut PgConnection, comment_id: Uuid) -> AppResult<CommentDetails> {
    let row = comments::table
        .inner_join(reviews::table)
        .inner_join(users::table)
        .filter(comments::id.eq(comment_id))
        .select((CommentModel::as_select(), reviews::text, users::username))
        .first::<DetailsRow>(conn)?;
    Ok(into_details(row))
}

#[async_trait]
impl CommentRepository for CommentRepositoryImpl {
    async fn list_for_review(
        &self,
        review_id: &Uuid,
        page: PageRequest,
    ) -> AppResult<Page<CommentDetails>> {
        let review_id = *review_id;
        self.db
            .with_connection(move |conn| {
                let timer = TimedOperation::new("list", "comments");

                let total: i64 = comments::table
                    .filter(comments::review_id.eq(review_id))
                    .count()
                    .get_result(conn)?;
                let rows = comments::table
                    .inner_join(reviews::table)
                    .inner_join(users::table)
                    .filter(comments::review_id.eq(review_id))
                    .order((comments::pub_date.asc(), comments::id.asc()))
                    .limit(page.limit())
                    .offset(page.offset())
                    .select((CommentModel::as_select(), reviews::text, users::username))
                    .load::<DetailsRow>(conn)?;

                timer.finish();
                Ok(Page::new(
                    rows.into_iter().map(into_details).collect(),
                    total as u64,
                ))
            })
            .await
    }

    async fn find(
        &self,
        review_id: &Uuid,
        comment_id: &Uuid,
    ) -> AppResult<Option<CommentDetails>> {
        let (review_id, comment_id) = (*review_id, *comment_id);
        self.db
            .with_connection(move |conn| {
                let row = comments::table
                    .inner_join(reviews::table)
                    .inner_join(users::table)
                    .filter(comments::id.eq(comment_id))
                    .filter(comments::review_id.eq(review_id))
                    .select((CommentModel::as_select(), reviews::text, users::username))
                    .first::<DetailsRow>(conn)
                    .optional()?;
                Ok(row.map(into_details))
            })
            .await
    }

    async fn insert(&self, comment: &Comment) -> AppResult<CommentDetails> {
        let model = CommentModel::from(comment);
        self.db
            .with_connection(move |conn| {
                diesel::insert_into(comments::table)
                    .values(&model)
                    .execute(conn)?;
                load_details(conn, model.id)
            })
            .await
    }

    async fn update(&self, comment: &Comment) -> AppResult<CommentDetails> {
        let comment = comment.clone();
        self.db
            .with_connection(move |conn| {
                let updated = diesel::update(comments::table.find(comment.id))
                    .set(comments::text.eq(&comment.text))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(AppError::NotFound(format!("Comment {} not found", comment.id)));
                }
                load_details(conn, comment.id)
            })
            .await
    }

    async fn delete(&self, comment_id: &Uuid) -> AppResult<()> {
        let comment_id = *comment_id;
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(comments::table.find(comment_id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("Comment {} not found", comment_id)));
                }
                Ok(())
            })
            .await
    }
}
