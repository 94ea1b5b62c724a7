use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::reviews::domain::{Review, ReviewDetails, ReviewRepository};
use crate::modules::reviews::infrastructure::models::{ReviewChangeset, ReviewModel};
use crate::schema::{reviews, titles, users};
use crate::shared::application::{Page, PageRequest};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::query::unique_violation;
use crate::shared::utils::TimedOperation;
use crate::shared::Database;

const AUTHOR_TITLE_UNIQUE: &str = "reviews_author_title_unique";

pub struct ReviewRepositoryImpl {
    db: Arc<Database>,
}

impl ReviewRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

type DetailsRow = (ReviewModel, String, String);

fn into_details((model, title_name, author_username): DetailsRow) -> ReviewDetails {
    ReviewDetails {
        review: Review::from(model),
        title_name,
        author_username,
    }
}

fn load_details(conn: &mut PgConnection, review_id: Uuid) -> AppResult<ReviewDetails> {
    let row = reviews::table
        .inner_join(titles::table)
        .inner_join(users::table)
        .filter(reviews::id.eq(review_id))
        .select((ReviewModel::as_select(), titles::name, users::username))
        .first::<DetailsRow>(conn)?;
    Ok(into_details(row))
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryImpl {
    async fn list_for_title(
        &self,
        title_id: &Uuid,
        page: PageRequest,
    ) -> AppResult<Page<ReviewDetails>> {
        let title_id = *title_id;
        self.db
            .with_connection(move |conn| {
                let timer = TimedOperation::new("list", "reviews");

                let total: i64 = reviews::table
                    .filter(reviews::title_id.eq(title_id))
                    .count()
                    .get_result(conn)?;
                let rows = reviews::table
                    .inner_join(titles::table)
                    .inner_join(users::table)
                    .filter(reviews::title_id.eq(title_id))
                    .order((reviews::pub_date.asc(), reviews::id.asc()))
                    .limit(page.limit())
                    .offset(page.offset())
                    .select((ReviewModel::as_select(), titles::name, users::username))
                    .load::<DetailsRow>(conn)?;

                timer.finish();
                Ok(Page::new(
                    rows.into_iter().map(into_details).collect(),
                    total as u64,
                ))
            })
            .await
    }

    async fn find(&self, title_id: &Uuid, review_id: &Uuid) -> AppResult<Option<ReviewDetails>> {
        let (title_id, review_id) = (*title_id, *review_id);
        self.db
            .with_connection(move |conn| {
                let row = reviews::table
                    .inner_join(titles::table)
                    .inner_join(users::table)
                    .filter(reviews::id.eq(review_id))
                    .filter(reviews::title_id.eq(title_id))
                    .select((ReviewModel::as_select(), titles::name, users::username))
                    .first::<DetailsRow>(conn)
                    .optional()?;
                Ok(row.map(into_details))
            })
            .await
    }

    async fn exists_for_author(&self, title_id: &Uuid, author_id: &Uuid) -> AppResult<bool> {
        let (title_id, author_id) = (*title_id, *author_id);
        self.db
            .with_connection(move |conn| {
                let found = diesel::select(diesel::dsl::exists(
                    reviews::table
                        .filter(reviews::title_id.eq(title_id))
                        .filter(reviews::author_id.eq(author_id)),
                ))
                .get_result::<bool>(conn)?;
                Ok(found)
            })
            .await
    }

    async fn insert(&self, review: &Review) -> AppResult<ReviewDetails> {
        let model = ReviewModel::from(review);
        self.db
            .with_connection(move |conn| {
                let id = model.id;
                match diesel::insert_into(reviews::table).values(&model).execute(conn) {
                    Ok(_) => load_details(conn, id),
                    Err(err) if unique_violation(&err).as_deref() == Some(AUTHOR_TITLE_UNIQUE) => {
                        Err(AppError::ValidationError(
                            "You have already reviewed this title".to_string(),
                        ))
                    }
                    Err(err) => Err(err.into()),
                }
            })
            .await
    }

    async fn update(&self, review: &Review) -> AppResult<ReviewDetails> {
        let review = review.clone();
        self.db
            .with_connection(move |conn| {
                let updated = diesel::update(reviews::table.find(review.id))
                    .set(ReviewChangeset {
                        text: &review.text,
                        score: review.score,
                    })
                    .execute(conn)?;
                if updated == 0 {
                    return Err(AppError::NotFound(format!("Review {} not found", review.id)));
                }
                load_details(conn, review.id)
            })
            .await
    }

    async fn delete(&self, review_id: &Uuid) -> AppResult<()> {
        let review_id = *review_id;
        self.db
            .with_connection(move |conn| {
                let deleted = diesel::delete(reviews::table.find(review_id)).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::NotFound(format!("Review {} not found", review_id)));
                }
                Ok(())
            })
            .await
    }
}
