use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::reviews::domain::{Comment, Review};
use crate::schema::{comments, reviews};

// ============= REVIEW MODELS =============

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewModel {
    pub id: Uuid,
    pub title_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

// Author, title and publication date never change
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = reviews)]
pub struct ReviewChangeset<'a> {
    pub text: &'a str,
    pub score: i16,
}

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Self {
            id: model.id,
            title_id: model.title_id,
            author_id: model.author_id,
            text: model.text,
            score: model.score,
            pub_date: model.pub_date,
        }
    }
}

impl From<&Review> for ReviewModel {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            title_id: review.title_id,
            author_id: review.author_id,
            text: review.text.clone(),
            score: review.score,
            pub_date: review.pub_date,
        }
    }
}

// ============= COMMENT MODELS =============

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentModel {
    pub id: Uuid,
    pub review_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Self {
            id: model.id,
            review_id: model.review_id,
            author_id: model.author_id,
            text: model.text,
            pub_date: model.pub_date,
        }
    }
}

impl From<&Comment> for CommentModel {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            review_id: comment.review_id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            pub_date: comment.pub_date,
        }
    }
}
