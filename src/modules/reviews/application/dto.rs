use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::reviews::domain::{CommentDetails, ReviewDetails};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub score: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
}

/// Title and author are rendered by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub author: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

impl From<ReviewDetails> for ReviewResponse {
    fn from(details: ReviewDetails) -> Self {
        Self {
            id: details.review.id,
            title: details.title_name,
            text: details.review.text,
            author: details.author_username,
            score: details.review.score,
            pub_date: details.review.pub_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub review: String,
    pub text: String,
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

impl From<CommentDetails> for CommentResponse {
    fn from(details: CommentDetails) -> Self {
        Self {
            id: details.comment.id,
            review: details.review_text,
            text: details.comment.text,
            author: details.author_username,
            pub_date: details.comment.pub_date,
        }
    }
}
