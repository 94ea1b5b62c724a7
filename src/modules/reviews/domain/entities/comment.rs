use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub review_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl Comment {
    pub fn new(review_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            review_id,
            author_id,
            text,
            pub_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentDetails {
    pub comment: Comment,
    pub review_text: String,
    pub author_username: String,
}
