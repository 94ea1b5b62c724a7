use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A scored opinion on a title. One per author and title.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub title_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub score: i16,
    pub pub_date: DateTime<Utc>,
}

impl Review {
    pub fn new(title_id: Uuid, author_id: Uuid, text: String, score: i16) -> Self {
        Self {
            id: Uuid::new_v4(),
            title_id,
            author_id,
            text,
            score,
            pub_date: Utc::now(),
        }
    }
}

/// A review joined with the display names it is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDetails {
    pub review: Review,
    pub title_name: String,
    pub author_username: String,
}
