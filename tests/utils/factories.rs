/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use chrono::{DateTime, Utc};
use critiq_lib::modules::catalog::domain::TaxonomyEntry;
use critiq_lib::modules::reviews::domain::Review;
use critiq_lib::modules::users::domain::{User, UserRole};
use uuid::Uuid;

pub struct UserFactory {
    username: String,
    email: Option<String>,
    role: UserRole,
    is_superuser: bool,
}

impl Default for UserFactory {
    fn default() -> Self {
        Self {
            username: format!("user{}", rand::random::<u32>() % 1_000_000),
            email: None,
            role: UserRole::User,
            is_superuser: false,
        }
    }
}

impl UserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    pub fn build(self) -> User {
        let email = self
            .email
            .unwrap_or_else(|| format!("{}@example.com", self.username));
        User::new(self.username, email, self.role).with_superuser(self.is_superuser)
    }
}

pub fn taxonomy(name: &str, slug: &str) -> TaxonomyEntry {
    TaxonomyEntry::new(name.to_string(), slug.to_string())
}

pub struct ReviewFactory {
    title_id: Uuid,
    author_id: Uuid,
    text: String,
    score: i16,
    pub_date: Option<DateTime<Utc>>,
}

impl ReviewFactory {
    pub fn new(title_id: Uuid, author_id: Uuid) -> Self {
        Self {
            title_id,
            author_id,
            text: "Worth watching".to_string(),
            score: 7,
            pub_date: None,
        }
    }

    pub fn with_score(mut self, score: i16) -> Self {
        self.score = score;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn published_at(mut self, pub_date: DateTime<Utc>) -> Self {
        self.pub_date = Some(pub_date);
        self
    }

    pub fn build(self) -> Review {
        let mut review = Review::new(self.title_id, self.author_id, self.text, self.score);
        if let Some(pub_date) = self.pub_date {
            review.pub_date = pub_date;
        }
        review
    }
}
