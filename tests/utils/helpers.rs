/// Router-level test harness
///
/// Builds the full axum app over in-memory repositories and drives it with
/// `tower::ServiceExt::oneshot`, so handlers, extractors and error bodies are
/// exercised exactly as a client sees them.
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use critiq_lib::api::{build_router, AppState, API_PREFIX};
use critiq_lib::modules::auth::{MailDispatcher, OutgoingMail, TokenService};
use critiq_lib::modules::catalog::domain::TaxonomyEntry;
use critiq_lib::modules::reviews::domain::Review;
use critiq_lib::modules::users::domain::{User, UserRole};
use critiq_lib::shared::config::{
    AppConfig, AuthSettings, DatabaseSettings, MailSettings, PaginationSettings,
};
use critiq_lib::shared::errors::AppResult;
use critiq_lib::shared::validation::ValidationRules;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

use super::factories::{taxonomy, UserFactory};
use super::memory::{MemoryStore, TitleRow};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().expect("valid socket address"),
        database: DatabaseSettings {
            url: "postgres://unused@localhost/unused".to_string(),
            max_connections: Some(1),
        },
        auth: AuthSettings::with_secret(TEST_SECRET),
        mail: MailSettings {
            default_from_email: "noreply@critiq.test".to_string(),
        },
        pagination: PaginationSettings::default(),
        validation: ValidationRules::default(),
    }
}

/// Keeps every outgoing message so tests can read confirmation codes.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("mailer lock").clone()
    }

    /// Code from the newest message addressed to `email`.
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent()
            .iter()
            .rev()
            .find(|mail| mail.to == email)
            .and_then(|mail| mail.body.rsplit(' ').next().map(str::to_string))
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        self.sent.lock().expect("mailer lock").push(mail);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub mailer: Arc<RecordingMailer>,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::new(store.repositories(), &config, mailer.clone())
            .expect("Failed to build app state");

        Self {
            router: build_router(state),
            store,
            mailer,
            tokens: TokenService::new(&config.auth),
        }
    }

    /// Send a request under the API prefix. `path` starts with `/`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let uri = if path.starts_with("/health") {
            path.to_string()
        } else {
            format!("{}{}", API_PREFIX, path)
        };
        self.send_raw(method, &uri, token.map(|t| format!("Bearer {}", t)), body)
            .await
    }

    /// Send to an absolute URI with an arbitrary Authorization header.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<String>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, token, Some(body)).await
    }

    pub async fn patch(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, path, token, None).await
    }

    // ============= SEEDING =============

    pub fn insert_user(&self, user: User) -> (User, String) {
        let token = self.tokens.issue(&user).expect("Failed to issue token");
        self.store.lock().users.push(user.clone());
        (user, token)
    }

    pub fn seed_user(&self, username: &str, role: UserRole) -> (User, String) {
        self.insert_user(
            UserFactory::new()
                .with_username(username)
                .with_role(role)
                .build(),
        )
    }

    pub fn seed_category(&self, name: &str, slug: &str) -> TaxonomyEntry {
        let entry = taxonomy(name, slug);
        self.store.lock().categories.push(entry.clone());
        entry
    }

    pub fn seed_genre(&self, name: &str, slug: &str) -> TaxonomyEntry {
        let entry = taxonomy(name, slug);
        self.store.lock().genres.push(entry.clone());
        entry
    }

    pub fn seed_title(
        &self,
        name: &str,
        year: i32,
        category: Option<&TaxonomyEntry>,
        genres: &[&TaxonomyEntry],
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.store.lock().titles.push(TitleRow {
            id,
            name: name.to_string(),
            year,
            description: None,
            category_id: category.map(|c| c.id),
            genre_ids: genres.iter().map(|g| g.id).collect(),
        });
        id
    }

    pub fn seed_review(&self, review: Review) -> Uuid {
        let id = review.id;
        self.store.lock().reviews.push(review);
        id
    }
}
