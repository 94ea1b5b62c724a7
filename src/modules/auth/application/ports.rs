use async_trait::async_trait;

use crate::shared::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Out-of-band delivery of confirmation codes.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()>;
}
