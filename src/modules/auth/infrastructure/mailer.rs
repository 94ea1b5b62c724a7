use async_trait::async_trait;

use crate::log_debug;
use crate::modules::auth::application::ports::{MailDispatcher, OutgoingMail};
use crate::shared::errors::AppResult;

/// Records outgoing mail in the log instead of delivering it. The body
/// carries the confirmation code, so only its envelope is written.
#[derive(Debug, Default)]
pub struct LogMailDispatcher;

fn envelope(mail: &OutgoingMail) -> String {
    format!(
        "Mail from {} to {} [{}] ({} byte body withheld)",
        mail.from,
        mail.to,
        mail.subject,
        mail.body.len()
    )
}

#[async_trait]
impl MailDispatcher for LogMailDispatcher {
    async fn send(&self, mail: OutgoingMail) -> AppResult<()> {
        log_debug!("{}", envelope(&mail));
        Ok(())
    }
}
