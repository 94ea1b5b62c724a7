use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::modules::users::domain::StoredConfirmation;

const CODE_LENGTH: usize = 32;
const HASH_CONTEXT: &[u8] = b"critiq-confirmation-code-v1";

/// One-time code mailed to a user during sign-up.
///
/// Only the hash ever reaches storage; the plain value lives long enough to
/// be handed to the mail dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    pub fn generate() -> Self {
        let code = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash plus issue time, ready to persist.
    pub fn seal(&self, issued_at: DateTime<Utc>) -> StoredConfirmation {
        StoredConfirmation {
            code_hash: code_hash(&self.0),
            issued_at,
        }
    }
}

/// Hex digest stored for `code`. Candidates are hashed the same way and
/// matched in storage.
pub fn code_hash(code: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(HASH_CONTEXT);
    hasher.update(code.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Oldest issue time still honoured at `now`.
pub fn issued_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now - ttl
}
