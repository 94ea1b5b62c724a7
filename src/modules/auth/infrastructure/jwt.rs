use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::modules::auth::domain::Claims;
use crate::modules::users::domain::User;
use crate::shared::config::AuthSettings;
use crate::shared::errors::AppResult;

/// HS256 bearer token issuer and verifier.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(settings: &AuthSettings) -> Self {
        let secret = settings.jwt_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: settings.token_ttl,
        }
    }

    pub fn issue(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user.id, user.username.clone(), self.ttl);
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Signature and expiry are checked; the caller still has to confirm the
    /// subject exists.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
