use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::config::Config;
use crate::domain::models::auth::Claims;
use crate::error::AppError;

/// Verifies access tokens minted by the external identity provider.
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .expect("Invalid JWT Public Key PEM");

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[config.auth_audience.as_str()]);
        validation.set_issuer(&[config.auth_issuer.as_str()]);

        Self { decoding_key, validation }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected access token: {}", e);
                AppError::Unauthorized
            })
    }

    /// Resolves the numeric user id carried in `sub`.
    pub fn user_id(claims: &Claims) -> Result<i64, AppError> {
        claims.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}
