use crate::{abstract_trait::JwtServiceTrait, utils::AppError};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind as JwtError,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(user_id: i64, exp: usize, iat: usize) -> Self {
        Claims { user_id, exp, iat }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
    pub session_minutes: i64,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            session_minutes: 8 * 60,
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + Duration::minutes(self.session_minutes)).timestamp() as usize;

        let claims = Claims::new(user_id, exp, iat);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(AppError::TokenGenerationError)
    }

    fn verify_token(&self, token: &str) -> Result<i64, AppError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());

        match decode::<Claims>(token, &decoding_key, &Validation::default()) {
            Ok(token_data) => {
                let current_time = Utc::now().timestamp() as usize;

                if token_data.claims.exp >= current_time {
                    Ok(token_data.claims.user_id)
                } else {
                    Err(AppError::TokenExpiredError)
                }
            }
            Err(err) => {
                if let JwtError::ExpiredSignature = err.kind() {
                    Err(AppError::TokenExpiredError)
                } else {
                    warn!("Error decoding session token: {err}");
                    Err(AppError::TokenValidationError)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_and_verify_token() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token(42).unwrap();

        assert_eq!(jwt.verify_token(&token).unwrap(), 42);
    }

    #[test]
    fn verify_with_wrong_secret_fails() {
        let token = JwtConfig::new("secret-a").generate_token(7).unwrap();
        let result = JwtConfig::new("secret-b").verify_token(&token);

        assert!(matches!(result, Err(AppError::TokenValidationError)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtConfig {
            jwt_secret: "test-secret".to_string(),
            session_minutes: -10,
        };
        let token = jwt.generate_token(1).unwrap();

        assert!(matches!(
            jwt.verify_token(&token),
            Err(AppError::TokenExpiredError)
        ));
    }
}
