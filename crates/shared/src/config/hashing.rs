use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::{abstract_trait::HashingTrait, utils::AppError};

#[derive(Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new() -> Self {
        Hashing { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Hashing { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_string();
        let cost = self.cost;

        let hashed = tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))??;

        Ok(hashed)
    }

    async fn compare_password(
        &self,
        hashed_password: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let password = password.to_string();
        let hashed_password = hashed_password.to_string();

        let verified = tokio::task::spawn_blocking(move || verify(password, &hashed_password))
            .await
            .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?;

        match verified {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::InvalidCredentials),
            Err(e) => Err(AppError::BcryptError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_compare() {
        let hashing = Hashing::with_cost(4);
        let hashed = hashing.hash_password("correct horse").await.unwrap();

        assert_ne!(hashed, "correct horse");
        assert!(hashing.compare_password(&hashed, "correct horse").await.is_ok());
        assert!(matches!(
            hashing.compare_password(&hashed, "wrong horse").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn hashing_runs_off_the_async_worker() {
        let hashing = Hashing::with_cost(4);

        let (a, b) = tokio::join!(
            hashing.hash_password("first password"),
            hashing.hash_password("second password")
        );

        assert!(hashing.compare_password(&a.unwrap(), "first password").await.is_ok());
        assert!(hashing.compare_password(&b.unwrap(), "second password").await.is_ok());
    }

    #[tokio::test]
    async fn compare_against_garbage_hash_is_bcrypt_error() {
        let hashing = Hashing::with_cost(4);
        assert!(matches!(
            hashing.compare_password("not-a-hash", "whatever").await,
            Err(AppError::BcryptError(_))
        ));
    }
}
