use std::sync::Arc;

use crate::config::Config;
use crate::domain::{models::auth::Claims, models::store::Store, ports::StoreRepository};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use tracing::info;

const TOKEN_TTL_HOURS: i64 = 24;

pub struct AuthService {
    repo: Arc<dyn StoreRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(repo: Arc<dyn StoreRepository>, config: &Config) -> Self {
        Self {
            repo,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    pub async fn register(
        &self,
        store_name: &str,
        username: &str,
        password: &str,
    ) -> Result<(Store, String), AppError> {
        validate_credentials(store_name, username, password)?;

        if self.repo.find_by_store_name(store_name).await?.is_some() {
            return Err(AppError::Conflict("Store name already taken".into()));
        }
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("Username already taken".into()));
        }

        let password_hash = self.hash_password(password)?;
        let store = Store::new(
            store_name.to_string(),
            username.to_string(),
            password_hash,
        );
        let created = self.repo.create(&store).await?;
        let token = self.issue_token(&created)?;

        info!(store_id = %created.id, "store registered");
        Ok((created, token))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(Store, String), AppError> {
        let store = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let parsed_hash = PasswordHash::new(&store.password_hash).map_err(|_| AppError::Internal)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)?;

        self.repo.touch_last_login(&store.id).await?;
        let token = self.issue_token(&store)?;

        info!(store_id = %store.id, "store logged in");
        Ok((store, token))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    fn issue_token(&self, store: &Store) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: store.id.clone(),
            store_name: store.store_name.clone(),
            username: store.username.clone(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AppError::Internal)?
            .to_string())
    }
}

fn validate_credentials(store_name: &str, username: &str, password: &str) -> Result<(), AppError> {
    let name_len = store_name.trim().chars().count();
    if !(2..=50).contains(&name_len) {
        return Err(AppError::Validation(
            "Store name must be between 2 and 50 characters".into(),
        ));
    }
    let user_len = username.chars().count();
    if !(3..=30).contains(&user_len)
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(AppError::Validation(
            "Username must be 3-30 characters of letters, digits and underscores".into(),
        ));
    }
    if password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}
