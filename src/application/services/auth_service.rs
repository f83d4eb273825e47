//! Authentication Service
//!
//! Handles user registration, credential verification, JWT access tokens
//! and rotating refresh sessions.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::JwtSettings;
use crate::domain::{normalize_email, NewUser, Session, SessionRepository, User, UserRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and open a session for them
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthTokens), AuthError>;

    /// Authenticate user with credentials
    async fn authenticate(&self, email: &str, password: &str)
        -> Result<(User, AuthTokens), AuthError>;

    /// Exchange a refresh token for a new token pair (the refresh token rotates)
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError>;

    /// Revoke the session behind a refresh token (logout)
    async fn revoke_token(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Revoke every session of a user. Returns how many were revoked.
    async fn revoke_all_sessions(&self, user_id: i64) -> Result<u64, AuthError>;

    /// Validate access token and extract user ID
    fn validate_token(&self, access_token: &str) -> Result<i64, AuthError>;

    /// Load the user an access token belongs to
    async fn get_current_user(&self, user_id: i64) -> Result<User, AuthError>;
}

/// Token pair handed to clients after register, login or refresh
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// JWT ID
    pub jti: String,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already exists")]
    EmailExists,

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".into())
            }
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
            AuthError::SessionNotFound => {
                AppError::Unauthorized("Invalid or expired refresh token".into())
            }
            AuthError::UserNotFound => AppError::NotFound("User not found".into()),
            AuthError::EmailExists => AppError::Conflict("Email already exists".into()),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

fn internal(e: AppError) -> AuthError {
    AuthError::Internal(e.to_string())
}

/// Hash verified against when the email is unknown, so a miss costs the same
/// as a wrong password. Uses the `Argon2::default()` parameters and matches
/// no password.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$xDrb8hI6XHnNWHzk6Mwbvg$utGubGw88qHyHRHUla59qa9+b71f7uy76UmOFUruKrw";

/// Hash a password using Argon2id with a random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its PHC-format hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash refresh token for storage
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_password_blocking(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
}

async fn verify_password_blocking(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
}

/// AuthService implementation
pub struct AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    jwt_settings: JwtSettings,
}

impl<U, S> AuthServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repo,
            session_repo,
            jwt_settings,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.jwt_settings.issuer.as_str()]);
        validation
    }

    /// Generate access and refresh tokens
    fn generate_tokens(&self, user_id: i64) -> Result<AuthTokens, AuthError> {
        let now = Utc::now();
        let access_expiry = now + Duration::minutes(self.jwt_settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: access_expiry.timestamp(),
            iat: now.timestamp(),
            iss: self.jwt_settings.issuer.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let access_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        // Opaque, carries no user data
        let refresh_token = format!("{}.{}", uuid::Uuid::new_v4(), uuid::Uuid::new_v4());

        Ok(AuthTokens {
            access_token,
            refresh_token,
            expires_in: self.jwt_settings.access_token_expiry_minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    fn refresh_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::days(self.jwt_settings.refresh_token_expiry_days)
    }

    /// Issue a token pair and persist the session behind its refresh token
    async fn open_session(&self, user_id: i64) -> Result<AuthTokens, AuthError> {
        let tokens = self.generate_tokens(user_id)?;
        let session = Session::new(
            user_id,
            hash_refresh_token(&tokens.refresh_token),
            self.refresh_expiry(),
        );

        self.session_repo
            .create(&session)
            .await
            .map_err(internal)?;

        Ok(tokens)
    }

    /// Decode and validate access token
    fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &self.validation(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl<U, S> AuthService for AuthServiceImpl<U, S>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthTokens), AuthError> {
        let email = normalize_email(email);

        if self.user_repo.email_exists(&email).await.map_err(internal)? {
            metrics::record_auth_event("register", false);
            return Err(AuthError::EmailExists);
        }

        let password_hash = hash_password_blocking(password).await?;

        let new_user = NewUser {
            name: name.trim().to_string(),
            email,
            password_hash,
        };

        // The unique index still catches a concurrent registration
        let user = self.user_repo.create(&new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => AuthError::EmailExists,
            e => internal(e),
        })?;

        let tokens = self.open_session(user.id).await?;

        metrics::record_auth_event("register", true);
        info!(user_id = user.id, "User registered");

        Ok((user, tokens))
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, AuthTokens), AuthError> {
        let email = normalize_email(email);

        let Some(user) = self.user_repo.find_by_email(&email).await.map_err(internal)? else {
            let _ = verify_password_blocking(password, DUMMY_PASSWORD_HASH).await;
            metrics::record_auth_event("login", false);
            warn!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password_blocking(password, &user.password_hash).await? {
            metrics::record_auth_event("login", false);
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.open_session(user.id).await?;

        metrics::record_auth_event("login", true);
        info!(user_id = user.id, "User logged in");

        Ok((user, tokens))
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let token_hash = hash_refresh_token(refresh_token);

        let session = self
            .session_repo
            .find_by_token_hash(&token_hash)
            .await
            .map_err(internal)?
            .ok_or(AuthError::SessionNotFound)?;

        if !session.is_active() {
            metrics::record_auth_event("refresh", false);
            return Err(AuthError::TokenExpired);
        }

        let new_tokens = self.generate_tokens(session.user_id)?;
        let new_token_hash = hash_refresh_token(&new_tokens.refresh_token);

        let rotated = self
            .session_repo
            .rotate(
                session.id,
                &token_hash,
                &new_token_hash,
                self.refresh_expiry(),
            )
            .await
            .map_err(internal)?;

        if !rotated {
            // Another request redeemed this token first
            metrics::record_auth_event("refresh", false);
            warn!(user_id = session.user_id, "Refresh token already redeemed");
            return Err(AuthError::SessionNotFound);
        }

        metrics::record_auth_event("refresh", true);

        Ok(new_tokens)
    }

    async fn revoke_token(&self, refresh_token: &str) -> Result<(), AuthError> {
        let token_hash = hash_refresh_token(refresh_token);

        let session = self
            .session_repo
            .find_by_token_hash(&token_hash)
            .await
            .map_err(internal)?
            .ok_or(AuthError::SessionNotFound)?;

        self.session_repo
            .revoke(session.id)
            .await
            .map_err(internal)?;

        metrics::record_auth_event("logout", true);
        info!(user_id = session.user_id, "Session revoked");

        Ok(())
    }

    async fn revoke_all_sessions(&self, user_id: i64) -> Result<u64, AuthError> {
        let revoked = self
            .session_repo
            .revoke_all_for_user(user_id)
            .await
            .map_err(internal)?;

        metrics::record_auth_event("logout_all", true);
        info!(user_id, revoked, "All sessions revoked");

        Ok(revoked)
    }

    fn validate_token(&self, access_token: &str) -> Result<i64, AuthError> {
        let claims = self.decode_access_token(access_token)?;

        claims
            .sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(AuthError::InvalidToken)
    }

    async fn get_current_user(&self, user_id: i64) -> Result<User, AuthError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(internal)?
            .ok_or(AuthError::UserNotFound)
    }
}
