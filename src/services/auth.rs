//! Account registration, credential verification and token management.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::RngCore;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::{NewUser, Role, User};
use crate::forms::auth::{LoginForm, RegisterForm, ResetPasswordForm};
use crate::models::auth::{Claims, TokenScope, decode_claims};
use crate::repository::{UserReader, UserWriter};
use crate::services::cache::UserCache;
use crate::services::{ServiceError, ServiceResult};
use validator::Validate;

pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 3600;
pub const CONFIRM_TOKEN_TTL_SECS: i64 = 24 * 3600;
pub const RESET_TOKEN_TTL_SECS: i64 = 3600;

/// Access/refresh token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Outcome of an email confirmation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailConfirmation {
    Confirmed,
    AlreadyConfirmed,
}

fn argon2_config() -> argon2::Config<'static> {
    argon2::Config {
        variant: argon2::Variant::Argon2id,
        ..argon2::Config::default()
    }
}

/// Hashes a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);

    argon2::hash_encoded(password.as_bytes(), &salt, &argon2_config())
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {e}")))
}

/// Verifies a password against a stored encoded hash.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    argon2::verify_encoded(password_hash, password.as_bytes()).unwrap_or(false)
}

/// Signs a JWT for `email` with the requested scope and time-to-live.
pub fn issue_token(
    email: &str,
    scope: TokenScope,
    ttl_secs: i64,
    secret: &str,
) -> ServiceResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
        jti: Uuid::new_v4().to_string(),
        scope,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("Failed to sign token: {e}")))
}

/// Decodes a JWT and checks it carries the expected scope.
pub fn verify_token(token: &str, expected: TokenScope, secret: &str) -> ServiceResult<Claims> {
    let claims = decode_claims(token, secret).map_err(|_| {
        ServiceError::Unauthorized("Could not validate credentials".to_string())
    })?;

    if claims.scope != expected {
        return Err(ServiceError::Unauthorized(
            "Could not validate credentials".to_string(),
        ));
    }

    Ok(claims)
}

/// Issues a fresh access/refresh pair and persists the refresh token.
fn issue_token_pair<R>(repo: &R, email: &str, secret: &str) -> ServiceResult<TokenPair>
where
    R: UserWriter + ?Sized,
{
    let access_token = issue_token(email, TokenScope::Access, ACCESS_TOKEN_TTL_SECS, secret)?;
    let refresh_token = issue_token(email, TokenScope::Refresh, REFRESH_TOKEN_TTL_SECS, secret)?;

    repo.set_refresh_token(email, Some(&refresh_token))?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Registers a new account. The role is always [`Role::User`]; privileged
/// accounts are promoted out-of-band.
pub fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.validate()?;

    let email = form.email.trim().to_lowercase();
    if repo.get_user_by_email(&email)?.is_some() {
        return Err(ServiceError::Conflict("Account already exists".to_string()));
    }

    let password_hash = hash_password(&form.password)?;
    let new_user = NewUser::new(email, password_hash, form.full_name, Role::User)?;

    repo.create_user(&new_user).map_err(ServiceError::from)
}

/// Checks credentials and returns a token pair on success.
pub fn login<R>(repo: &R, form: LoginForm, secret: &str) -> ServiceResult<TokenPair>
where
    R: UserReader + UserWriter + ?Sized,
{
    let email = form.username.trim().to_lowercase();

    let user = repo
        .get_user_by_email(&email)?
        .ok_or_else(|| ServiceError::Unauthorized("Invalid email".to_string()))?;

    if !user.confirmed {
        return Err(ServiceError::Unauthorized(
            "Email not confirmed".to_string(),
        ));
    }

    if !verify_password(&form.password, &user.password_hash) {
        return Err(ServiceError::Unauthorized("Invalid password".to_string()));
    }

    issue_token_pair(repo, &user.email, secret)
}

/// Rotates the token pair when presented with the currently stored refresh token.
pub fn refresh<R>(repo: &R, token: &str, secret: &str) -> ServiceResult<TokenPair>
where
    R: UserReader + UserWriter + ?Sized,
{
    let claims = verify_token(token, TokenScope::Refresh, secret)?;

    let user = repo
        .get_user_by_email(&claims.sub)?
        .ok_or_else(|| ServiceError::Unauthorized("Could not validate credentials".to_string()))?;

    if user.refresh_token.as_deref() != Some(token) {
        return Err(ServiceError::Unauthorized(
            "Invalid refresh token".to_string(),
        ));
    }

    issue_token_pair(repo, &user.email, secret)
}

/// Marks the account referenced by a confirmation token as confirmed.
pub fn confirm_email<R>(repo: &R, token: &str, secret: &str) -> ServiceResult<EmailConfirmation>
where
    R: UserReader + UserWriter + ?Sized,
{
    let claims = verify_token(token, TokenScope::Confirm, secret)
        .map_err(|_| ServiceError::BadRequest("Verification error".to_string()))?;

    let user = repo
        .get_user_by_email(&claims.sub)?
        .ok_or_else(|| ServiceError::BadRequest("Verification error".to_string()))?;

    if user.confirmed {
        return Ok(EmailConfirmation::AlreadyConfirmed);
    }

    repo.confirm_user_email(&user.email)?;
    Ok(EmailConfirmation::Confirmed)
}

/// Replaces the password referenced by a reset token and revokes sessions.
pub fn reset_password<R>(
    repo: &R,
    cache: &UserCache,
    form: ResetPasswordForm,
    secret: &str,
) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.validate()?;

    let claims = verify_token(&form.token, TokenScope::Reset, secret)?;

    let user = repo
        .get_user_by_email(&claims.sub)?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

    let password_hash = hash_password(&form.new_password)?;
    repo.update_password(&user.email, &password_hash)?;
    repo.set_refresh_token(&user.email, None)?;
    cache.invalidate(&user.email);

    Ok(())
}

/// Resolves the account behind an access token subject, via the cache.
pub fn current_user<R>(repo: &R, cache: &UserCache, email: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    if let Some(user) = cache.get(email) {
        return Ok(user);
    }

    let user = repo
        .get_user_by_email(email)?
        .ok_or_else(|| ServiceError::Unauthorized("Could not validate credentials".to_string()))?;

    cache.insert(user.clone());
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use std::time::Duration;

    const SECRET: &str = "test-secret";

    fn sample_user(email: &str, password: &str, confirmed: bool) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: 1,
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            full_name: "Jane Doe".to_string(),
            avatar: None,
            refresh_token: None,
            confirmed,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn token_scope_is_enforced() {
        let token = issue_token("jane@example.com", TokenScope::Confirm, 60, SECRET).unwrap();
        assert!(verify_token(&token, TokenScope::Confirm, SECRET).is_ok());
        assert!(verify_token(&token, TokenScope::Access, SECRET).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token("jane@example.com", TokenScope::Access, 60, SECRET).unwrap();
        assert!(verify_token(&token, TokenScope::Access, "other-secret").is_err());
    }

    #[test]
    fn login_succeeds_for_confirmed_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .with(eq("jane@example.com"))
            .returning(|_| Ok(Some(sample_user("jane@example.com", "correct horse", true))));
        repo.expect_set_refresh_token()
            .returning(|_, _| Ok(()));

        let form = LoginForm {
            username: "Jane@Example.com".to_string(),
            password: "correct horse".to_string(),
        };
        let pair = login(&repo, form, SECRET).unwrap();

        let claims = verify_token(&pair.access_token, TokenScope::Access, SECRET).unwrap();
        assert_eq!(claims.sub, "jane@example.com");
    }

    #[test]
    fn login_rejects_unconfirmed_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(sample_user("jane@example.com", "correct horse", false))));

        let form = LoginForm {
            username: "jane@example.com".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(matches!(
            login(&repo, form, SECRET),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn login_rejects_bad_password() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(sample_user("jane@example.com", "correct horse", true))));

        let form = LoginForm {
            username: "jane@example.com".to_string(),
            password: "wrong horse".to_string(),
        };
        assert!(matches!(
            login(&repo, form, SECRET),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(sample_user("jane@example.com", "pw", true))));

        let form = RegisterForm {
            email: "jane@example.com".to_string(),
            password: "long enough password".to_string(),
            full_name: "Jane Doe".to_string(),
        };
        assert!(matches!(
            register(&repo, form),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn current_user_prefers_cache() {
        let cache = UserCache::new(Duration::from_secs(60));
        cache.insert(sample_user("jane@example.com", "pw", true));

        // No expectation configured: a repository hit would panic.
        let repo = MockRepository::new();
        let user = current_user(&repo, &cache, "jane@example.com").unwrap();
        assert_eq!(user.email, "jane@example.com");
    }
}
