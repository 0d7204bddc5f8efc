//! JWT claims and the request extractor for authenticated callers.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

use crate::models::config::ServerConfig;
use crate::services::ServiceError;

/// Purpose a token was issued for. Every endpoint checks the scope so that,
/// for example, an email-confirmation token cannot be replayed as a login.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    Access,
    Refresh,
    Confirm,
    Reset,
}

/// Claims carried by every issued JWT. The `jti` nonce keeps tokens minted
/// within the same second distinct, so refresh rotation always invalidates
/// the previous token.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account email.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    pub scope: TokenScope,
}

/// Identity established from a valid access token.
///
/// The extractor only proves the token was signed by us and has not expired;
/// handlers that need the account row resolve it through the user cache.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub email: String,
}

/// Extracts the bearer token from the `Authorization` header, if present.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Decodes and verifies a JWT without inspecting its scope.
pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(Into::into))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let config = req
        .app_data::<actix_web::web::Data<ServerConfig>>()
        .ok_or_else(|| ServiceError::Internal("Server configuration missing".to_string()))?;

    let token = bearer_token(req)
        .ok_or_else(|| ServiceError::Unauthorized("Not authenticated".to_string()))?;

    let claims = decode_claims(token, &config.secret)
        .map_err(|_| ServiceError::Unauthorized("Could not validate credentials".to_string()))?;

    if claims.scope != TokenScope::Access {
        return Err(ServiceError::Unauthorized(
            "Could not validate credentials".to_string(),
        ));
    }

    Ok(AuthenticatedUser { email: claims.sub })
}
