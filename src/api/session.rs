//! Signed session tokens and the extractor that resolves the acting member.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ApiError, AppState, Backend};
use crate::authz::domain::Actor;
use crate::profile::domain::Username;

/// Sessions last two days, like the login cookie they replace.
const SESSION_LIFETIME_DAYS: i64 = 2;

/// Errors raised while issuing or checking session tokens.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The request carried no bearer token.
    #[error("missing session token")]
    Missing,
    /// The token is malformed, forged, or expired.
    #[error("invalid session token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
    /// The token names an invalid user.
    #[error("invalid session subject: {0}")]
    Subject(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// An issued session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedSession {
    /// Bearer token to present on later requests.
    pub token: String,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

/// Keys for signing and verifying session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    /// Derives HMAC keys from the configured secret.
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a session for the user, valid from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Invalid`] when signing fails.
    pub fn issue(
        &self,
        username: &Username,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionError> {
        let expires_at = now + Duration::days(SESSION_LIFETIME_DAYS);
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedSession { token, expires_at })
    }

    /// Returns the user a valid token was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Invalid`] for forged or expired tokens and
    /// [`SessionError::Subject`] when the subject is not a valid username.
    pub fn verify(&self, token: &str) -> Result<Username, SessionError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Username::new(data.claims.sub).map_err(|err| SessionError::Subject(err.to_string()))
    }
}

fn bearer(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The signed-on member making the request, with resolved grants.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

#[async_trait]
impl<B: Backend> FromRequestParts<Arc<AppState<B>>> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<B>>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts).ok_or(SessionError::Missing)?;
        let username = state.sessions.verify(token)?;
        let actor = state.authorizer.actor(&username).await?;
        Ok(Self(actor))
    }
}
