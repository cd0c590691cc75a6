//! Bearer token authentication for HTTP handlers.
//!
//! Tokens are HS256 JWTs issued elsewhere. The `sub` claim carries the user
//! UUID and `exp` is always validated. Handlers receive the verified identity
//! through the [`AuthenticatedUser`] extractor.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Error, UserId};

const BEARER_PREFIX: &str = "bearer ";

/// Claims read from an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Verifies access tokens against the shared HS256 secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier for the given shared secret.
    ///
    /// # Examples
    /// ```
    /// use habit_buddy::inbound::http::auth::TokenVerifier;
    ///
    /// let verifier = TokenVerifier::from_secret(b"an-example-secret-of-reasonable-length");
    /// assert!(verifier.verify("not-a-token").is_err());
    /// ```
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Validate `token` and return the user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns an `unauthorized` error when the signature, expiry or subject
    /// is invalid.
    pub fn verify(&self, token: &str) -> Result<UserId, Error> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|err| {
            debug!(error = %err, "access token rejected");
            Error::unauthorized("invalid or expired token")
        })?;

        UserId::new(&data.claims.sub).map_err(|err| {
            debug!(error = %err, "access token subject is not a user id");
            Error::unauthorized("invalid or expired token")
        })
    }
}

/// The verified caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;

    let scheme = value
        .get(..BEARER_PREFIX.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;

    let token = value[scheme.len()..].trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| Error::internal("token verifier is not configured"))?;
    let token = bearer_token(req)?;
    verifier.verify(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
