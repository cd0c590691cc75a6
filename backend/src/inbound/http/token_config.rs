//! Access token secret loading and validation.
//!
//! The secret comes from a file (preferred) or an inline setting. Release
//! builds refuse short secrets; debug builds only warn.

use std::path::{Path, PathBuf};

use tracing::warn;
use zeroize::Zeroize;

use super::auth::TokenVerifier;

/// Minimum secret length accepted by release builds. HS256 keys shorter than
/// the digest size weaken the signature.
pub const JWT_SECRET_MIN_LEN: usize = 32;

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short secrets and emit warnings.
    Debug,
    /// Release builds require a secret of at least [`JWT_SECRET_MIN_LEN`].
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use habit_buddy::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// Neither a secret nor a secret file was configured.
    #[error("no JWT secret configured; set HABITS_JWT_SECRET or HABITS_JWT_SECRET_FILE")]
    MissingSecret,
    /// Reading the secret file failed.
    #[error("failed to read JWT secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret is empty after trimming.
    #[error("JWT secret is empty")]
    EmptySecret,
    /// The secret is too short for release builds.
    #[error("JWT secret too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
}

/// Sources the token secret may be loaded from.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSecretSource<'a> {
    pub secret: Option<&'a str>,
    pub secret_file: Option<&'a Path>,
}

/// Load the secret and build a [`TokenVerifier`].
///
/// A configured file wins over an inline secret. Trailing whitespace in the
/// file is ignored.
///
/// # Examples
///
/// ```rust
/// use habit_buddy::inbound::http::token_config::{
///     BuildMode, TokenSecretSource, token_verifier_from_source,
/// };
///
/// let source = TokenSecretSource {
///     secret: Some("an-inline-secret-that-is-at-least-32-bytes"),
///     secret_file: None,
/// };
/// assert!(token_verifier_from_source(source, BuildMode::Release).is_ok());
/// ```
pub fn token_verifier_from_source(
    source: TokenSecretSource<'_>,
    mode: BuildMode,
) -> Result<TokenVerifier, TokenConfigError> {
    let mut secret = match (source.secret_file, source.secret) {
        (Some(path), _) => read_secret_file(path)?,
        (None, Some(inline)) => inline.as_bytes().to_vec(),
        (None, None) => return Err(TokenConfigError::MissingSecret),
    };

    let result = check_secret(&secret, mode).map(|()| TokenVerifier::from_secret(&secret));
    secret.zeroize();
    result
}

fn read_secret_file(path: &Path) -> Result<Vec<u8>, TokenConfigError> {
    let mut bytes = std::fs::read(path).map_err(|source| TokenConfigError::SecretRead {
        path: path.to_path_buf(),
        source,
    })?;
    let trimmed_len = bytes
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(0, |last| last + 1);
    // Zero the dropped tail before truncating.
    bytes[trimmed_len..].zeroize();
    bytes.truncate(trimmed_len);
    Ok(bytes)
}

fn check_secret(secret: &[u8], mode: BuildMode) -> Result<(), TokenConfigError> {
    let length = secret.len();
    if length == 0 {
        return Err(TokenConfigError::EmptySecret);
    }
    if length >= JWT_SECRET_MIN_LEN {
        return Ok(());
    }
    match mode {
        BuildMode::Debug => {
            warn!(
                length,
                min_len = JWT_SECRET_MIN_LEN,
                "JWT secret is shorter than recommended (dev only)"
            );
            Ok(())
        }
        BuildMode::Release => Err(TokenConfigError::SecretTooShort {
            length,
            min_len: JWT_SECRET_MIN_LEN,
        }),
    }
}
