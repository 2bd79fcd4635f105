use std::collections::HashSet;

use thiserror::Error;

/// Minimum acceptable size for the token secret in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;
/// Minimum number of unique bytes expected for the secret to avoid trivially guessable values.
const MIN_UNIQUE_SECRET_BYTES: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("TOKEN_SECRET must be set")]
    Missing,
    #[error("TOKEN_SECRET must be at least {required} bytes, but {actual} bytes were provided")]
    TooShort { actual: usize, required: usize },
    #[error(
        "TOKEN_SECRET must contain sufficient entropy (at least {required} unique bytes); only {actual} unique bytes found"
    )]
    LowEntropy { actual: usize, required: usize },
}

/// Process-wide signing key. Never printed.
#[derive(Clone)]
pub struct TokenSecret(Vec<u8>);

impl std::fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSecret").finish_non_exhaustive()
    }
}

impl TokenSecret {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SecretError> {
        let bytes = secret.as_ref();
        validate_secret(bytes)?;
        Ok(Self(bytes.to_vec()))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

fn validate_secret(secret: &[u8]) -> Result<(), SecretError> {
    if secret.is_empty() {
        return Err(SecretError::Missing);
    }

    if secret.len() < MIN_SECRET_LENGTH {
        return Err(SecretError::TooShort {
            actual: secret.len(),
            required: MIN_SECRET_LENGTH,
        });
    }

    let unique = secret.iter().copied().collect::<HashSet<_>>().len();
    if unique < MIN_UNIQUE_SECRET_BYTES {
        return Err(SecretError::LowEntropy {
            actual: unique,
            required: MIN_UNIQUE_SECRET_BYTES,
        });
    }

    Ok(())
}
