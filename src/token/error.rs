use thiserror::Error;

/// Reasons a presented credential is rejected.
///
/// Callers see a uniform 401 for every variant; the variant itself is kept
/// for logs and tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("malformed token: {0}")]
    MalformedToken(&'static str),
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("no bearer credential supplied")]
    MissingCredential,
}

impl AuthError {
    /// Short machine-readable label used in log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MalformedToken(_) => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::MissingCredential => "missing_credential",
        }
    }
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("failed to serialize token segment: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("expiry is past the representable time range")]
    ExpiryOverflow,
}
