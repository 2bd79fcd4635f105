use chrono::{Duration, Utc};

use super::claims::{Claims, Principal};
use super::codec::{self, Header, ALGORITHM};
use super::error::{AuthError, IssueError};
use super::secret::TokenSecret;
use super::signer::Signer;

pub const DEFAULT_VALIDITY_SECONDS: i64 = 3600;

/// Fixed at startup and handed to [`TokenManager::new`].
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: TokenSecret,
    pub validity_window: Duration,
}

impl TokenConfig {
    pub fn new(secret: TokenSecret) -> Self {
        Self {
            secret,
            validity_window: Duration::seconds(DEFAULT_VALIDITY_SECONDS),
        }
    }

    pub fn with_validity_window(mut self, window: Duration) -> Self {
        self.validity_window = window;
        self
    }
}

/// Issues and verifies bearer tokens. Holds no per-token state.
#[derive(Debug, Clone)]
pub struct TokenManager {
    signer: Signer,
    validity_window: Duration,
}

impl TokenManager {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            signer: Signer::new(&config.secret),
            validity_window: config.validity_window,
        }
    }

    pub fn validity_window(&self) -> Duration {
        self.validity_window
    }

    pub fn issue(&self, principal: Principal) -> Result<String, IssueError> {
        self.issue_at(principal, Utc::now().timestamp())
    }

    /// Issue a token as if the clock read `now` (Unix seconds).
    pub fn issue_at(&self, principal: Principal, now: i64) -> Result<String, IssueError> {
        let expires_at = now
            .checked_add(self.validity_window.num_seconds())
            .ok_or(IssueError::ExpiryOverflow)?;
        let claims = Claims::stamp(principal, now, expires_at);
        codec::encode(&Header::default(), &claims, &self.signer)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify `token` against a clock reading of `now` (Unix seconds).
    ///
    /// The signature is checked before anything inside the claims is read,
    /// including `expires_at`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let decoded = codec::decode(token)?;

        if decoded.header.alg != ALGORITHM {
            return Err(AuthError::MalformedToken("unsupported algorithm"));
        }

        if !self
            .signer
            .verify(decoded.signing_input.as_bytes(), &decoded.signature)
        {
            return Err(AuthError::InvalidSignature);
        }

        let claims = Claims::from_signed(decoded.claims)
            .map_err(|_| AuthError::MalformedToken("claims are missing required fields"))?;

        if now >= claims.expires_at() {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}
