//! Stateless signed bearer tokens.
//!
//! A token is `base64url(header).base64url(claims).base64url(hmac)`. It is
//! created at login, carried by the client, and checked on every request
//! against the shared secret and the clock. Nothing is stored server side and
//! there is no revocation.

pub mod claims;
pub mod codec;
pub mod error;
pub mod manager;
pub mod secret;
pub mod signer;

pub use claims::{Claims, Principal};
pub use error::{AuthError, IssueError};
pub use manager::{TokenConfig, TokenManager, DEFAULT_VALIDITY_SECONDS};
pub use secret::{SecretError, TokenSecret};
pub use signer::Signer;
