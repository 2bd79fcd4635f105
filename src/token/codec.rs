//! Three-segment compact serialization: `header.claims.signature`, each
//! segment base64url without padding.
//!
//! Nothing here decides whether a token is trustworthy; `decode` only undoes
//! the syntax and hands back the signing input so the caller can check it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{AuthError, IssueError};
use super::signer::Signer;

pub const SEGMENT_DELIMITER: char = '.';
pub const ALGORITHM: &str = "HS256";
pub const TOKEN_TYPE: &str = "TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// A token split back into its parts. The claims are untrusted until the
/// signature over `signing_input` has been checked.
#[derive(Debug)]
pub struct DecodedToken<'a> {
    pub header: Header,
    pub claims: Map<String, Value>,
    pub signing_input: &'a str,
    pub signature: Vec<u8>,
}

pub fn encode<C: Serialize>(
    header: &Header,
    claims: &C,
    signer: &Signer,
) -> Result<String, IssueError> {
    let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header)?);
    let claims_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);

    let mut token = format!("{header_b64}{SEGMENT_DELIMITER}{claims_b64}");
    let signature = signer.sign(token.as_bytes());
    token.push(SEGMENT_DELIMITER);
    token.push_str(&URL_SAFE_NO_PAD.encode(signature));
    Ok(token)
}

pub fn decode(token: &str) -> Result<DecodedToken<'_>, AuthError> {
    let segments: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();
    let [header_b64, claims_b64, signature_b64] = segments[..] else {
        return Err(AuthError::MalformedToken(
            "expected three dot-separated segments",
        ));
    };

    let header_bytes = decode_segment(header_b64)?;
    let claims_bytes = decode_segment(claims_b64)?;
    let signature = decode_segment(signature_b64)?;

    let header: Header = serde_json::from_slice(&header_bytes)
        .map_err(|_| AuthError::MalformedToken("header is not a JSON object"))?;
    let claims: Map<String, Value> = serde_json::from_slice(&claims_bytes)
        .map_err(|_| AuthError::MalformedToken("claims are not a JSON object"))?;

    let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];

    Ok(DecodedToken {
        header,
        claims,
        signing_input,
        signature,
    })
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, AuthError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::MalformedToken("segment is not valid base64url"))
}
