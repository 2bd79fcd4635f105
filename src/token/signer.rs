use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::secret::TokenSecret;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HMAC-SHA256 tag.
pub const SIGNATURE_LEN: usize = 32;

/// Keyed HMAC-SHA256 over token signing input.
///
/// The keyed state is computed once and cloned per call, so a `Signer` can
/// be shared across threads without locking.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

impl Signer {
    pub fn new(secret: &TokenSecret) -> Self {
        Self::with_key(secret.expose())
    }

    fn with_key(key: &[u8]) -> Self {
        let mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
        Self { mac }
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        let mut mac = self.mac.clone();
        mac.update(message);
        let tag = mac.finalize().into_bytes();

        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&tag);
        out
    }

    /// Constant-time check of `signature` against the expected tag. A length
    /// mismatch is simply `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let expected = self.sign(message);
        expected[..].ct_eq(signature).into()
    }
}
