//! Signed call-script callback parameters.
//!
//! The provider fetches the spoken script from a public URL carrying the
//! user id and app name. When a secret is configured, the URL also carries
//! an HMAC-SHA256 tag over both values so third parties cannot request
//! scripts for arbitrary users.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::domain::foundation::ValidationError;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies `(user_id, app_name)` pairs.
#[derive(Clone)]
pub struct CallbackSigner {
    mac: HmacSha256,
}

impl CallbackSigner {
    pub fn new(secret: &SecretString) -> Result<Self, ValidationError> {
        let key = secret.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::empty_field("callback_secret"));
        }
        let mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| ValidationError::invalid_format("callback_secret", e.to_string()))?;
        Ok(Self { mac })
    }

    /// Hex-encoded tag for a pair.
    pub fn sign(&self, user_id: &str, app_name: &str) -> String {
        hex_encode(&self.tag(user_id, app_name))
    }

    /// Checks a hex tag in constant time.
    pub fn verify(&self, user_id: &str, app_name: &str, signature: &str) -> bool {
        let Some(provided) = hex_decode(signature) else {
            return false;
        };
        let expected = self.tag(user_id, app_name);
        expected.as_slice().ct_eq(provided.as_slice()).unwrap_u8() == 1
    }

    fn tag(&self, user_id: &str, app_name: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(user_id.len().to_string().as_bytes());
        mac.update(b":");
        mac.update(user_id.as_bytes());
        mac.update(app_name.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

impl fmt::Debug for CallbackSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSigner").finish_non_exhaustive()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.trim();
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer(key: &str) -> CallbackSigner {
        CallbackSigner::new(&SecretString::new(key.to_string())).unwrap()
    }

    #[test]
    fn signature_round_trips() {
        let signer = signer("top-secret");
        let sig = signer.sign("user-1", "TikTok");
        assert_eq!(sig.len(), 64);
        assert!(signer.verify("user-1", "TikTok", &sig));
    }

    #[test]
    fn tampered_values_fail() {
        let signer = signer("top-secret");
        let sig = signer.sign("user-1", "TikTok");
        assert!(!signer.verify("user-2", "TikTok", &sig));
        assert!(!signer.verify("user-1", "Instagram", &sig));
    }

    #[test]
    fn different_key_fails() {
        let sig = signer("key-a").sign("user-1", "TikTok");
        assert!(!signer("key-b").verify("user-1", "TikTok", &sig));
    }

    #[test]
    fn malformed_signature_fails() {
        let signer = signer("top-secret");
        assert!(!signer.verify("user-1", "TikTok", ""));
        assert!(!signer.verify("user-1", "TikTok", "zz"));
        assert!(!signer.verify("user-1", "TikTok", "abc"));
    }

    #[test]
    fn boundary_between_fields_is_unambiguous() {
        let signer = signer("top-secret");
        assert_ne!(signer.sign("ab", "c"), signer.sign("a", "bc"));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(CallbackSigner::new(&SecretString::new(String::new())).is_err());
    }
}
