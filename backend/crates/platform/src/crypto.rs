//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 32-byte signing key from an operator-supplied secret of any length
pub fn derive_key(secret: &str) -> [u8; 32] {
    sha256(secret.as_bytes())
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
    // HMAC zero-pads short keys to the block size, so this equals `new_from_slice(key)`.
    let mut block = Key::<HmacSha256>::default();
    block[..key.len()].copy_from_slice(key);

    let mut mac = <HmacSha256 as KeyInit>::new(&block);
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Verify an HMAC-SHA256 tag in constant time
pub fn verify_hmac_sha256(key: &[u8; 32], data: &[u8], tag: &[u8]) -> bool {
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(key) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(tag).is_ok()
}

/// Encode bytes as unpadded base64url (cookie-safe)
pub fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);

        let hash = sha256(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_hmac_sha256_is_keyed() {
        let key = [0x0bu8; 32];
        let mac1 = hmac_sha256(&key, b"Hi There");
        let mac2 = hmac_sha256(&key, b"Hi There");
        assert_eq!(mac1, mac2);
        assert_ne!(mac1, hmac_sha256(&[0x0cu8; 32], b"Hi There"));
        assert_ne!(mac1, hmac_sha256(&key, b"Hi there"));
    }

    #[test]
    fn test_hmac_sha256_matches_slice_keyed_mac() {
        let key = [7u8; 32];
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&key).unwrap();
        mac.update(b"session-id");
        let expected: [u8; 32] = mac.finalize().into_bytes().into();
        assert_eq!(hmac_sha256(&key, b"session-id"), expected);
    }

    #[test]
    fn test_hmac_sha256_rfc4231_case_2() {
        // Key "Jefe" zero-padded to 32 bytes gives the same MAC as the bare key.
        let mut key = [0u8; 32];
        key[..4].copy_from_slice(b"Jefe");
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        assert_eq!(
            hmac_sha256(&key, b"what do ya want for nothing?").to_vec(),
            expected
        );
    }

    #[test]
    fn test_verify_hmac_sha256() {
        let key = [42u8; 32];
        let tag = hmac_sha256(&key, b"session-id");
        assert!(verify_hmac_sha256(&key, b"session-id", &tag));
        assert!(!verify_hmac_sha256(&key, b"session-id2", &tag));
        assert!(!verify_hmac_sha256(&key, b"session-id", &tag[..31]));
        assert!(!verify_hmac_sha256(&[43u8; 32], b"session-id", &tag));
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert_ne!(bytes, random_bytes(32));
    }

    #[test]
    fn test_base64url_roundtrip_is_cookie_safe() {
        let data = [0xfbu8, 0xff, 0xfe, 0x00, 0x3e];
        let encoded = to_base64url(&data);
        assert!(!encoded.contains('+') && !encoded.contains('/') && !encoded.contains('='));
        assert_eq!(from_base64url(&encoded).unwrap(), data);
    }

    #[test]
    fn test_derive_key_is_stable() {
        assert_eq!(derive_key("keyboard cat"), derive_key("keyboard cat"));
        assert_ne!(derive_key("keyboard cat"), derive_key("keyboard dog"));
    }
}
