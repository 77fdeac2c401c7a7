//! Passphrase sealing for the history file.
//!
//! Layout: salt (32) || nonce (12) || AES-256-GCM ciphertext. The plaintext
//! carries a magic prefix that is checked after decryption.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;
const MAGIC: &[u8] = b"GESTDATE_V1";

// Argon2id cost: 64 MiB, 3 passes, single lane.
const KDF_MEMORY_KIB: u32 = 65536;
const KDF_ITERATIONS: u32 = 3;
const KDF_LANES: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("encryption failed")]
    Encryption,
    #[error("decryption failed: wrong passphrase or corrupted history")]
    Decryption,
    #[error("history file is truncated")]
    Truncated,
}

fn derive_key(passphrase: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>, CryptoError> {
    let params = Params::new(KDF_MEMORY_KIB, KDF_ITERATIONS, KDF_LANES, Some(KEY_LEN))
        .map_err(|_| CryptoError::KeyDerivation)?;
    let kdf = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    kdf.hash_password_into(passphrase.as_bytes(), salt, &mut key[..])
        .map_err(|_| CryptoError::KeyDerivation)?;
    Ok(key)
}

/// Encrypt `plaintext` under a key derived from `passphrase` and a fresh salt.
pub fn seal(passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut header = [0u8; HEADER_LEN];
    rand::thread_rng().fill_bytes(&mut header);
    let (salt, nonce) = header.split_at(SALT_LEN);

    let key = derive_key(passphrase, salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..]).map_err(|_| CryptoError::Encryption)?;

    let mut payload = Zeroizing::new(Vec::with_capacity(MAGIC.len() + plaintext.len()));
    payload.extend_from_slice(MAGIC);
    payload.extend_from_slice(plaintext);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(nonce), payload.as_slice())
        .map_err(|_| CryptoError::Encryption)?;

    let mut sealed = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    sealed.extend_from_slice(&header);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Reverse [`seal`]. Fails with [`CryptoError::Decryption`] on a wrong
/// passphrase.
pub fn open(passphrase: &str, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < HEADER_LEN + MAGIC.len() {
        return Err(CryptoError::Truncated);
    }

    let (header, ciphertext) = sealed.split_at(HEADER_LEN);
    let (salt, nonce) = header.split_at(SALT_LEN);

    let key = derive_key(passphrase, salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..]).map_err(|_| CryptoError::Decryption)?;

    let mut decrypted = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Decryption)?;

    if !decrypted.starts_with(MAGIC) {
        decrypted.zeroize();
        return Err(CryptoError::Decryption);
    }

    let plaintext = decrypted[MAGIC.len()..].to_vec();
    decrypted.zeroize();
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open() {
        let sealed = seal("correct horse", b"{\"records\":[]}").unwrap();
        assert_eq!(open("correct horse", &sealed).unwrap(), b"{\"records\":[]}");
    }

    #[test]
    fn wrong_passphrase_fails() {
        let sealed = seal("correct", b"history").unwrap();
        assert!(matches!(open("wrong", &sealed), Err(CryptoError::Decryption)));
    }

    #[test]
    fn salts_differ_between_seals() {
        let a = seal("pass", b"same").unwrap();
        let b = seal("pass", b"same").unwrap();
        assert_ne!(&a[..SALT_LEN], &b[..SALT_LEN]);
    }

    #[test]
    fn truncated_input_fails() {
        assert!(matches!(open("any", &[0u8; 10]), Err(CryptoError::Truncated)));
    }
}
