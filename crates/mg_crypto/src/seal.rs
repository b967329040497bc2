//! NaCl box sealing — X25519 key agreement + XSalsa20-Poly1305.
//!
//! Ciphertext and nonce travel separately (the gateway hex-encodes both
//! into form fields). A fresh 24-byte nonce is drawn for every seal; the
//! construction is broken by nonce reuse.

use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::Aead;
use crypto_box::SalsaBox;

use crate::error::CryptoError;
use crate::keys::{PublicKey, SecretKey};
use crate::rng::SecureRandom;

/// XSalsa20 nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Poly1305 authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` for `recipient`, authenticated by `sender`.
///
/// Returns the ciphertext (plaintext length + 16-byte tag) and the nonce
/// that was used.
pub fn seal(
    plaintext: &[u8],
    recipient: &PublicKey,
    sender: &SecretKey,
    rng: &dyn SecureRandom,
) -> Result<(Vec<u8>, [u8; NONCE_LEN]), CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill(&mut nonce)?;

    let their_public = crypto_box::PublicKey::from(*recipient.as_bytes());
    let our_secret = crypto_box::SecretKey::from(*sender.bytes());
    let cipher = SalsaBox::new(&their_public, &our_secret);

    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::Seal)?;

    Ok((ciphertext, nonce))
}

/// Decrypt a box from `sender` addressed to `recipient`.
pub fn open(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LEN],
    sender: &PublicKey,
    recipient: &SecretKey,
) -> Result<Vec<u8>, CryptoError> {
    let their_public = crypto_box::PublicKey::from(*sender.as_bytes());
    let our_secret = crypto_box::SecretKey::from(*recipient.bytes());
    let cipher = SalsaBox::new(&their_public, &our_secret);

    cipher
        .decrypt(GenericArray::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Open)
}
