use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Secure random source unavailable or exhausted")]
    Entropy,

    #[error("Box encryption failed")]
    Seal,

    #[error("Box decryption failed (authentication tag mismatch)")]
    Open,

    #[error("Keyed hash failed: {0}")]
    Mac(String),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),
}
