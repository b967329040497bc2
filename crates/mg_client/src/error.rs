use mg_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid recipient id: expected {expected} characters, got {got}")]
    InvalidRecipient { expected: usize, got: usize },

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Message type {0:#04x} is not supported by this sender")]
    UnsupportedMessageType(u8),

    #[error("Message too large: {len} bytes exceeds the {max}-byte limit")]
    MessageTooLarge { len: usize, max: usize },

    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Gateway rejected the request with status {0}")]
    RejectedStatus(u16),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
