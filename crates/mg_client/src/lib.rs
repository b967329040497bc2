//! mg_client — MsgGate push-messaging gateway client
//!
//! Builds outbound message payloads, optionally end-to-end encrypts them
//! with the NaCl box construction, and submits them to the gateway over
//! HTTP. Recipient identities and public keys are resolved through the
//! same API; successful key lookups are memoized for the lifetime of a
//! client.
//!
//! # Module layout
//! - `message`   — message variants and their wire payloads
//! - `codec`     — randomized frame padding
//! - `sender`    — plain vs end-to-end sending strategies
//! - `client`    — the `GatewayClient` façade and key cache
//! - `lookup`    — phone/email normalization and lookup hashing
//! - `transport` — blocking HTTP seam
//! - `error`     — unified error type
//!
//! ```no_run
//! use mg_client::message::{Message, TextMessage};
//! use mg_client::{Credentials, GatewayClient};
//!
//! let client = GatewayClient::without_encryption(Credentials::new("*MYGATE1", "secret"))?;
//! let token = client.send("ABCDEFGH", &Message::Text(TextMessage::new("hello")), None)?;
//! # let _ = token;
//! # Ok::<(), mg_client::GatewayError>(())
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod lookup;
pub mod message;
pub mod sender;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{Credentials, GatewayClient};
pub use error::GatewayError;
pub use sender::EncryptionSettings;

/// Default gateway API endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "https://msgapi.msggate.io";

/// Length of a gateway id (sender or recipient), in characters.
pub const GATEWAY_ID_LEN: usize = 8;

/// Maximum plain-text message length in bytes.
pub const MAX_TEXT_LEN: usize = 3500;

/// Maximum encrypted (box) payload length in bytes.
pub const MAX_SEALED_LEN: usize = 7812;
