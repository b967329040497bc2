//! Sender strategies — plain text vs end-to-end encrypted submission.
//!
//! Both strategies share one contract: take a recipient, a recipient
//! public key and a message, and return the gateway's submission token.
//! The plain strategy ignores the key and only carries text; the
//! end-to-end strategy pads and seals every variant.

use std::sync::Arc;

use mg_crypto::seal::seal;
use mg_crypto::{PublicKey, SecretKey, SecureRandom};
use tracing::debug;

use crate::client::Credentials;
use crate::codec;
use crate::error::GatewayError;
use crate::message::Message;
use crate::transport::Transport;
use crate::{MAX_SEALED_LEN, MAX_TEXT_LEN};

/// A strategy for submitting one message to one recipient.
pub trait MessageSender: Send + Sync {
    /// Whether this sender can deliver to recipients resolved from a
    /// phone number or email address.
    fn supports_phone_or_email(&self) -> bool;

    /// Submit `message` to `recipient`. Returns the submission token.
    fn send(
        &self,
        recipient: &str,
        public_key: &PublicKey,
        message: &Message,
    ) -> Result<String, GatewayError>;
}

/// Key material for the end-to-end sender: our long-term secret key and
/// its public half (the half recipients fetch from the gateway).
#[derive(Clone)]
pub struct EncryptionSettings {
    pub private_key: SecretKey,
    pub public_key: PublicKey,
}

// ── Plain strategy ────────────────────────────────────────────────────────────

/// Sends unencrypted text through the `send_simple` endpoint.
pub struct PlainSender {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
}

impl PlainSender {
    pub fn new(transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        Self { transport, credentials }
    }
}

impl MessageSender for PlainSender {
    fn supports_phone_or_email(&self) -> bool {
        true
    }

    fn send(
        &self,
        recipient: &str,
        _public_key: &PublicKey,
        message: &Message,
    ) -> Result<String, GatewayError> {
        let Message::Text(text) = message else {
            return Err(GatewayError::UnsupportedMessageType(message.message_type()));
        };
        if text.text.len() > MAX_TEXT_LEN {
            return Err(GatewayError::MessageTooLarge {
                len: text.text.len(),
                max: MAX_TEXT_LEN,
            });
        }

        let response = self.transport.post_form(
            "send_simple",
            &[
                ("from", self.credentials.gateway_id.as_str()),
                ("to", recipient),
                ("text", text.text.as_str()),
                ("secret", self.credentials.api_secret.as_str()),
            ],
        )?;
        Ok(response.body)
    }
}

// ── End-to-end strategy ───────────────────────────────────────────────────────

/// Pads and seals every message variant, then submits it through the
/// `send_e2e` endpoint.
pub struct EndToEndSender {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    encryption: EncryptionSettings,
    rng: Arc<dyn SecureRandom>,
}

impl EndToEndSender {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        encryption: EncryptionSettings,
        rng: Arc<dyn SecureRandom>,
    ) -> Self {
        Self { transport, credentials, encryption, rng }
    }
}

impl MessageSender for EndToEndSender {
    fn supports_phone_or_email(&self) -> bool {
        false
    }

    fn send(
        &self,
        recipient: &str,
        public_key: &PublicKey,
        message: &Message,
    ) -> Result<String, GatewayError> {
        let frame = codec::pad(message, self.rng.as_ref())?;
        let (ciphertext, nonce) = seal(
            &frame,
            public_key,
            &self.encryption.private_key,
            self.rng.as_ref(),
        )?;

        if ciphertext.len() > MAX_SEALED_LEN {
            return Err(GatewayError::MessageTooLarge {
                len: ciphertext.len(),
                max: MAX_SEALED_LEN,
            });
        }

        // Wire flags are negated: "0" requests the feature, "1" suppresses
        // it. Only `group` is a plain positive flag.
        let no_delivery_receipts = if message.wants_delivery_receipt() { "0" } else { "1" };
        let no_push = if message.wants_push() { "0" } else { "1" };
        let group = if message.is_group() { "1" } else { "0" };

        debug!(
            frame_len = frame.len(),
            sealed_len = ciphertext.len(),
            "submitting end-to-end message"
        );

        let nonce_hex = hex::encode(nonce);
        let box_hex = hex::encode(&ciphertext);
        let response = self.transport.post_form(
            "send_e2e",
            &[
                ("from", self.credentials.gateway_id.as_str()),
                ("to", recipient),
                ("nonce", nonce_hex.as_str()),
                ("box", box_hex.as_str()),
                ("secret", self.credentials.api_secret.as_str()),
                ("noDeliveryReceipts", no_delivery_receipts),
                ("noPush", no_push),
                ("group", group),
            ],
        )?;

        if !response.is_success() {
            return Err(GatewayError::RejectedStatus(response.status));
        }
        Ok(response.body)
    }
}
