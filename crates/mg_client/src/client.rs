//! Top-level gateway client: credential handling, key-resolution cache,
//! identifier lookups, and the send façade.

use std::collections::HashMap;
use std::sync::Arc;

use mg_crypto::{hash, OsRandom, PublicKey};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::GatewayError;
use crate::lookup;
use crate::message::Message;
use crate::sender::{EncryptionSettings, EndToEndSender, MessageSender, PlainSender};
use crate::transport::{HttpTransport, Transport};
use crate::{DEFAULT_GATEWAY_URL, GATEWAY_ID_LEN};

/// Stable gateway credentials: the 8-character sender id plus the API
/// secret. Immutable for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub gateway_id: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(gateway_id: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            gateway_id: gateway_id.into(),
            api_secret: api_secret.into(),
        }
    }
}

/// Client façade for one credential set and one sending mode.
///
/// The key cache is owned exclusively by the client and lives as long as
/// it does; the client is `Send + Sync`, so share one instance across
/// threads instead of creating several.
pub struct GatewayClient {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
    sender: Box<dyn MessageSender>,
    key_cache: Mutex<HashMap<String, PublicKey>>,
}

impl GatewayClient {
    /// Plain-text client against the default gateway endpoint.
    pub fn without_encryption(credentials: Credentials) -> Result<Self, GatewayError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(DEFAULT_GATEWAY_URL)?);
        Ok(Self::without_encryption_on(transport, credentials))
    }

    /// End-to-end encrypting client against the default gateway endpoint.
    pub fn with_encryption(
        credentials: Credentials,
        encryption: EncryptionSettings,
    ) -> Result<Self, GatewayError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(DEFAULT_GATEWAY_URL)?);
        Ok(Self::with_encryption_on(transport, credentials, encryption))
    }

    /// Plain-text client on an explicit transport (custom endpoint, tests).
    pub fn without_encryption_on(transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        let sender = Box::new(PlainSender::new(Arc::clone(&transport), credentials.clone()));
        Self::assemble(transport, credentials, sender)
    }

    /// End-to-end encrypting client on an explicit transport.
    pub fn with_encryption_on(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        encryption: EncryptionSettings,
    ) -> Self {
        let sender = Box::new(EndToEndSender::new(
            Arc::clone(&transport),
            credentials.clone(),
            encryption,
            Arc::new(OsRandom),
        ));
        Self::assemble(transport, credentials, sender)
    }

    fn assemble(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        sender: Box<dyn MessageSender>,
    ) -> Self {
        Self {
            credentials,
            transport,
            sender,
            key_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the active sending mode can deliver to recipients resolved
    /// from a phone number or email address.
    pub fn supports_phone_or_email(&self) -> bool {
        self.sender.supports_phone_or_email()
    }

    // ── Messaging ─────────────────────────────────────────────────────────────

    /// Send `message` to `recipient`, resolving the recipient's public key
    /// through the cache when none is supplied. One attempt, no retries.
    pub fn send(
        &self,
        recipient: &str,
        message: &Message,
        public_key: Option<&PublicKey>,
    ) -> Result<String, GatewayError> {
        if recipient.len() != GATEWAY_ID_LEN {
            return Err(GatewayError::InvalidRecipient {
                expected: GATEWAY_ID_LEN,
                got: recipient.len(),
            });
        }

        let key = match public_key {
            Some(key) => key.clone(),
            None => self.lookup_key(recipient)?,
        };
        self.sender.send(recipient, &key, message)
    }

    // ── Key lookup ────────────────────────────────────────────────────────────

    /// Resolve a recipient's public key, memoizing successful lookups for
    /// the lifetime of this client. Concurrent misses for the same id may
    /// both reach the network; both then store the same key.
    pub fn lookup_key(&self, id: &str) -> Result<PublicKey, GatewayError> {
        if let Some(key) = self.key_cache.lock().get(id) {
            debug!(id, "public key cache hit");
            return Ok(key.clone());
        }

        debug!(id, "public key cache miss, querying gateway");
        let response = self
            .transport
            .get(&format!("pubkeys/{id}"), &self.auth_query())?;
        let key = PublicKey::from_hex(response.body.trim())
            .map_err(|e| GatewayError::MalformedResponse(format!("public key for {id}: {e}")))?;

        self.key_cache.lock().insert(id.to_string(), key.clone());
        Ok(key)
    }

    // ── Identifier lookup ─────────────────────────────────────────────────────

    /// Resolve the gateway id registered for a phone number. The number is
    /// normalized and validated locally; the gateway only ever sees its
    /// keyed hash. Results are not cached.
    pub fn lookup_id_by_phone(&self, phone_number: &str) -> Result<String, GatewayError> {
        let normalized = lookup::normalize_phone_number(phone_number);
        lookup::validate_phone_number(&normalized)?;

        let hash = hash::lookup_hash(lookup::PHONE_HMAC_KEY, normalized.as_bytes())?;
        let response = self
            .transport
            .get(&format!("lookup/phone_hash/{hash}"), &self.auth_query())?;
        Ok(response.body)
    }

    /// Resolve the gateway id registered for an email address. Same hashed
    /// scheme as the phone lookup.
    pub fn lookup_id_by_email(&self, email: &str) -> Result<String, GatewayError> {
        let normalized = lookup::normalize_email(email);
        lookup::validate_email(&normalized)?;

        let hash = hash::lookup_hash(lookup::EMAIL_HMAC_KEY, normalized.as_bytes())?;
        let response = self
            .transport
            .get(&format!("lookup/email_hash/{hash}"), &self.auth_query())?;
        Ok(response.body)
    }

    // ── Account ───────────────────────────────────────────────────────────────

    /// Remaining account credits.
    pub fn credits(&self) -> Result<i64, GatewayError> {
        let response = self.transport.get("credits", &self.auth_query())?;
        response.body.trim().parse().map_err(|_| {
            GatewayError::MalformedResponse(format!("credits balance: {:?}", response.body))
        })
    }

    /// Whether the gateway accepts the configured credentials.
    pub fn validate_credentials(&self) -> Result<bool, GatewayError> {
        Ok(self.credits()? >= 0)
    }

    fn auth_query(&self) -> [(&str, &str); 2] {
        [
            ("from", self.credentials.gateway_id.as_str()),
            ("secret", self.credentials.api_secret.as_str()),
        ]
    }
}
