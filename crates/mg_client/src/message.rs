//! Outbound message variants and their wire payloads.
//!
//! Every variant carries a fixed one-byte type code from the protocol
//! registry, fixed delivery flags, and a deterministic payload
//! serialization. The JSON-bodied payloads (file, polls) serialize their
//! object keys in sorted order, so repeated serialization of the same
//! message is byte-identical.

use serde_json::{Map, Value};

// One-byte message type codes from the protocol registry.
pub const TEXT_MESSAGE: u8 = 0x01;
pub const LOCATION_MESSAGE: u8 = 0x10;
pub const POLL_SETUP_MESSAGE: u8 = 0x15;
pub const POLL_VOTE_MESSAGE: u8 = 0x16;
pub const FILE_MESSAGE: u8 = 0x17;
pub const DELIVERY_RECEIPT: u8 = 0x80;

/// An outbound gateway message.
#[derive(Debug, Clone)]
pub enum Message {
    Text(TextMessage),
    File(FileMessage),
    Location(LocationMessage),
    PollSetup(PollSetupMessage),
    PollVote(PollVoteMessage),
    DeliveryReceipt(DeliveryReceiptMessage),
}

impl Message {
    /// Registry type code for this variant.
    pub fn message_type(&self) -> u8 {
        match self {
            Self::Text(_) => TEXT_MESSAGE,
            Self::File(_) => FILE_MESSAGE,
            Self::Location(_) => LOCATION_MESSAGE,
            Self::PollSetup(_) => POLL_SETUP_MESSAGE,
            Self::PollVote(_) => POLL_VOTE_MESSAGE,
            Self::DeliveryReceipt(_) => DELIVERY_RECEIPT,
        }
    }

    /// Whether the recipient should answer with a delivery receipt.
    /// Poll votes and receipts themselves are silent protocol traffic.
    pub fn wants_delivery_receipt(&self) -> bool {
        !matches!(self, Self::PollVote(_) | Self::DeliveryReceipt(_))
    }

    /// Whether the gateway should trigger a push notification.
    pub fn wants_push(&self) -> bool {
        !matches!(self, Self::PollVote(_) | Self::DeliveryReceipt(_))
    }

    /// Whether this message carries the group flag. Group conversations
    /// are not driven through this client, so no variant sets it.
    pub fn is_group(&self) -> bool {
        false
    }

    /// Raw wire payload, excluding the type byte and padding.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::Text(m) => m.payload(),
            Self::File(m) => m.payload(),
            Self::Location(m) => m.payload(),
            Self::PollSetup(m) => m.payload(),
            Self::PollVote(m) => m.payload(),
            Self::DeliveryReceipt(m) => m.payload(),
        }
    }
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// Plain UTF-8 text.
#[derive(Debug, Clone)]
pub struct TextMessage {
    pub text: String,
}

impl TextMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    fn payload(&self) -> Vec<u8> {
        self.text.as_bytes().to_vec()
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

/// Geographic coordinates with optional accuracy, place name and address.
#[derive(Debug, Clone)]
pub struct LocationMessage {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters; values <= 0 mean "not set".
    pub accuracy: f64,
    pub name: String,
    pub address: String,
}

impl LocationMessage {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: -1.0,
            name: String::new(),
            address: String::new(),
        }
    }

    /// `"<lat>,<lon>[,<accuracy>]\n[<name>]\n[<address>]"` with six decimal
    /// places and address newlines escaped as the literal `\n` sequence.
    fn payload(&self) -> Vec<u8> {
        let mut data = format!("{:.6},{:.6}", self.latitude, self.longitude);
        if self.accuracy > 0.0 {
            data.push_str(&format!(",{:.6}", self.accuracy));
        }
        if !self.name.is_empty() {
            data.push('\n');
            data.push_str(&self.name);
        }
        if !self.address.is_empty() {
            data.push('\n');
            data.push_str(&self.address.replace('\n', "\\n"));
        }
        data.into_bytes()
    }
}

// ── File ──────────────────────────────────────────────────────────────────────

/// File message referencing an already-uploaded encrypted blob.
#[derive(Debug, Clone)]
pub struct FileMessage {
    /// Blob id of the uploaded file, hex.
    pub blob_id: String,
    /// Blob id of an optional thumbnail, hex.
    pub thumbnail_blob_id: Option<String>,
    /// Symmetric key the blob was encrypted with, hex.
    pub blob_key: String,
    pub mime_type: String,
    pub file_name: Option<String>,
    pub file_size: u64,
    /// 0 = plain file, 1 = render as media.
    pub rendering: u8,
}

impl FileMessage {
    /// JSON body with the gateway's short wire keys; optional keys are
    /// omitted when unset.
    fn payload(&self) -> Vec<u8> {
        let mut obj = Map::new();
        obj.insert("b".into(), Value::from(self.blob_id.clone()));
        if let Some(thumbnail) = &self.thumbnail_blob_id {
            obj.insert("t".into(), Value::from(thumbnail.clone()));
        }
        obj.insert("k".into(), Value::from(self.blob_key.clone()));
        obj.insert("m".into(), Value::from(self.mime_type.clone()));
        if let Some(name) = &self.file_name {
            obj.insert("n".into(), Value::from(name.clone()));
        }
        obj.insert("s".into(), Value::from(self.file_size));
        obj.insert("j".into(), Value::from(self.rendering));
        Value::Object(obj).to_string().into_bytes()
    }
}

// ── Polls ─────────────────────────────────────────────────────────────────────

/// Poll creation. Payload: 8-byte poll id followed by a JSON body.
#[derive(Debug, Clone)]
pub struct PollSetupMessage {
    pub poll_id: [u8; 8],
    pub description: String,
    pub choices: Vec<String>,
}

impl PollSetupMessage {
    fn payload(&self) -> Vec<u8> {
        let mut obj = Map::new();
        obj.insert("c".into(), Value::from(self.choices.clone()));
        obj.insert("d".into(), Value::from(self.description.clone()));
        let body = Value::Object(obj).to_string();

        let mut out = Vec::with_capacity(8 + body.len());
        out.extend_from_slice(&self.poll_id);
        out.extend_from_slice(body.as_bytes());
        out
    }
}

/// Vote on a poll. Payload: the creator's 8-character gateway id, the
/// 8-byte poll id, then a JSON array of `[choice_id, selected]` pairs.
#[derive(Debug, Clone)]
pub struct PollVoteMessage {
    pub poll_creator: String,
    pub poll_id: [u8; 8],
    pub votes: Vec<(u32, bool)>,
}

impl PollVoteMessage {
    fn payload(&self) -> Vec<u8> {
        let votes: Vec<Value> = self
            .votes
            .iter()
            .map(|(choice, selected)| {
                Value::from(vec![Value::from(*choice), Value::from(u8::from(*selected))])
            })
            .collect();
        let body = Value::from(votes).to_string();

        let mut out = Vec::with_capacity(16 + body.len());
        out.extend_from_slice(self.poll_creator.as_bytes());
        out.extend_from_slice(&self.poll_id);
        out.extend_from_slice(body.as_bytes());
        out
    }
}

// ── Delivery receipt ──────────────────────────────────────────────────────────

/// Receipt acknowledging previously received messages.
#[derive(Debug, Clone)]
pub struct DeliveryReceiptMessage {
    pub status: ReceiptStatus,
    pub message_ids: Vec<[u8; 8]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReceiptStatus {
    Received = 0x01,
    Read = 0x02,
    Acknowledged = 0x03,
    Declined = 0x04,
}

impl DeliveryReceiptMessage {
    /// One status byte followed by the 8-byte ids of the acknowledged
    /// messages.
    fn payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 8 * self.message_ids.len());
        out.push(self.status as u8);
        for id in &self.message_ids {
            out.extend_from_slice(id);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_type_codes() {
        assert_eq!(Message::Text(TextMessage::new("x")).message_type(), 0x01);
        assert_eq!(Message::Location(LocationMessage::new(0.0, 0.0)).message_type(), 0x10);
        assert_eq!(
            Message::PollSetup(PollSetupMessage {
                poll_id: [0; 8],
                description: String::new(),
                choices: vec![],
            })
            .message_type(),
            0x15
        );
        assert_eq!(
            Message::PollVote(PollVoteMessage {
                poll_creator: "ABCDEFGH".into(),
                poll_id: [0; 8],
                votes: vec![],
            })
            .message_type(),
            0x16
        );
        assert_eq!(
            Message::File(FileMessage {
                blob_id: String::new(),
                thumbnail_blob_id: None,
                blob_key: String::new(),
                mime_type: String::new(),
                file_name: None,
                file_size: 0,
                rendering: 0,
            })
            .message_type(),
            0x17
        );
        assert_eq!(
            Message::DeliveryReceipt(DeliveryReceiptMessage {
                status: ReceiptStatus::Received,
                message_ids: vec![],
            })
            .message_type(),
            0x80
        );
    }

    #[test]
    fn text_payload_is_utf8_bytes() {
        let msg = TextMessage::new("grüezi");
        assert_eq!(msg.payload(), "grüezi".as_bytes());
    }

    #[test]
    fn location_payload_full() {
        let msg = LocationMessage {
            latitude: 52.5,
            longitude: 13.4,
            accuracy: -1.0,
            name: "Berlin".into(),
            address: "Street\nCity".into(),
        };
        assert_eq!(
            msg.payload(),
            b"52.500000,13.400000\nBerlin\nStreet\\nCity"
        );
    }

    #[test]
    fn location_payload_coordinates_only() {
        let msg = LocationMessage::new(52.5, 13.4);
        assert_eq!(msg.payload(), b"52.500000,13.400000");
    }

    #[test]
    fn location_payload_with_accuracy() {
        let mut msg = LocationMessage::new(-33.8688, 151.2093);
        msg.accuracy = 12.0;
        assert_eq!(msg.payload(), b"-33.868800,151.209300,12.000000");
    }

    #[test]
    fn location_payload_is_idempotent() {
        let msg = LocationMessage {
            latitude: 1.0,
            longitude: 2.0,
            accuracy: 5.0,
            name: "Spot".into(),
            address: "Line one\nLine two".into(),
        };
        assert_eq!(msg.payload(), msg.payload());
    }

    #[test]
    fn file_payload_sorted_keys() {
        let msg = FileMessage {
            blob_id: "aa01".into(),
            thumbnail_blob_id: Some("bb02".into()),
            blob_key: "cc03".into(),
            mime_type: "image/png".into(),
            file_name: Some("cat.png".into()),
            file_size: 1234,
            rendering: 1,
        };
        assert_eq!(
            msg.payload(),
            br#"{"b":"aa01","j":1,"k":"cc03","m":"image/png","n":"cat.png","s":1234,"t":"bb02"}"#
        );
    }

    #[test]
    fn file_payload_omits_unset_fields() {
        let msg = FileMessage {
            blob_id: "aa01".into(),
            thumbnail_blob_id: None,
            blob_key: "cc03".into(),
            mime_type: "application/pdf".into(),
            file_name: None,
            file_size: 9,
            rendering: 0,
        };
        assert_eq!(
            msg.payload(),
            br#"{"b":"aa01","j":0,"k":"cc03","m":"application/pdf","s":9}"#
        );
    }

    #[test]
    fn poll_setup_payload_prefixes_poll_id() {
        let msg = PollSetupMessage {
            poll_id: *b"POLL0001",
            description: "Lunch?".into(),
            choices: vec!["Pizza".into(), "Ramen".into()],
        };
        let payload = msg.payload();
        assert_eq!(&payload[..8], b"POLL0001");
        assert_eq!(&payload[8..], br#"{"c":["Pizza","Ramen"],"d":"Lunch?"}"#);
    }

    #[test]
    fn poll_vote_payload_layout() {
        let msg = PollVoteMessage {
            poll_creator: "ABCDEFGH".into(),
            poll_id: *b"POLL0001",
            votes: vec![(0, true), (1, false)],
        };
        let payload = msg.payload();
        assert_eq!(&payload[..8], b"ABCDEFGH");
        assert_eq!(&payload[8..16], b"POLL0001");
        assert_eq!(&payload[16..], br#"[[0,1],[1,0]]"#);
    }

    #[test]
    fn delivery_receipt_payload_layout() {
        let msg = DeliveryReceiptMessage {
            status: ReceiptStatus::Read,
            message_ids: vec![[1; 8], [2; 8]],
        };
        let payload = msg.payload();
        assert_eq!(payload[0], 0x02);
        assert_eq!(&payload[1..9], &[1; 8]);
        assert_eq!(&payload[9..17], &[2; 8]);
    }

    #[test]
    fn silent_variants_suppress_receipts_and_push() {
        let receipt = Message::DeliveryReceipt(DeliveryReceiptMessage {
            status: ReceiptStatus::Received,
            message_ids: vec![],
        });
        assert!(!receipt.wants_delivery_receipt());
        assert!(!receipt.wants_push());

        let text = Message::Text(TextMessage::new("hi"));
        assert!(text.wants_delivery_receipt());
        assert!(text.wants_push());
        assert!(!text.is_group());
    }
}
