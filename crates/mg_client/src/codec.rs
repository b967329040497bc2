//! Frame padding codec.
//!
//! Outbound wire frame: `[type_byte][payload][N x byte N]` with N drawn
//! uniformly from [1, 254]. Frames are never shorter than 32 bytes; short
//! payloads get their padding run extended up to that floor. The last byte
//! always equals the padding count, so the receiver can strip it without
//! further framing.

use mg_crypto::{CryptoError, SecureRandom};

use crate::error::GatewayError;
use crate::message::Message;

/// Minimum length of a padded frame in bytes.
pub const MIN_FRAME_LEN: usize = 32;

/// Largest padding count a single trailing byte can encode here.
const MAX_PADDING: u8 = 254;

/// Pad `message` into its wire frame.
pub fn pad(message: &Message, rng: &dyn SecureRandom) -> Result<Vec<u8>, GatewayError> {
    let payload = message.payload();
    let mut padding = usize::from(draw_padding_count(rng)?);
    if 1 + payload.len() + padding < MIN_FRAME_LEN {
        padding += MIN_FRAME_LEN - (1 + payload.len() + padding);
    }

    let mut frame = Vec::with_capacity(1 + payload.len() + padding);
    frame.push(message.message_type());
    frame.extend_from_slice(&payload);
    frame.resize(frame.len() + padding, padding as u8);
    Ok(frame)
}

/// Strip the padding run from a received frame. Returns the type byte and
/// the payload.
pub fn unpad(frame: &[u8]) -> Result<(u8, &[u8]), GatewayError> {
    let Some(&padding) = frame.last() else {
        return Err(GatewayError::InvalidFrame("empty frame".into()));
    };
    if padding == 0 || frame.len() < usize::from(padding) + 1 {
        return Err(GatewayError::InvalidFrame(format!(
            "padding count {padding} does not fit frame of {} bytes",
            frame.len()
        )));
    }
    let body = &frame[..frame.len() - usize::from(padding)];
    Ok((body[0], &body[1..]))
}

// Uniform in [1, 254]: single-byte draws, rejecting out-of-range values.
fn draw_padding_count(rng: &dyn SecureRandom) -> Result<u8, CryptoError> {
    let mut byte = [0u8; 1];
    loop {
        rng.fill(&mut byte)?;
        if (1..=MAX_PADDING).contains(&byte[0]) {
            return Ok(byte[0]);
        }
    }
}
