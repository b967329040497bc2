//! mg_crypto — MsgGate cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Secret key material is zeroized on drop.
//! - Randomness routes through the `SecureRandom` trait so callers and
//!   tests control the entropy source.
//!
//! # Module layout
//! - `keys`  — 32-byte Curve25519 key newtypes with hex wire encoding
//! - `seal`  — NaCl box (X25519 + XSalsa20-Poly1305) seal/open
//! - `hash`  — keyed lookup hashes (HMAC-SHA-256, hex output)
//! - `rng`   — secure-random abstraction
//! - `error` — unified error type

pub mod error;
pub mod hash;
pub mod keys;
pub mod rng;
pub mod seal;

pub use error::CryptoError;
pub use keys::{PublicKey, SecretKey, KEY_LEN};
pub use rng::{OsRandom, SecureRandom};
