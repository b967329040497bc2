//! Secure-random abstraction.
//!
//! Padding lengths and box nonces must come from a CSPRNG. Routing both
//! through this trait keeps the entropy source substitutable in tests.

use rand::rngs::OsRng;
use rand_core::RngCore;

use crate::error::CryptoError;

pub trait SecureRandom: Send + Sync {
    /// Fill `buf` entirely with cryptographically secure random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError>;
}

/// Operating-system CSPRNG. Safe for concurrent use from any thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        OsRng.try_fill_bytes(buf).map_err(|_| CryptoError::Entropy)
    }
}
