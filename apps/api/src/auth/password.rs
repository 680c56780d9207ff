//! Password hashing and verification (bcrypt).
//!
//! Plaintext passwords only pass through this module; they are never stored
//! or logged. The cost factor is fixed when the hasher is built.

use thiserror::Error;

/// bcrypt ignores everything past this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password and hash do not match")]
    Mismatch,

    #[error("password is {0} bytes, bcrypt accepts at most 72")]
    TooLong(usize),

    #[error("bcrypt cost {0} is outside 4..=31")]
    InvalidCost(u32),

    #[error("bcrypt error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        Ok(PasswordHasher { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes `plaintext` with a fresh random salt.
    /// Inputs past the bcrypt bound are rejected rather than truncated.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong(plaintext.len()));
        }
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Checks `plaintext` against a stored digest using the salt embedded in it.
    /// Returns `PasswordError::Mismatch` when the password is wrong.
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<(), PasswordError> {
        // Anything longer could never have produced a stored hash.
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::Mismatch);
        }
        if bcrypt::verify(plaintext, digest)? {
            Ok(())
        } else {
            Err(PasswordError::Mismatch)
        }
    }
}
