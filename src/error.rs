// Error types shared by every RSA block operation

use thiserror::Error;

/// Errors raised by key generation, block handling and the chaining modes.
///
/// Every error is returned to the immediate caller; nothing in the crate
/// retries or swallows them.
#[derive(Debug, Error)]
pub enum RsaError {
    /// Key material could not be produced (bad parameters or an exponent that
    /// is not invertible modulo the totient). Retry with fresh primes.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The block width is unusable, either on its own or for this modulus.
    #[error("invalid block size: {0}")]
    BlockSize(String),

    /// A block value reached the transform without being below the modulus.
    #[error("block value {value} is not below the modulus {modulus}")]
    BlockRange { value: String, modulus: String },

    /// A value does not fit in the requested block width.
    #[error("value needs {needed} bytes but the block holds {block_size}")]
    BlockOverflow { needed: usize, block_size: usize },

    /// Padding length byte is inconsistent with the buffer.
    #[error("invalid padding: {0}")]
    Padding(String),

    /// Recovered bytes are not UTF-8 text.
    #[error("recovered bytes are not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Malformed serialized ciphertext.
    #[error("malformed encoding: {0}")]
    Wire(String),

    #[error("malformed hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Result type for RSA block operations
pub type Result<T> = std::result::Result<T, RsaError>;
