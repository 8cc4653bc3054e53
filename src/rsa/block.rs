// Block value types
// Fixed-width unsigned integers that the chaining modes operate on

use std::fmt;

use num_traits::One;

use super::bigint::{bit_length, from_bytes, RsaBigInt};
use crate::error::{Result, RsaError};

/// Largest supported block width. The padding length is stored in a single
/// byte, so a block cannot be wider than 255 bytes.
pub const MAX_BLOCK_SIZE: usize = 255;

/// Byte width of every block in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSize(usize);

impl BlockSize {
    /// Create a block size in bytes, rejecting 0 and anything the one-byte
    /// padding length cannot describe.
    pub fn new(bytes: usize) -> Result<Self> {
        if bytes == 0 {
            return Err(RsaError::BlockSize("block size must be at least 1 byte".to_string()));
        }
        if bytes > MAX_BLOCK_SIZE {
            return Err(RsaError::BlockSize(format!(
                "block size must be at most {} bytes, got {}",
                MAX_BLOCK_SIZE, bytes
            )));
        }
        Ok(Self(bytes))
    }

    /// Width in bytes
    pub fn bytes(&self) -> usize {
        self.0
    }

    /// Width in bits
    pub fn bits(&self) -> u64 {
        self.0 as u64 * 8
    }

    /// 256^bytes, the exclusive upper bound of a block value
    pub fn bound(&self) -> RsaBigInt {
        RsaBigInt::one() << self.bits()
    }

    /// 2^(8*bytes) - 1
    pub fn mask(&self) -> RsaBigInt {
        self.bound() - 1u8
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

/// An unsigned integer in `[0, 256^size)`, the big-endian reading of `size` raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Block {
    value: RsaBigInt,
    size: BlockSize,
}

impl Block {
    /// Wrap a value, failing with `BlockOverflow` if it does not fit in `size` bytes.
    pub fn new(value: RsaBigInt, size: BlockSize) -> Result<Self> {
        if value >= size.bound() {
            return Err(RsaError::BlockOverflow {
                needed: ((bit_length(&value) + 7) / 8) as usize,
                block_size: size.bytes(),
            });
        }
        Ok(Self { value, size })
    }

    /// Read a block from exactly `size` big-endian bytes.
    pub fn from_bytes(bytes: &[u8], size: BlockSize) -> Result<Self> {
        if bytes.len() != size.bytes() {
            return Err(RsaError::Wire(format!(
                "expected {} bytes for one block, got {}",
                size.bytes(),
                bytes.len()
            )));
        }
        Ok(Self {
            value: from_bytes(bytes),
            size,
        })
    }

    /// A chunk of padded message that is already exactly `size` bytes long.
    pub(crate) fn from_chunk(chunk: &[u8], size: BlockSize) -> Self {
        debug_assert_eq!(chunk.len(), size.bytes());
        Self {
            value: from_bytes(chunk),
            size,
        }
    }

    pub fn value(&self) -> &RsaBigInt {
        &self.value
    }

    pub fn size(&self) -> BlockSize {
        self.size
    }

    /// Exactly `size` big-endian bytes, left-padded with zeros.
    pub fn to_bytes(&self) -> Vec<u8> {
        // value < 256^size is guaranteed by construction
        let raw = self.value.to_bytes_be();
        let mut result = vec![0u8; self.size.bytes()];
        let start = result.len().saturating_sub(raw.len());
        result[start..].copy_from_slice(&raw);
        result
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
