// Block size validation
// A block's largest value must stay strictly below the modulus or the modular reduction loses data

use tracing::debug;

use super::bigint::{bit_length, RsaBigInt};
use super::block::BlockSize;
use crate::error::{Result, RsaError};

/// Fail with `BlockSize` when `block_size * 8 >= bitLength(modulus)`.
///
/// Every text-level encrypt and decrypt entry point calls this before
/// touching a block.
pub fn validate_block_size(block_size: BlockSize, modulus: &RsaBigInt) -> Result<()> {
    let modulus_bits = bit_length(modulus);

    debug!(block_bits = block_size.bits(), modulus_bits, "checking block size");

    if block_size.bits() >= modulus_bits {
        return Err(RsaError::BlockSize(format!(
            "{} is too large for a {}-bit modulus",
            block_size, modulus_bits
        )));
    }

    Ok(())
}
