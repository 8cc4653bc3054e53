// ECB Mode
// Each block is encrypted independently, so identical plaintext blocks leak as identical ciphertext

use tracing::debug;

use crate::error::Result;
use crate::rsa::{
    blocks_to_text, decrypt_block, encrypt_block, text_to_blocks, validate_block_size, Block,
    BlockSize, RsaBigInt, RsaPrivateKey, RsaPublicKey,
};

/// Encrypt every block on its own, preserving order.
pub fn encrypt_blocks(blocks: &[Block], public_key: &RsaPublicKey) -> Result<Vec<RsaBigInt>> {
    blocks
        .iter()
        .map(|block| encrypt_block(block.value(), public_key))
        .collect()
}

/// Decrypt every ciphertext value on its own.
///
/// A recovered value wider than `block_size` (wrong key, corrupted input)
/// fails with `BlockOverflow`.
pub fn decrypt_blocks(
    cipher_blocks: &[RsaBigInt],
    private_key: &RsaPrivateKey,
    block_size: BlockSize,
) -> Result<Vec<Block>> {
    cipher_blocks
        .iter()
        .map(|c| Block::new(decrypt_block(c, private_key), block_size))
        .collect()
}

/// Validate, segment and encrypt `text` in ECB mode.
pub fn encrypt_text(text: &str, public_key: &RsaPublicKey, block_size: BlockSize) -> Result<Vec<RsaBigInt>> {
    validate_block_size(block_size, &public_key.n)?;

    let blocks = text_to_blocks(text, block_size);
    let cipher_blocks = encrypt_blocks(&blocks, public_key)?;

    debug!(blocks = cipher_blocks.len(), %block_size, "ECB encryption complete");
    Ok(cipher_blocks)
}

/// Validate, decrypt and reassemble ECB ciphertext into text.
pub fn decrypt_text(
    cipher_blocks: &[RsaBigInt],
    private_key: &RsaPrivateKey,
    block_size: BlockSize,
) -> Result<String> {
    validate_block_size(block_size, &private_key.n)?;

    let blocks = decrypt_blocks(cipher_blocks, private_key, block_size)?;

    debug!(blocks = blocks.len(), %block_size, "ECB decryption complete");
    blocks_to_text(&blocks, block_size)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rsa::keygen::shared_keypair;
    use proptest::prelude::*;

    // 64-bit primes give a modulus of at least 127 bits, so up to 15-byte blocks fit
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn ecb_text_roundtrip(text in any::<String>(), width in 1..=15usize) {
            let keypair = shared_keypair();
            let block_size = BlockSize::new(width).unwrap();

            let cipher = encrypt_text(&text, &keypair.public_key, block_size).unwrap();
            prop_assert_eq!(cipher.len(), text.len() / width + 1);
            prop_assert!(cipher.iter().all(|c| c < keypair.modulus()));

            let decrypted = decrypt_text(&cipher, &keypair.private_key, block_size).unwrap();
            prop_assert_eq!(decrypted, text);
        }
    }
}
