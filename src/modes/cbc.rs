// CBC-like Mode
// XOR-chains each block with the previous ciphertext (masked to the block width) before the RSA transform

use rand::{thread_rng, Rng};
use tracing::{debug, trace};

use crate::error::Result;
use crate::rsa::bigint::random_below;
use crate::rsa::{
    blocks_to_text, decrypt_block, encrypt_block, text_to_blocks, validate_block_size, Block,
    BlockSize, RsaBigInt, RsaPrivateKey, RsaPublicKey,
};

/// Output of a CBC encryption: the public IV and the ciphertext values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbcCiphertext {
    pub iv: Block,
    pub blocks: Vec<RsaBigInt>,
}

/// Encrypting side of the chain.
///
/// `previous` starts as `IV & mask` and after every step becomes the
/// ciphertext just produced, masked to the block width.
#[derive(Debug, Clone)]
pub struct CbcEncryptor<'a> {
    public_key: &'a RsaPublicKey,
    mask: RsaBigInt,
    previous: RsaBigInt,
}

impl<'a> CbcEncryptor<'a> {
    pub fn new(public_key: &'a RsaPublicKey, iv: &Block) -> Self {
        let mask = iv.size().mask();
        let previous = iv.value() & &mask;
        Self {
            public_key,
            mask,
            previous,
        }
    }

    /// mixed = m XOR previous; c = mixed^e mod n; previous = c & mask
    pub fn encrypt_block(&mut self, block: &Block) -> Result<RsaBigInt> {
        let mixed = block.value() ^ &self.previous;
        let c = encrypt_block(&mixed, self.public_key)?;

        self.previous = &c & &self.mask;
        trace!(%mixed, %c, previous = %self.previous, "CBC encrypt step");
        Ok(c)
    }

    /// Current chaining value
    pub fn chaining_value(&self) -> &RsaBigInt {
        &self.previous
    }
}

/// Decrypting side of the chain.
///
/// The chaining value is updated from the ciphertext just consumed, never
/// from the recovered plaintext.
#[derive(Debug, Clone)]
pub struct CbcDecryptor<'a> {
    private_key: &'a RsaPrivateKey,
    block_size: BlockSize,
    mask: RsaBigInt,
    previous: RsaBigInt,
}

impl<'a> CbcDecryptor<'a> {
    pub fn new(private_key: &'a RsaPrivateKey, iv: &Block) -> Self {
        let mask = iv.size().mask();
        let previous = iv.value() & &mask;
        Self {
            private_key,
            block_size: iv.size(),
            mask,
            previous,
        }
    }

    /// mixed = (c^d mod n) & mask; m = mixed XOR previous; previous = c & mask
    pub fn decrypt_block(&mut self, c: &RsaBigInt) -> Result<Block> {
        let mixed = decrypt_block(c, self.private_key) & &self.mask;
        let m = mixed ^ &self.previous;

        self.previous = c & &self.mask;
        trace!(%c, %m, previous = %self.previous, "CBC decrypt step");
        Block::new(m, self.block_size)
    }

    /// Current chaining value
    pub fn chaining_value(&self) -> &RsaBigInt {
        &self.previous
    }
}

/// Run the encrypt chain over `blocks` starting from `iv`.
pub fn encrypt_blocks(blocks: &[Block], public_key: &RsaPublicKey, iv: &Block) -> Result<Vec<RsaBigInt>> {
    let mut chain = CbcEncryptor::new(public_key, iv);
    blocks.iter().map(|block| chain.encrypt_block(block)).collect()
}

/// Run the decrypt chain over `cipher_blocks` starting from `iv`.
pub fn decrypt_blocks(
    cipher_blocks: &[RsaBigInt],
    private_key: &RsaPrivateKey,
    iv: &Block,
) -> Result<Vec<Block>> {
    let mut chain = CbcDecryptor::new(private_key, iv);
    cipher_blocks.iter().map(|c| chain.decrypt_block(c)).collect()
}

/// Draw a uniformly random IV in `[0, 256^block_size)`.
pub fn random_iv<R: Rng + ?Sized>(rng: &mut R, block_size: BlockSize) -> Result<Block> {
    Block::new(random_below(rng, &block_size.bound()), block_size)
}

/// Validate, segment and encrypt `text` in CBC mode with a fresh IV.
///
/// The IV comes from `rand::thread_rng()`. The mode does not depend on the IV
/// being secret, only on it not repeating.
pub fn encrypt_text(text: &str, public_key: &RsaPublicKey, block_size: BlockSize) -> Result<CbcCiphertext> {
    encrypt_text_with_rng(&mut thread_rng(), text, public_key, block_size)
}

/// `encrypt_text` drawing the IV from `rng`.
pub fn encrypt_text_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    text: &str,
    public_key: &RsaPublicKey,
    block_size: BlockSize,
) -> Result<CbcCiphertext> {
    validate_block_size(block_size, &public_key.n)?;

    let blocks = text_to_blocks(text, block_size);
    let iv = random_iv(rng, block_size)?;
    let cipher_blocks = encrypt_blocks(&blocks, public_key, &iv)?;

    debug!(blocks = cipher_blocks.len(), %block_size, %iv, "CBC encryption complete");
    Ok(CbcCiphertext {
        iv,
        blocks: cipher_blocks,
    })
}

/// Validate, decrypt and reassemble CBC ciphertext into text.
pub fn decrypt_text(
    cipher_blocks: &[RsaBigInt],
    private_key: &RsaPrivateKey,
    iv: &Block,
    block_size: BlockSize,
) -> Result<String> {
    validate_block_size(block_size, &private_key.n)?;
    let iv = Block::new(iv.value().clone(), block_size)?;

    let blocks = decrypt_blocks(cipher_blocks, private_key, &iv)?;

    debug!(blocks = blocks.len(), %block_size, "CBC decryption complete");
    blocks_to_text(&blocks, block_size)
}
