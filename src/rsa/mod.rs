// RSA Module - Main module file
// Exports the key material, block model and per-block primitives

pub mod bigint;
pub mod block;
pub mod codec;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod padding;
pub mod validate;

pub use bigint::RsaBigInt;
pub use block::{Block, BlockSize, MAX_BLOCK_SIZE};
pub use codec::{blocks_to_text, text_to_blocks};
pub use decrypt::decrypt_block;
pub use encrypt::{encrypt_block, rsa_transform};
pub use keygen::{keygen, keygen_with_rng, RsaKeyPair, RsaPrivateKey, RsaPublicKey, PUBLIC_EXPONENT};
pub use padding::{pad_message, unpad_message};
pub use validate::validate_block_size;
