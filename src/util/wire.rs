// Wire Encoding
// Fixed-width big-endian serialization of blocks, IVs and ciphertext values

use crate::error::{Result, RsaError};
use crate::modes::CbcCiphertext;
use crate::rsa::bigint::{bit_length, from_bytes, to_fixed_bytes};
use crate::rsa::{Block, BlockSize, RsaBigInt};

/// Bytes needed for any value below `modulus`
///
/// Ciphertext values live in `[0, n)` and can exceed `256^block_size`, so they
/// are written at the modulus width rather than the block width.
pub fn modulus_width(modulus: &RsaBigInt) -> usize {
    ((bit_length(modulus) + 7) / 8) as usize
}

/// Concatenate `values`, each as exactly `width` big-endian bytes.
pub fn encode_values(values: &[RsaBigInt], width: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(values.len() * width);
    for value in values {
        out.extend_from_slice(&to_fixed_bytes(value, width)?);
    }
    Ok(out)
}

/// Split `bytes` into `width`-byte big-endian values.
pub fn decode_values(bytes: &[u8], width: usize) -> Result<Vec<RsaBigInt>> {
    if width == 0 || bytes.len() % width != 0 {
        return Err(RsaError::Wire(format!(
            "{} bytes is not a whole number of {}-byte values",
            bytes.len(),
            width
        )));
    }
    Ok(bytes.chunks(width).map(from_bytes).collect())
}

/// Plaintext blocks, each as exactly `block_size` bytes.
pub fn encode_blocks(blocks: &[Block]) -> Vec<u8> {
    blocks.iter().flat_map(|block| block.to_bytes()).collect()
}

pub fn decode_blocks(bytes: &[u8], block_size: BlockSize) -> Result<Vec<Block>> {
    if bytes.len() % block_size.bytes() != 0 {
        return Err(RsaError::Wire(format!(
            "{} bytes is not a whole number of {} blocks",
            bytes.len(),
            block_size
        )));
    }
    bytes
        .chunks(block_size.bytes())
        .map(|chunk| Block::from_bytes(chunk, block_size))
        .collect()
}

impl CbcCiphertext {
    /// IV (block width) followed by the ciphertext values (modulus width).
    pub fn to_bytes(&self, modulus: &RsaBigInt) -> Result<Vec<u8>> {
        let mut out = self.iv.to_bytes();
        out.extend(encode_values(&self.blocks, modulus_width(modulus))?);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8], block_size: BlockSize, modulus: &RsaBigInt) -> Result<Self> {
        if bytes.len() < block_size.bytes() {
            return Err(RsaError::Wire(format!(
                "{} bytes is too short to hold a {} IV",
                bytes.len(),
                block_size
            )));
        }

        let (iv, rest) = bytes.split_at(block_size.bytes());
        Ok(Self {
            iv: Block::from_bytes(iv, block_size)?,
            blocks: decode_values(rest, modulus_width(modulus))?,
        })
    }
}

/// Lowercase hex of the fixed-width encoding
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{cbc, ecb};
    use crate::rsa::bigint::from_u64;
    use crate::rsa::keygen::{test_keypair, toy_keypair};

    fn size(bytes: usize) -> BlockSize {
        BlockSize::new(bytes).unwrap()
    }

    #[test]
    fn test_modulus_width() {
        assert_eq!(modulus_width(&from_u64(3233)), 2);
        assert_eq!(modulus_width(&from_u64(255)), 1);
        assert_eq!(modulus_width(&from_u64(256)), 2);
    }

    #[test]
    fn test_encode_values_fixed_width() {
        let encoded = encode_values(&[from_u64(2570), from_u64(1)], 2).unwrap();
        assert_eq!(encoded, vec![0x0A, 0x0A, 0x00, 0x01]);
        assert_eq!(to_hex(&encoded), "0a0a0001");

        assert!(matches!(
            encode_values(&[from_u64(70000)], 2),
            Err(RsaError::BlockOverflow { .. })
        ));
    }

    #[test]
    fn test_decode_values_rejects_ragged_input() {
        assert!(matches!(decode_values(&[1, 2, 3], 2), Err(RsaError::Wire(_))));
        assert_eq!(decode_values(&[0, 1, 0, 2], 2).unwrap(), vec![from_u64(1), from_u64(2)]);
    }

    #[test]
    fn test_ecb_ciphertext_through_hex() {
        let keypair = test_keypair(128);
        let width = modulus_width(keypair.modulus());
        let text = "Ciphertext over the wire";

        let cipher = ecb::encrypt_text(text, &keypair.public_key, size(16)).unwrap();
        let encoded = to_hex(&encode_values(&cipher, width).unwrap());
        assert_eq!(encoded.len(), cipher.len() * width * 2);

        let decoded = decode_values(&from_hex(&encoded).unwrap(), width).unwrap();
        assert_eq!(ecb::decrypt_text(&decoded, &keypair.private_key, size(16)).unwrap(), text);
    }

    #[test]
    fn test_cbc_ciphertext_bytes() {
        let keypair = toy_keypair();
        let text = "wire";

        let cipher = cbc::encrypt_text(text, &keypair.public_key, size(1)).unwrap();
        let bytes = cipher.to_bytes(keypair.modulus()).unwrap();
        assert_eq!(bytes.len(), 1 + cipher.blocks.len() * 2);

        let parsed = CbcCiphertext::from_bytes(&bytes, size(1), keypair.modulus()).unwrap();
        assert_eq!(parsed, cipher);

        assert!(CbcCiphertext::from_bytes(&[], size(1), keypair.modulus()).is_err());
    }

    #[test]
    fn test_plaintext_blocks() {
        let blocks = vec![
            Block::new(from_u64(0x4869), size(2)).unwrap(),
            Block::new(from_u64(0x02), size(2)).unwrap(),
        ];
        let bytes = encode_blocks(&blocks);
        assert_eq!(bytes, vec![0x48, 0x69, 0x00, 0x02]);
        assert_eq!(decode_blocks(&bytes, size(2)).unwrap(), blocks);
        assert!(decode_blocks(&bytes[..3], size(2)).is_err());
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(from_hex("zz"), Err(RsaError::Hex(_))));
    }
}
