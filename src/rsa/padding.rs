// PKCS#7-style Padding
// Pads a message to a whole number of blocks; every padding byte equals the padding length

use tracing::trace;

use super::block::BlockSize;
use crate::error::{Result, RsaError};

/// Append `pad_len` bytes of value `pad_len` so the length becomes a multiple
/// of the block size.
///
/// There is always at least one byte of padding: a message that already fills
/// whole blocks gets a full extra block. `BlockSize` caps the width at 255, so
/// the length always fits in one byte.
pub fn pad_message(message: &[u8], block_size: BlockSize) -> Vec<u8> {
    let width = block_size.bytes();
    let pad_len = width - (message.len() % width);

    trace!(original_len = message.len(), pad_len, "padding message");

    let mut result = Vec::with_capacity(message.len() + pad_len);
    result.extend_from_slice(message);
    result.resize(message.len() + pad_len, pad_len as u8);
    result
}

/// Strip the padding indicated by the last byte.
///
/// Only the length byte is checked; the other padding bytes are not compared.
pub fn unpad_message(message: &[u8]) -> Result<&[u8]> {
    let pad_len = match message.last() {
        Some(&last) => last as usize,
        None => return Err(RsaError::Padding("message is empty".to_string())),
    };

    trace!(pad_len, "detected padding length");

    if pad_len == 0 {
        return Err(RsaError::Padding("padding length is zero".to_string()));
    }
    if pad_len > message.len() {
        return Err(RsaError::Padding(format!(
            "padding length {} exceeds message length {}",
            pad_len,
            message.len()
        )));
    }

    Ok(&message[..message.len() - pad_len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(bytes: usize) -> BlockSize {
        BlockSize::new(bytes).unwrap()
    }

    #[test]
    fn test_pad_partial_block() {
        let padded = pad_message(b"Hello", size(8));
        assert_eq!(padded, b"Hello\x03\x03\x03");
    }

    #[test]
    fn test_pad_exact_multiple_adds_full_block() {
        let message = b"AAAAAAAAAAAAAAAA";
        let padded = pad_message(message, size(16));
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn test_pad_empty() {
        assert_eq!(pad_message(b"", size(4)), vec![4, 4, 4, 4]);
    }

    #[test]
    fn test_pad_max_width() {
        let padded = pad_message(b"x", size(255));
        assert_eq!(padded.len(), 255);
        assert_eq!(padded[254], 254);
    }

    #[test]
    fn test_unpad() {
        assert_eq!(unpad_message(b"Hello\x03\x03\x03").unwrap(), b"Hello");
        assert_eq!(unpad_message(&[2, 2]).unwrap(), b"");
    }

    #[test]
    fn test_roundtrip() {
        let test_data: Vec<&[u8]> = vec![b"", b"A", b"AB", b"Hello, World!", b"12345678"];

        for data in test_data {
            for width in [1, 3, 8, 16] {
                let padded = pad_message(data, size(width));
                assert_eq!(padded.len() % width, 0);
                assert_eq!(unpad_message(&padded).unwrap(), data);
            }
        }
    }

    #[test]
    fn test_invalid_padding() {
        assert!(matches!(unpad_message(b""), Err(RsaError::Padding(_))));
        assert!(matches!(unpad_message(&[1, 2, 0]), Err(RsaError::Padding(_))));
        assert!(matches!(unpad_message(&[9, 9, 9]), Err(RsaError::Padding(_))));
    }
}
