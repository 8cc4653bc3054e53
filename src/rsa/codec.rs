// Block Codec
// Converts UTF-8 text to fixed-width blocks and back

use tracing::debug;

use super::block::{Block, BlockSize};
use super::padding::{pad_message, unpad_message};
use crate::error::Result;

/// UTF-8 encode `text`, pad it, and split it into big-endian blocks.
pub fn text_to_blocks(text: &str, block_size: BlockSize) -> Vec<Block> {
    let padded = pad_message(text.as_bytes(), block_size);

    let blocks: Vec<Block> = padded
        .chunks(block_size.bytes())
        .map(|chunk| Block::from_chunk(chunk, block_size))
        .collect();

    debug!(text_len = text.len(), blocks = blocks.len(), "segmented text into blocks");
    blocks
}

/// Reassemble text from blocks: fixed-width bytes, strip padding, decode UTF-8.
///
/// Fails with `Padding` if the length byte is inconsistent, `BlockOverflow`
/// if a block is wider than `block_size`, and `Decode` if the bytes are not
/// UTF-8.
pub fn blocks_to_text(blocks: &[Block], block_size: BlockSize) -> Result<String> {
    let mut message = Vec::with_capacity(blocks.len() * block_size.bytes());
    for block in blocks {
        let resized = Block::new(block.value().clone(), block_size)?;
        message.extend_from_slice(&resized.to_bytes());
    }

    let unpadded = unpad_message(&message)?;
    debug!(bytes = unpadded.len(), "unpadded message");

    Ok(String::from_utf8(unpadded.to_vec())?)
}
