// Block chaining modes
// ECB transforms every block on its own; CBC XOR-chains each block with the previous ciphertext

pub mod cbc;
pub mod ecb;

pub use cbc::{CbcCiphertext, CbcDecryptor, CbcEncryptor};
