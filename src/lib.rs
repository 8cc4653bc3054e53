//! Textbook RSA used as a block cipher.
//!
//! Messages are padded and cut into fixed-width blocks, and each block is
//! pushed through `m^e mod n`, either independently (ECB) or after being
//! XOR-chained with the previous ciphertext (a CBC-like mode). This is a
//! teaching construction: there is no OAEP, no authentication and no
//! constant-time arithmetic, and ECB leaks repeated blocks on purpose.

pub mod error;
pub mod modes;
pub mod rsa;
pub mod ui;
pub mod util;

pub use error::{Result, RsaError};
pub use modes::cbc::{decrypt_text as decrypt_text_cbc, encrypt_text as encrypt_text_cbc};
pub use modes::ecb::{decrypt_text as decrypt_text_ecb, encrypt_text as encrypt_text_ecb};
pub use modes::CbcCiphertext;
pub use rsa::{keygen, validate_block_size, Block, BlockSize, RsaBigInt, RsaKeyPair, RsaPrivateKey, RsaPublicKey};
