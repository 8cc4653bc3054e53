// Session Configuration
// Parameters the console front-end passes into the core

use crate::error::Result;
use crate::rsa::BlockSize;

/// Configuration for an interactive encryption session
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Bit length of each prime; the modulus is about twice as wide
    pub key_bits: u32,
    /// Block width in bytes
    pub block_size: usize,
    /// Fresh key pairs to try before giving up on an unlucky exponent
    pub keygen_attempts: u32,
    /// Print the values an external RSA calculator needs to check one block
    pub show_verification: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_bits: 64,
            block_size: 8,
            keygen_attempts: 3,
            show_verification: false,
        }
    }
}

impl SessionConfig {
    pub fn with_key_bits(mut self, bits: u32) -> Self {
        self.key_bits = bits;
        self
    }

    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_keygen_attempts(mut self, attempts: u32) -> Self {
        self.keygen_attempts = attempts.max(1);
        self
    }

    pub fn with_verification(mut self, show: bool) -> Self {
        self.show_verification = show;
        self
    }

    /// The configured block width as a validated `BlockSize`
    pub fn block_size(&self) -> Result<BlockSize> {
        BlockSize::new(self.block_size)
    }
}
