// Console front-end
// Interactive session: choose a mode, enter a message, then generate keys, encrypt and decrypt it

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{anyhow, Context};
use tracing::{info, warn};

use crate::error::RsaError;
use crate::modes::{cbc, ecb};
use crate::rsa::{keygen, validate_block_size, BlockSize, RsaBigInt, RsaKeyPair};
use crate::util::wire::{encode_values, modulus_width, to_hex};
use crate::util::SessionConfig;

/// Chaining mode picked at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ecb,
    Cbc,
}

impl Mode {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Mode::Ecb),
            "2" => Some(Mode::Cbc),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ecb => write!(f, "ECB"),
            Mode::Cbc => write!(f, "CBC"),
        }
    }
}

/// One interactive round trip over any reader and writer.
pub struct ConsoleSession<R, W> {
    input: R,
    output: W,
    config: SessionConfig,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the session. Returns the decrypted message, or `None` when the user
    /// gave an invalid mode or an empty message.
    pub fn run(&mut self) -> anyhow::Result<Option<String>> {
        writeln!(self.output, "=== RSA Encryption Console Mode ===\n")?;
        writeln!(self.output, "Select encryption mode:")?;
        writeln!(self.output, "1. ECB (Electronic Codebook)")?;
        writeln!(self.output, "2. CBC (Cipher Block Chaining)")?;

        let mode = match Mode::from_choice(&self.prompt("Enter 1 or 2: ")?) {
            Some(mode) => mode,
            None => {
                writeln!(self.output, "Invalid choice. Exiting.")?;
                return Ok(None);
            }
        };
        writeln!(self.output, "\nSelected mode: {}\n", mode)?;

        let message = self.prompt("Enter message to encrypt: ")?;
        if message.is_empty() {
            writeln!(self.output, "Message cannot be empty. Exiting.")?;
            return Ok(None);
        }

        writeln!(self.output, "\nGenerating RSA keys...")?;
        let keypair = self.generate_keys()?;
        let block_size = self.config.block_size()?;
        validate_block_size(block_size, keypair.modulus())
            .with_context(|| format!("{}-bit primes cannot carry {} blocks", self.config.key_bits, block_size))?;
        writeln!(self.output, "Keys generated successfully!")?;
        writeln!(self.output, "\nOriginal message: {}", message)?;

        let decrypted = match mode {
            Mode::Ecb => self.run_ecb(&message, &keypair, block_size)?,
            Mode::Cbc => self.run_cbc(&message, &keypair, block_size)?,
        };

        writeln!(self.output, "\nDecrypted message: {}", decrypted)?;
        writeln!(self.output, "\nDone!")?;
        Ok(Some(decrypted))
    }

    fn run_ecb(&mut self, message: &str, keypair: &RsaKeyPair, block_size: BlockSize) -> anyhow::Result<String> {
        let cipher = ecb::encrypt_text(message, &keypair.public_key, block_size).context("ECB encryption failed")?;
        self.print_blocks(&cipher, keypair)?;
        self.print_verification(&cipher, keypair)?;

        ecb::decrypt_text(&cipher, &keypair.private_key, block_size).context("ECB decryption failed")
    }

    fn run_cbc(&mut self, message: &str, keypair: &RsaKeyPair, block_size: BlockSize) -> anyhow::Result<String> {
        let cipher = cbc::encrypt_text(message, &keypair.public_key, block_size).context("CBC encryption failed")?;
        writeln!(self.output, "\nIV: {} (0x{})", cipher.iv, to_hex(&cipher.iv.to_bytes()))?;
        self.print_blocks(&cipher.blocks, keypair)?;
        self.print_verification(&cipher.blocks, keypair)?;

        cbc::decrypt_text(&cipher.blocks, &keypair.private_key, &cipher.iv, block_size)
            .context("CBC decryption failed")
    }

    fn generate_keys(&mut self) -> anyhow::Result<RsaKeyPair> {
        let attempts = self.config.keygen_attempts.max(1);
        for attempt in 1..=attempts {
            match keygen(self.config.key_bits) {
                Ok(keypair) => {
                    info!(attempt, modulus_bits = keypair.bit_length(), "key pair ready");
                    return Ok(keypair);
                }
                Err(RsaError::KeyGeneration(reason)) => {
                    warn!(attempt, %reason, "key generation failed, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(anyhow!("key generation failed after {} attempts", attempts))
    }

    fn print_blocks(&mut self, cipher: &[RsaBigInt], keypair: &RsaKeyPair) -> anyhow::Result<()> {
        let width = modulus_width(keypair.modulus());
        let decimal: Vec<String> = cipher.iter().map(|c| c.to_string()).collect();

        writeln!(self.output, "Encrypted blocks: [{}]", decimal.join(", "))?;
        writeln!(self.output, "Encrypted hex: {}", to_hex(&encode_values(cipher, width)?))?;
        Ok(())
    }

    fn print_verification(&mut self, cipher: &[RsaBigInt], keypair: &RsaKeyPair) -> anyhow::Result<()> {
        if !self.config.show_verification {
            return Ok(());
        }
        let first = cipher
            .first()
            .ok_or_else(|| anyhow!("no ciphertext block to verify"))?;

        writeln!(self.output, "\nExternal check (any RSA calculator):")?;
        writeln!(self.output, "  C = {}", first)?;
        writeln!(self.output, "  E = {}", keypair.public_exponent())?;
        writeln!(self.output, "  N = {}", keypair.modulus())?;
        writeln!(self.output, "  D = {}", keypair.private_exponent())?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line).context("failed to read from input")?;
        Ok(line.trim().to_string())
    }
}
