// Utility Module
// Session configuration and the ciphertext wire format

pub mod config;
pub mod wire;

pub use config::SessionConfig;
