// UI Module
// Console front-end that drives the core operations

pub mod console;

pub use console::{ConsoleSession, Mode};
