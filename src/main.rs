use std::io;
use std::process;

use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

use rsa_block_modes::ui::ConsoleSession;
use rsa_block_modes::util::SessionConfig;

fn init_tracing() {
    let targets = std::env::var("RUST_LOG")
        .ok()
        .and_then(|var| var.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(LevelFilter::WARN));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(targets)
        .init();
}

fn main() {
    init_tracing();

    let stdin = io::stdin();
    let mut session = ConsoleSession::new(stdin.lock(), io::stdout(), SessionConfig::default());

    if let Err(e) = session.run() {
        eprintln!("Error running session: {:#}", e);
        process::exit(1);
    }
}
