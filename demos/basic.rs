//! Basic usage example
//!
//! Run from anywhere inside a project that has a `.env.local` at its root:
//!
//! ```sh
//! RUST_LOG=getenv=debug cargo run --example basic
//! ```

use getenv::{EnvError, ErrorCode};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A missing file is expected in fresh checkouts; anything else is fatal
    match getenv::init() {
        Ok(()) => println!("Loaded {}", getenv::DEFAULT_ENV_FILE),
        Err(e) if e.code() == ErrorCode::NoEnvFile => println!("{e}"),
        Err(e) => return Err(e.into()),
    }

    for key in ["DATABASE_URL", "SERVER_ADDR"] {
        match getenv::get_env(key) {
            Ok(value) => println!("  {key} = {value}"),
            Err(EnvError::NoSuchVar { key }) => println!("  {key} is not set"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
