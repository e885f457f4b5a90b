//! Lists the hosts currently online.
//!
//! Reads its configuration from `LFSWORLD_*` environment variables; at least
//! `LFSWORLD_IDK` must be set for LFSWorld to answer.

use lfsworld_core::Client;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = Client::from_env()?;
    let res = client.hosts().await?;

    if res.is_error() {
        eprintln!("{}", res.raw().unwrap_or("no response"));
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&res.data())?);
    Ok(())
}
