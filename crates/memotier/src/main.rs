//! memotier - Entry Point
//!
//! Admin command for inspecting and invalidating a memotier cache. Output is
//! JSON on stdout; logs go to stderr.

use clap::Parser;
use memotier::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse()).await
}
