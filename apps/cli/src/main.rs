//! TopicPress CLI: batch generation of topic directory pages.
//!
//! Reads a topic catalog, asks an LLM for each topic's prose, renders the
//! pages from a fixed template, and rebuilds the category indexes.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
