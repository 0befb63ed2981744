//! Build a conversational workspace JSON from a CSV training corpus
//!
//! ```bash
//! corpus2workspace --input corpus.csv --output workspace.json --intent-prefix faq
//! corpus2workspace --interactive
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use workspace_core::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();

    if cli.interactive {
        let stdin = std::io::stdin();
        cli.prompt(stdin.lock(), std::io::stdout())
            .context("Failed to read configuration from the terminal")?;
    }

    let document = cli
        .run()
        .await
        .with_context(|| format!("Failed to build workspace from '{}'", cli.input))?;

    println!(
        "Workspace JSON file saved to \"{}\" ({} intents, {} dialog nodes).",
        cli.output,
        document.intents.len(),
        document.dialog_nodes.len()
    );
    Ok(())
}
