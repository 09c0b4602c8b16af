//! TruthLens CLI - Main entry point.

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use truthlens_cli::render::Rendered;
use truthlens_cli::{submit_and_render, ClientConfig, GatewayClient, DEFAULT_ENDPOINT};
use truthlens_common::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "truthlens")]
#[command(version)]
#[command(about = "Check text for misinformation, bias, and logical fallacies.", long_about = None)]
struct Cli {
    /// Gateway base URL
    #[arg(long, env = "TRUTHLENS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 310)]
    timeout: u64,

    /// Log level for diagnostics
    #[arg(long, env = "TRUTHLENS_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Text to analyze. Reads lines from stdin when omitted.
    text: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, "pretty");

    let client = GatewayClient::with_config(ClientConfig {
        endpoint: cli.endpoint,
        timeout_secs: cli.timeout,
    })?;

    let failed = if cli.text.is_empty() {
        run_interactive(&client).await?
    } else {
        let rendered = submit_and_render(&client, &cli.text.join(" "), |s| eprintln!("{s}")).await;
        print_rendered(&rendered);
        rendered.is_error()
    };

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Analyze stdin line by line until EOF. Returns whether any line failed.
async fn run_interactive(client: &GatewayClient) -> Result<bool> {
    tracing::debug!(endpoint = client.endpoint(), "Reading input from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut failed = false;

    while let Some(line) = lines.next_line().await? {
        let rendered = submit_and_render(client, &line, |s| eprintln!("{s}")).await;
        print_rendered(&rendered);
        failed |= rendered.is_error();
    }

    Ok(failed)
}

fn print_rendered(rendered: &Rendered) {
    match rendered {
        Rendered::Notice(text) => eprintln!("{text}"),
        Rendered::Analysis(text) | Rendered::Error(text) => println!("{text}"),
    }
}
