use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use teams_alert_bridge::{config::Config, gateway, to_message_card, AlertPayload, BridgeError};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

/// Translate Azure Monitor alerts into Microsoft Teams MessageCards.
#[derive(Parser, Debug)]
#[command(name = "teams-alert-bridge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP bridge.
    Serve {
        /// Path to a TOML config file.
        #[arg(long, short)]
        config: Option<String>,
        /// Override the listen port.
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Print the card an alert would produce, without sending it.
    Transform {
        /// Alert JSON file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { config, port } => {
            let mut config = Config::load(config.as_deref()).context("failed to load config")?;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            gateway::run(&config).await
        }
        Commands::Transform { input } => transform(&input).await,
    }
}

async fn transform(input: &str) -> Result<()> {
    let raw = if input == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read alert from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("cannot read alert file: {input}"))?
    };

    // Same messages the HTTP surface would answer with.
    let outcome = if raw.trim().is_empty() {
        Err(BridgeError::MissingBody)
    } else {
        AlertPayload::from_json(&raw)
            .map_err(BridgeError::from)
            .and_then(|alert| to_message_card(&alert).map_err(BridgeError::IllegalPayload))
    };

    match outcome {
        Ok(card) => {
            println!("{}", serde_json::to_string_pretty(&card)?);
            Ok(())
        }
        Err(err) => bail!("{err}"),
    }
}
