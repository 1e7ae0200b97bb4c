use std::{process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use sitebake::config::{Config, CONFIG_FILE};
use sitebake::error::Error;
use sitebake::serve::{serve, DEFAULT_PORT};
use sitebake::site::Site;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about, version)]
struct Args {
    /// command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// render the templates and copy the static files into the output directory
    Build,
    /// serve the current directory over http
    Serve {
        /// port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match args.command {
        Commands::Build => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
            if let Err(err) = build() {
                log::error!("{err:#}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Serve { port } => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "sitebake=debug,tower_http=debug".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            if let Err(err) = serve(port).await {
                tracing::error!("Failed to serve on port {port}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn build() -> anyhow::Result<()> {
    let start = Instant::now();
    let config = match Config::load() {
        Ok(config) => config,
        Err(Error::ConfigNotFound(_)) => {
            anyhow::bail!(
                "the configuration file '{CONFIG_FILE}' was not found, make sure it exists at the root of the project"
            );
        }
        Err(err) => return Err(err.into()),
    };
    Site::new(config).build_since(start)?;
    Ok(())
}
