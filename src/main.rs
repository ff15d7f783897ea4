use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// rrbusiness - RR Business Group contact relay
#[derive(Parser)]
#[command(name = "rrbusiness")]
#[command(about = "Contact form relay for the RR Business Group website", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send a contact inquiry to a running relay
    Submit {
        /// Relay base url
        #[arg(long, default_value = "http://localhost:3000")]
        endpoint: String,

        /// Origin header to declare, as a browser on that site would
        #[arg(long)]
        origin: Option<String>,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        message: String,
    },
    /// Validate configuration and print the effective values
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = rrbusiness::config::Config::load(cli.config.clone())?;

    rrbusiness::observability::init_observability(
        "rrbusiness",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        &config.observability.log_format,
    )?;

    match cli.command {
        Commands::Serve { host, port } => {
            config.validate().map_err(|e| anyhow::anyhow!(e))?;
            cli::server::serve(config, host, port).await
        }
        Commands::Submit {
            endpoint,
            origin,
            name,
            email,
            phone,
            company,
            message,
        } => {
            cli::submit::submit(cli::submit::SubmitArgs {
                endpoint,
                origin,
                name,
                email,
                phone,
                company,
                message,
            })
            .await
        }
        Commands::CheckConfig => cli::check::check_config(&config),
    }
}
