use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use financeiro::app::App;
use financeiro::cli::{Cli, Commands};
use financeiro::client::ApiClient;
use financeiro::config::ClientConfig;
use financeiro::interactive;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load_or_default(&cli.config);
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.ui.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
        Commands::Interactive => {
            info!("API base URL: {}", config.api.base_url);
            let api = ApiClient::from_config(&config.api)?;
            let mut app = App::new(api, &config);
            interactive::start(&mut app).await?;
        }
    }
    Ok(())
}
