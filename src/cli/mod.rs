use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "financeiro")]
#[command(about = "Contas a pagar e a receber - cliente", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file (created with defaults if missing)
    #[arg(long, default_value = "financeiro.toml")]
    pub config: String,

    /// Overrides `api.base_url` from the config file
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session (default)
    Interactive,
    /// Print the effective configuration
    Config,
}
