pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::database::models::{Contact, Entity, Movie};
use client::ApiClient;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Command-line client for the contacts and movies API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "CATALOG_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the API server"
    )]
    pub url: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Manage contacts")]
    Contacts {
        #[command(subcommand)]
        cmd: commands::resource::ResourceCommands,
    },

    #[command(about = "Manage the movie watchlist")]
    Movies {
        #[command(subcommand)]
        cmd: commands::resource::ResourceCommands,
    },

    #[command(about = "Check server health status from the /health endpoint")]
    Health,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.url)?;

    match cli.command {
        Commands::Contacts { cmd } => {
            commands::resource::handle(&client, Contact::COLLECTION, cmd, output_format).await
        }
        Commands::Movies { cmd } => {
            commands::resource::handle(&client, Movie::COLLECTION, cmd, output_format).await
        }
        Commands::Health => commands::health::handle(&client, output_format).await,
    }
}
