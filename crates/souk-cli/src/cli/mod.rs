//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use souk_core::{Config, Marketplace};

mod commands;

#[derive(Parser)]
#[command(name = "souk")]
#[command(version)]
#[command(about = "SOUK marketplace client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the marketplace API base URL
    #[arg(long, env = "SOUK_API_URL")]
    api_url: Option<String>,

    /// Device token forwarded on login/logout
    #[arg(long, env = "SOUK_DEVICE_TOKEN")]
    device_token: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        /// Display name for the new account
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },

    /// Log in with existing credentials
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Log out and clear the local session
    Logout,

    /// Show the current session
    Whoami,

    /// Browse and manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Inspect account information and local settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(clap::Subcommand)]
enum ProductCommands {
    /// List products
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one product
    Show { id: String },

    /// Create a product, optionally uploading an image
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        /// Path to an image file to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Edit a product, optionally replacing its image
    Edit {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a product
    Delete { id: String },
}

#[derive(clap::Subcommand)]
enum SettingsCommands {
    /// Show account information and stored settings
    Show,
    /// Read one setting
    Get { key: String },
    /// Write one setting
    Set { key: String, value: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if cli.device_token.is_some() {
        config.device_token = cli.device_token;
    }

    let market = Marketplace::new(config).context("Failed to initialize marketplace client")?;
    market.initialize();

    match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => commands::auth::register(&market, email, name, password).await,
        Commands::Login { email, password } => commands::auth::login(&market, email, password).await,
        Commands::Logout => commands::auth::logout(&market).await,
        Commands::Whoami => commands::auth::whoami(&market),

        Commands::Products { command } => match command {
            ProductCommands::List { page, limit } => {
                commands::products::list(&market, page, limit).await
            }
            ProductCommands::Show { id } => commands::products::show(&market, &id).await,
            ProductCommands::Create {
                name,
                description,
                price,
                image,
            } => commands::products::create(&market, name, description, price, image).await,
            ProductCommands::Edit {
                id,
                name,
                description,
                price,
                image,
            } => commands::products::edit(&market, &id, name, description, price, image).await,
            ProductCommands::Delete { id } => commands::products::delete(&market, &id).await,
        },

        Commands::Settings { command } => match command {
            SettingsCommands::Show => commands::settings::show(&market),
            SettingsCommands::Get { key } => commands::settings::get(&market, &key),
            SettingsCommands::Set { key, value } => commands::settings::set(&market, &key, &value),
        },
    }
}
