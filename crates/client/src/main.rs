//! `babylist` - terminal front-end for the gift registry.
//!
//! # Usage
//!
//! ```bash
//! babylist signup -n "Ana" -e ana@example.com -p secret --age 30
//! babylist login -e ana@example.com -p secret
//! babylist products
//! babylist reserve 12
//!
//! # Admin
//! babylist products --all
//! babylist product add -n "Stroller" -d "Blue"
//! babylist product update 12 --inactive
//! babylist users list
//! ```
//!
//! # Environment Variables
//!
//! - `BABYLIST_API_URL` - Server origin (default `http://localhost:3000`)
//! - `BABYLIST_STATE_DIR` - Where the login session is stored

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use babylist_client::config::ClientConfig;
use babylist_client::models::{ProductInput, UserUpdate};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "babylist")]
#[command(author, version, about = "Browse and reserve gifts on the baby list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user as the server sees it
    Whoami,
    /// Create a guest account
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        age: Option<i32>,
    },
    /// List products (active ones, or every product with --all)
    Products {
        /// Include inactive products (admin)
        #[arg(long)]
        all: bool,
    },
    /// Reserve a product for yourself
    Reserve {
        id: i64,
    },
    /// Manage the catalog (admin)
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage users (admin, or your own profile)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        url: Option<String>,
        #[arg(short, long)]
        image_url: Option<String>,
        /// Create hidden from guests
        #[arg(long)]
        inactive: bool,
    },
    /// Change some fields of a product
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        url: Option<String>,
        #[arg(short, long)]
        image_url: Option<String>,
        /// Show the product to guests
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        /// Hide the product from guests
        #[arg(long)]
        inactive: bool,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all users
    List,
    /// Show one user
    Show { id: i64 },
    /// Edit a user's profile
    Update {
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        age: Option<i32>,
    },
    /// Delete a user
    Delete { id: i64 },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "babylist_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut ctx = Context::new(ClientConfig::from_env())?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&mut ctx, &email, &password).await
        }
        Commands::Logout => commands::account::logout(&mut ctx),
        Commands::Whoami => commands::account::whoami(&ctx).await,
        Commands::Signup {
            name,
            email,
            password,
            age,
        } => commands::account::signup(&ctx, name, email, password, age).await,
        Commands::Products { all } => commands::products::list(&ctx, all).await,
        Commands::Reserve { id } => commands::products::reserve(&ctx, id).await,
        Commands::Product { action } => match action {
            ProductAction::Add {
                name,
                description,
                url,
                image_url,
                inactive,
            } => {
                let input = ProductInput {
                    name: Some(name),
                    description,
                    url,
                    image_url,
                    active: Some(!inactive),
                };
                commands::products::add(&ctx, &input).await
            }
            ProductAction::Update {
                id,
                name,
                description,
                url,
                image_url,
                active,
                inactive,
            } => {
                let input = ProductInput {
                    name,
                    description,
                    url,
                    image_url,
                    active: commands::products::active_flag(active, inactive),
                };
                commands::products::update(&ctx, id, &input).await
            }
        },
        Commands::Users { action } => match action {
            UserAction::List => commands::users::list(&ctx).await,
            UserAction::Show { id } => commands::users::show(&ctx, id).await,
            UserAction::Update {
                id,
                name,
                email,
                password,
                age,
            } => {
                let update = UserUpdate {
                    name,
                    email,
                    password,
                    age,
                };
                commands::users::update(&mut ctx, id, &update).await
            }
            UserAction::Delete { id } => commands::users::delete(&ctx, id).await,
        },
    }
}
