use catalog::console::commands;
use catalog::models::ROLE_USER;
use catalog::telemetry::{get_subscriber, init_subscriber};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "console", about = "Catalog maintenance commands")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Subcommand)]
enum UserCommands {
    /// Create or update a user
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = ROLE_USER)]
        role: String,
    },
}

#[derive(Debug, Subcommand)]
enum TokenCommands {
    /// Sign a bearer token with the configured secret
    Issue {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = ROLE_USER)]
        role: String,
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ProductsCommands {
    /// Bulk create products from a JSON array
    Import {
        #[arg(long)]
        file: PathBuf,
        /// Id of an existing user recorded as creator
        #[arg(long)]
        creator: String,
    },
    /// Print every product, newest first
    List,
    /// Delete all products and their images
    Purge,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = get_subscriber("console".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let cli = Cli::parse();

    get_command(cli).call()
}

fn get_command(cli: Cli) -> Box<dyn commands::CallableTrait> {
    match cli.command {
        Commands::Db { command } => match command {
            DbCommands::Migrate => Box::new(commands::db::MigrateCommand::new()),
        },
        Commands::User { command } => match command {
            UserCommands::Add {
                id,
                name,
                email,
                role,
            } => Box::new(commands::user::AddCommand::new(id, name, email, role)),
        },
        Commands::Token { command } => match command {
            TokenCommands::Issue {
                user_id,
                name,
                email,
                role,
                ttl_hours,
            } => Box::new(commands::token::IssueCommand::new(
                user_id, name, email, role, ttl_hours,
            )),
        },
        Commands::Products { command } => match command {
            ProductsCommands::Import { file, creator } => {
                Box::new(commands::products::ImportCommand::new(file, creator))
            }
            ProductsCommands::List => Box::new(commands::products::ListCommand::new()),
            ProductsCommands::Purge => Box::new(commands::products::PurgeCommand::new()),
        },
    }
}
