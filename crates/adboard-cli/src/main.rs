use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "adboard")]
#[command(about = "Browse a remote product catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse one page of the catalog
    List(commands::ListArgs),
    /// Show one catalog item in detail
    Show {
        /// Catalog item id
        id: i64,
    },
    /// List the catalog's category slugs
    Categories,
    /// List brands derived from the catalog
    Brands,
    /// Register a local user
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in as a registered user
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the active session
    Logout,
    /// Show the active session
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = adboard_core::load_app_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => commands::list(&config, &args).await,
        Commands::Show { id } => commands::show(&config, id).await,
        Commands::Categories => commands::categories(&config).await,
        Commands::Brands => commands::brands(&config).await,
        Commands::Register {
            name,
            email,
            password,
        } => commands::register(&config, name, email, password),
        Commands::Login { email, password } => commands::login(&config, &email, &password),
        Commands::Logout => commands::logout(&config),
        Commands::Whoami => commands::whoami(&config),
    }
}
