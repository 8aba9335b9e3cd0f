//! geoquiz CLI: the terminal front-end of the quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "geoquiz", version, about = "World geography quiz with level progression")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sign in with this email or handle before running the command
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the levels of one or all domains
    Levels {
        /// Domain (Monde, Europe, Afrique, Asie, Amériques, Océanie)
        #[arg(long)]
        domain: Option<String>,
    },

    /// Play a level attempt
    Play {
        /// Domain to play in (defaults to the configured domain)
        #[arg(long)]
        domain: Option<String>,

        /// Level number (1-5)
        #[arg(long, default_value = "1")]
        level: u8,

        /// Seed for reproducible question draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Free practice on a theme
    Practice {
        /// Theme: pays, capitales, drapeaux
        #[arg(long, default_value = "capitales")]
        theme: String,

        /// Zone to draw countries from
        #[arg(long)]
        zone: Option<String>,

        /// Number of questions (0 for unlimited)
        #[arg(long, default_value = "10")]
        count: u32,

        /// Seed for reproducible question draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show scores, unlocked levels and rank
    Status {
        /// Print the progress snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog countries
    Countries {
        /// Zone to list
        #[arg(long)]
        zone: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        handle: String,
    },

    /// Check credentials against the backend
    Login {
        /// Email or handle
        identifier: String,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("geoquiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        user: cli.user,
    };

    let result = match cli.command {
        Commands::Levels { domain } => commands::levels::execute(domain),
        Commands::Play {
            domain,
            level,
            seed,
        } => commands::play::execute(&global, domain, level, seed).await,
        Commands::Practice {
            theme,
            zone,
            count,
            seed,
        } => commands::practice::execute(&global, theme, zone, count, seed).await,
        Commands::Status { json } => commands::status::execute(&global, json).await,
        Commands::Countries { zone } => commands::countries::execute(zone),
        Commands::Signup { email, handle } => {
            commands::account::signup(&global, email, handle).await
        }
        Commands::Login { identifier } => commands::account::login(&global, identifier).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
