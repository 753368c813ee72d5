use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use jobboard::cli::{AdminDetails, create_admin};
use jobboard_db::{PgRepository, init_db_pool};

#[derive(Parser)]
#[command(name = "jobboard-cli")]
#[command(about = "Jobboard CLI - Administrative tools for the Jobboard API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a verified admin account
    CreateAdmin {
        /// Username
        #[arg(short = 'u', long)]
        username: String,

        /// Email address
        #[arg(short = 'e', long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short = 'p', long)]
        password: String,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Phone number
        #[arg(long)]
        phone_number: Option<String>,

        /// Gender
        #[arg(long)]
        gender: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    let users = PgRepository::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
            first_name,
            last_name,
            phone_number,
            gender,
        } => {
            let user = create_admin(
                &users,
                AdminDetails {
                    username,
                    email,
                    password,
                    first_name,
                    last_name,
                    phone_number,
                    gender,
                },
            )
            .await?;

            println!("Admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   Uid: {}", user.uid);
        }
    }

    Ok(())
}
