//! Innkeep Admin — operator CLI for the account store.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use innkeep_core::models::user::{CreateUser, UpdateUser, UserRole};
use innkeep_core::repository::{Pagination, UserRepository};
use innkeep_db::{CredentialHasher, DbConfig, DbManager, HashingConfig};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "innkeep-admin", version, about = "Manage Innkeep user accounts")]
struct Cli {
    #[command(flatten)]
    db: DbArgs,

    /// Server-side pepper prepended to passwords before hashing.
    #[arg(long, env = "INNKEEP_PASSWORD_PEPPER", hide_env_values = true, global = true)]
    pepper: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct DbArgs {
    #[arg(long = "db-url", env = "INNKEEP_DB_URL", default_value = "127.0.0.1:8000", global = true)]
    url: String,

    #[arg(long = "db-namespace", env = "INNKEEP_DB_NAMESPACE", default_value = "innkeep", global = true)]
    namespace: String,

    #[arg(long = "db-name", env = "INNKEEP_DB_NAME", default_value = "main", global = true)]
    database: String,

    #[arg(long = "db-user", env = "INNKEEP_DB_USER", default_value = "root", global = true)]
    username: String,

    #[arg(
        long = "db-pass",
        env = "INNKEEP_DB_PASS",
        default_value = "root",
        hide_env_values = true,
        global = true
    )]
    password: String,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        DbConfig {
            url: args.url,
            namespace: args.namespace,
            database: args.database,
            username: args.username,
            password: args.password,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Register a new account.
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INNKEEP_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// One of: user, hotel_owner, admin.
        #[arg(long, default_value = "user")]
        role: UserRole,
    },
    /// Replace an account's password.
    SetPassword {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INNKEEP_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Check a password against the stored credential.
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INNKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List accounts.
    ListUsers {
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 50)]
        limit: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("innkeep=info".parse()?),
        )
        .json()
        .init();

    let cli = Cli::parse();

    let db = DbManager::open(&cli.db.into())
        .await
        .context("opening account store")?;

    let hasher = CredentialHasher::new(&HashingConfig {
        pepper: cli.pepper,
        ..Default::default()
    })?;
    let repo = db.users(hasher);

    match cli.command {
        Command::Migrate => println!("schema is up to date"),
        Command::CreateUser {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let user = repo
                .create(CreateUser {
                    email,
                    password,
                    first_name,
                    last_name,
                    role,
                })
                .await?;
            println!("{}", user.id);
        }
        Command::SetPassword { email, password } => {
            let user = repo.get_by_email(&email).await?;
            repo.update(
                user.id,
                UpdateUser {
                    password: Some(password),
                    ..Default::default()
                },
            )
            .await?;
            println!("password updated for {}", user.id);
        }
        Command::Verify { email, password } => {
            if !repo.verify_credential(&email, &password).await? {
                bail!("password does not match");
            }
            println!("ok");
        }
        Command::ListUsers { offset, limit } => {
            let page = repo.list(Pagination { offset, limit }).await?;
            for user in &page.items {
                print_user(user.id, &user.email, user.role, &user.first_name, &user.last_name);
            }
            println!("{} of {} accounts", page.items.len(), page.total);
        }
    }

    Ok(())
}

fn print_user(id: Uuid, email: &str, role: UserRole, first_name: &str, last_name: &str) {
    println!("{id}\t{email}\t{role}\t{first_name} {last_name}");
}
