mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "astroform")]
#[command(about = "Declarative Astronomer resources, one operation at a time", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings; each falls back to its environment variable and then
/// the settings file
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// API token (ASTRONOMER_API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,
    /// Organization id (ASTRONOMER_ORGANIZATION_ID)
    #[arg(long, global = true)]
    pub organization: Option<String>,
    /// API base URL (ASTRONOMER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a resource from a model file and wait for it to settle
    Create {
        kind: Kind,
        /// Model file (JSON), `-` for stdin
        file: PathBuf,
    },
    /// Refresh a held model against the platform
    Read {
        kind: Kind,
        /// Model file (JSON) carrying the resource id, `-` for stdin
        file: PathBuf,
    },
    /// Apply a model carrying the id of an existing resource
    Update {
        kind: Kind,
        /// Model file (JSON), `-` for stdin
        file: PathBuf,
    },
    /// Delete the resource a model refers to
    Delete {
        kind: Kind,
        /// Model file (JSON) carrying the resource id, `-` for stdin
        file: PathBuf,
    },
    /// Adopt an existing resource by id
    Import { kind: Kind, id: String },
    /// Organization lookups
    #[command(subcommand)]
    Org(OrgCommands),
    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum OrgCommands {
    /// Show one organization (default: the configured one)
    Get { id: Option<String> },
    /// List organizations visible to the token
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Cluster,
    Deployment,
    Workspace,
}

/// Lifecycle operation applied to a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the reconciled model, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Version => {
            println!("astroform {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Create { kind, file } => {
            commands::resource::handle(&cli.global, kind, Action::Create, &file).await?;
        }
        Commands::Read { kind, file } => {
            commands::resource::handle(&cli.global, kind, Action::Read, &file).await?;
        }
        Commands::Update { kind, file } => {
            commands::resource::handle(&cli.global, kind, Action::Update, &file).await?;
        }
        Commands::Delete { kind, file } => {
            commands::resource::handle(&cli.global, kind, Action::Delete, &file).await?;
        }
        Commands::Import { kind, id } => {
            commands::resource::handle_import(&cli.global, kind, &id).await?;
        }
        Commands::Org(OrgCommands::Get { id }) => {
            commands::org::handle_get(&cli.global, id.as_deref()).await?;
        }
        Commands::Org(OrgCommands::List) => {
            commands::org::handle_list(&cli.global).await?;
        }
    }

    Ok(())
}
