//! antora-assist CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use antora_lsp_core::Family;

mod commands;

#[derive(Parser)]
#[command(name = "antora-assist")]
#[command(version)]
#[command(about = "Antora-aware AsciiDoc assistance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the language server over stdio
    Lsp,

    /// Print the antora.yml that applies to a document
    Locate {
        /// AsciiDoc document
        document: PathBuf,

        /// Workspace folder to search (defaults to the current directory)
        #[arg(short = 'w', long = "workspace")]
        workspaces: Vec<PathBuf>,
    },

    /// Print the resource identity of a document within its site
    Src {
        /// AsciiDoc document
        document: PathBuf,

        /// Workspace folder to search (defaults to the current directory)
        #[arg(short = 'w', long = "workspace")]
        workspaces: Vec<PathBuf>,
    },

    /// Resolve a resource id relative to a document
    Resolve {
        /// AsciiDoc document the id is written in
        document: PathBuf,

        /// Resource id, e.g. `2.0@guide:admin:install.adoc`
        id: String,

        /// Family used when the id doesn't name one
        #[arg(short, long, default_value = "page")]
        family: Family,

        /// Workspace folder to search (defaults to the current directory)
        #[arg(short = 'w', long = "workspace")]
        workspaces: Vec<PathBuf>,
    },

    /// List the AsciiDoc attributes declared in a document's antora.yml
    Attributes {
        /// AsciiDoc document
        document: PathBuf,

        /// Workspace folder to search (defaults to the current directory)
        #[arg(short = 'w', long = "workspace")]
        workspaces: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging. stdout belongs to JSON-RPC in `lsp` mode.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "antora_assist=info,antora_lsp=info,antora_lsp_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lsp => commands::lsp::execute(),
        Commands::Locate {
            document,
            workspaces,
        } => commands::locate::execute(commands::SiteArgs::new(document, workspaces)?),
        Commands::Src {
            document,
            workspaces,
        } => commands::src::execute(commands::SiteArgs::new(document, workspaces)?),
        Commands::Resolve {
            document,
            id,
            family,
            workspaces,
        } => {
            let site = commands::SiteArgs::new(document, workspaces)?;
            commands::resolve::execute(site, &id, family)
        }
        Commands::Attributes {
            document,
            workspaces,
        } => commands::attributes::execute(commands::SiteArgs::new(document, workspaces)?),
    }
}
