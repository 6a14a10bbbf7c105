use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fetchzip::commands;

#[derive(Parser)]
#[clap(name = "fetchzip")]
#[clap(about = "Download files with progress and unzip without overwriting")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Show informational log output
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a URL to a file
    Download {
        /// URL to fetch
        url: String,
        /// Destination file (its directory must exist)
        dest: PathBuf,
        /// Replace the destination if it already exists
        #[clap(long)]
        overwrite: bool,
        /// Do not draw the progress bar
        #[clap(short, long)]
        quiet: bool,
    },
    /// Extract a ZIP archive, leaving existing files untouched
    Unzip {
        /// ZIP archive to read
        archive: PathBuf,
        /// Directory to extract into (created if missing)
        dest: PathBuf,
    },
    /// Download a ZIP archive and extract it
    Fetch {
        /// URL of the archive
        url: String,
        /// Directory to extract into (created if missing)
        dest: PathBuf,
        /// Where to keep the downloaded archive (default: DEST/<name from URL>)
        #[clap(long)]
        archive: Option<PathBuf>,
        /// Download again even if the archive is already present
        #[clap(long)]
        overwrite: bool,
        /// Do not draw the progress bar
        #[clap(short, long)]
        quiet: bool,
    },
    /// Show the active configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Download {
            url,
            dest,
            overwrite,
            quiet,
        } => commands::download::download_file(&url, &dest, overwrite, quiet)
            .map_err(|e| anyhow::anyhow!(e)),
        Commands::Unzip { archive, dest } => {
            commands::unzip::unzip_archive(&archive, &dest).map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Fetch {
            url,
            dest,
            archive,
            overwrite,
            quiet,
        } => commands::fetch::fetch_archive(&url, &dest, archive.as_deref(), overwrite, quiet)
            .map_err(|e| anyhow::anyhow!(e)),
        Commands::Config => commands::config::show_config().map_err(|e| anyhow::anyhow!(e)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
