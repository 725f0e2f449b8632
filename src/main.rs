use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use aniflux::commands::{
    self,
    config::{Config, ConfigOverrides},
    services::Services,
};
use aniflux::runtime::RealRuntime;

/// aniflux - live release data for the AniFlux landing page
///
/// Shows the latest AniFlux release and star count, keeps them cached,
/// and downloads the Android package.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This raises the API rate limit above 60 requests per hour.
///
/// Examples:
///   aniflux status            # Cached view, refreshed once
///   aniflux watch             # Keep refreshing every 5 minutes
///   aniflux download          # Save the latest APK
#[derive(Parser, Debug)]
#[command(author, version = env!("ANIFLUX_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Repository in the format "owner/repo"
    #[arg(long, env = "ANIFLUX_REPO", value_name = "OWNER/REPO", global = true)]
    repo: Option<String>,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, env = "ANIFLUX_CACHE_DIR", value_name = "PATH", global = true)]
    cache_dir: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,

    /// GitHub web URL used for release pages (defaults to https://github.com)
    #[arg(long = "web-url", value_name = "URL", global = true)]
    web_url: Option<String>,

    /// File extension of the distributable package
    #[arg(long, value_name = "EXT", global = true)]
    extension: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the cached release and star count, refreshed once
    Status,

    /// Keep the release and star count fresh, printing every change
    Watch(WatchArgs),

    /// Download the latest package, or open the releases page if none is known
    Download(DownloadArgs),

    /// Inspect or clear the cached slots
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(clap::Args, Debug)]
struct WatchArgs {
    /// Polling interval in seconds
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: u64,

    /// Exit after this many updates
    #[arg(long, value_name = "N")]
    count: Option<usize>,
}

#[derive(clap::Args, Debug)]
struct DownloadArgs {
    /// Directory to save the package in (defaults to the download folder)
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Print the fallback page instead of opening a browser
    #[arg(long)]
    no_browser: bool,

    /// Which button to press
    #[arg(long, value_enum, default_value_t = Button::Section)]
    from: Button,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Button {
    Navbar,
    Section,
}

impl From<Button> for commands::Source {
    fn from(button: Button) -> Self {
        match button {
            Button::Navbar => commands::Source::Navbar,
            Button::Section => commands::Source::Section,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum CacheCommands {
    /// Print the cached slots
    Show,
    /// Remove the cached slots
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        api_url: cli.api_url,
        web_url: cli.web_url,
        repo: cli.repo,
        cache_dir: cli.cache_dir,
        extension: cli.extension,
    };
    let config = Config::load(&RealRuntime, overrides)?;
    let services = Services::from_config(RealRuntime, config)?;

    match cli.command {
        Commands::Status => commands::status(&services).await?,
        Commands::Watch(args) => {
            commands::watch(
                &services,
                Duration::from_secs(args.interval_secs),
                args.count,
            )
            .await?
        }
        Commands::Download(args) => {
            let navigator =
                commands::system_navigator(RealRuntime, &services, args.dir, args.no_browser)?;
            let outcome = commands::download(&services, navigator, args.from.into()).await?;
            commands::print_outcome(&outcome, args.no_browser);
        }
        Commands::Cache(CacheCommands::Show) => commands::cache::show(&services)?,
        Commands::Cache(CacheCommands::Clear) => commands::cache::clear(&services)?,
    }
    Ok(())
}
