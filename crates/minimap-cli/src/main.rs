use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use minimap_core::AppConfig;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "minimap")]
#[command(author, version, about = "A terminal code viewer with a scroll-synchronized minimap")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File to view (shorthand for `view <FILE>`)
    file: Option<PathBuf>,

    /// Use this config file instead of ~/.config/minimap/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a file in the viewer
    View {
        /// File to view
        file: PathBuf,
        /// Override the minimum slider height (minimap dot rows)
        #[arg(long)]
        min_slider_height: Option<f64>,
        /// Do not reload the file when it changes on disk
        #[arg(long)]
        no_watch: bool,
    },
    /// Run the minimap geometry for the given measurements and print JSON
    Geometry(commands::geometry::GeometryArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config_path, mut config) = match &cli.config {
        Some(path) => (path.clone(), AppConfig::load_from(path)?),
        None => (AppConfig::config_path(), AppConfig::load()?),
    };

    match cli.command {
        Some(Commands::View {
            file,
            min_slider_height,
            no_watch,
        }) => {
            if let Some(min) = min_slider_height {
                config.minimap.min_slider_height = min;
                config.validate()?;
            }
            let _guard = logging::init_file(&config)?;
            commands::view::run(config, file, !no_watch).await
        }
        Some(Commands::Geometry(args)) => {
            logging::init_stderr(&config);
            commands::geometry::run(&config, &args)
        }
        Some(Commands::Config { action }) => {
            logging::init_stderr(&config);
            match action {
                ConfigAction::Show => commands::config::show(&config),
                ConfigAction::Init { force } => commands::config::init(&config_path, force),
                ConfigAction::Path => commands::config::path(&config_path),
            }
        }
        None => match cli.file {
            Some(file) => {
                let _guard = logging::init_file(&config)?;
                commands::view::run(config, file, true).await
            }
            None => {
                use clap::CommandFactory;
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}
