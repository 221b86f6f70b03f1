use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;

use meal_finder::commands::{handle_find, handle_nutrition, handle_setup};
use meal_finder::config::{database_path_from_env, AppConfig};
use meal_finder::database::CacheMode;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Find meals for the ingredients you have", long_about = None)]
struct Args {
    /// Spoonacular API key (defaults to SPOONACULAR_API_KEY)
    #[arg(short, long, global = true)]
    api_key: Option<String>,

    /// SQLite cache file (defaults to MEALS_DB_PATH or meals.db)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Directory the HTML page is written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Keep ingredient names untranslated
    #[arg(long, global = true)]
    no_translate: bool,

    /// Read cached results but never write new ones
    #[arg(long, global = true)]
    read_only_cache: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Search meals and render the summary page
    Find {
        /// Ingredients the meal should use, comma separated
        #[arg(short, long, value_delimiter = ',')]
        include: Vec<String>,

        /// Ingredients the meal must not use, comma separated
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
    /// Create the meal cache table
    Setup,
    /// Show the nutrition widget for one recipe
    Nutrition {
        /// Spoonacular recipe id
        id: i64,
    },
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::from_env(args.api_key.clone())?;

    // Command line flags win over the environment
    if let Some(path) = &args.db_path {
        config.database_path = path.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.no_translate {
        config.translation.enabled = false;
    }
    if args.read_only_cache {
        config.cache_mode = CacheMode::ReadOnly;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let command = args.command.clone().unwrap_or(Command::Find {
        include: Vec::new(),
        exclude: Vec::new(),
    });

    match command {
        // Setup only touches the cache file, so it runs without an API key
        Command::Setup => {
            let path = args.db_path.clone().unwrap_or_else(database_path_from_env);
            handle_setup(&path).await.map_err(anyhow::Error::msg)?;
        }
        Command::Find { include, exclude } => {
            let config = load_config(&args)?;
            handle_find(&config, include, exclude)
                .await
                .map_err(anyhow::Error::msg)?;
        }
        Command::Nutrition { id } => {
            let config = load_config(&args)?;
            handle_nutrition(&config, id).await.map_err(anyhow::Error::msg)?;
        }
    }

    Ok(())
}
