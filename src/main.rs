use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

mod application;
mod domain;
mod infrastructure;

use application::errors::ChatError;
use application::services::ChatService;
use domain::traits::MessageStore;
use infrastructure::completion::HttpCompletion;
use infrastructure::config::Config;
use infrastructure::console::ConsoleFrontend;
use infrastructure::store::{MemoryStore, SqliteStore};

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "A single-conversation terminal chat client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat
    Run {
        /// Keep messages in memory instead of the sqlite file
        #[arg(long)]
        memory: bool,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { memory } => {
            if let Err(e) = run_chat(cli.config, memory) {
                tracing::error!("Failed to start: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("parlor v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_chat(config_path: String, memory: bool) -> Result<(), ChatError> {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!(
        "Starting parlor, conversation '{}'",
        config.chat.conversation
    );

    // Open the message store
    let store: Arc<dyn MessageStore> = if memory {
        tracing::info!("Using in-memory store, messages will not survive exit");
        Arc::new(MemoryStore::new())
    } else {
        let store = SqliteStore::open(&config.store.path)?;
        tracing::info!("Message store ready at {}", config.store.path.display());
        Arc::new(store)
    };

    // Build the completion client
    let completion = Arc::new(HttpCompletion::new(
        &config.completion.endpoint,
        Duration::from_secs(config.completion.timeout_seconds),
    )?);

    let service = Arc::new(ChatService::new(
        store.clone(),
        completion,
        &config.chat.conversation,
        &config.chat.fallback_reply,
    ));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let frontend = ConsoleFrontend::new(store, service, &config.chat.welcome);
        frontend.run().await
    })
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
