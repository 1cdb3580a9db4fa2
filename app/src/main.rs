#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    ChatInput, ChatStrategy, ClassifyInput, ClassifyStrategy, CommandStrategy, DemoStrategy,
    InfoStrategy, InitStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "intentrs")]
#[command(about = "Customer support intent classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify standalone messages
    Classify {
        /// Message to classify (repeatable)
        #[arg(short = 'm', long = "message", required = true)]
        messages: Vec<String>,
    },
    /// Classify messages as turns of one conversation
    Chat {
        /// Message to send (repeatable); reads stdin interactively when omitted
        #[arg(short = 'm', long = "message")]
        messages: Vec<String>,

        /// JSON file to resume the conversation from and save it to
        #[arg(short, long)]
        state: Option<PathBuf>,
    },
    /// Run the sample customer support conversation
    Demo,
    /// Show the effective configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { messages } => {
            ClassifyStrategy.execute(ClassifyInput { messages }).await
        }
        Commands::Chat { messages, state } => {
            ChatStrategy
                .execute(ChatInput {
                    messages,
                    state_path: state,
                })
                .await
        }
        Commands::Demo => DemoStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
