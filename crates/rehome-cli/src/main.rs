use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use rehome_cli::cli::CliConfig;
use rehome_core::{
    ChatRuntime, ConversationStatus, DirectoryFilter, StaticIdentity,
};

#[derive(Parser)]
#[command(name = "rehome-cli")]
#[command(about = "CLI for the rehome conversation core")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Path to JSON config file (apiBase, authToken, viewer)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the viewer's conversations, newest activity first
    List {
        /// Filter by participant or pet name
        #[arg(long)]
        query: Option<String>,
        /// Filter by status: active or closed
        #[arg(long)]
        status: Option<String>,
    },

    /// Open a conversation: print its thread and pet context
    Open {
        conversation_id: String,
    },

    /// Send a message to a conversation
    Send {
        conversation_id: String,
        text: String,
    },

    /// Poll the directory and print it whenever it changes
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 10)]
        interval: u64,
    },
}

fn directory_rows(runtime: &ChatRuntime, filter: &DirectoryFilter) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = runtime
        .filtered_conversations(filter)
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "petName": c.pet_name,
                "participants": c.participant_labels(),
                "status": c.status,
                "preview": c.preview(),
                "lastMessageAt": c.last_message_at,
                "unread": runtime.unread_badge(&c.id),
            })
        })
        .collect();
    json!(rows)
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

fn parse_status(status: &str) -> Result<ConversationStatus> {
    match status {
        "active" => Ok(ConversationStatus::Active),
        "closed" => Ok(ConversationStatus::Closed),
        other => bail!("unknown status '{other}', expected 'active' or 'closed'"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => CliConfig::default_path()
            .context("Could not determine the default config directory")?,
    };
    let config = CliConfig::load(&config_path)?;

    let identity = Rc::new(StaticIdentity::new(config.viewer.to_viewer()));
    let runtime = ChatRuntime::new(
        &config.to_core_config(),
        identity,
        config.can_create_messages,
    )?;
    runtime.refresh_directory().await?;

    match cli.command {
        Commands::List { query, status } => {
            let filter = DirectoryFilter {
                query,
                status: status.as_deref().map(parse_status).transpose()?,
            };
            print_json(&directory_rows(&runtime, &filter), cli.pretty)?;
        }

        Commands::Open { conversation_id } => {
            runtime.open_conversation(&conversation_id).await?;
            let thread = runtime
                .current_thread()
                .context("Thread did not load")?;
            print_json(
                &json!({
                    "conversationId": thread.conversation_id,
                    "pet": thread.pet,
                    "messages": thread.messages,
                }),
                cli.pretty,
            )?;
        }

        Commands::Send {
            conversation_id,
            text,
        } => {
            runtime.set_draft(&conversation_id, text);
            let message = runtime.send_message(&conversation_id).await?;
            print_json(&serde_json::to_value(&message)?, cli.pretty)?;
        }

        Commands::Watch { interval } => {
            let filter = DirectoryFilter::default();
            let mut last = serde_json::Value::Null;
            loop {
                let rows = directory_rows(&runtime, &filter);
                if rows != last {
                    print_json(&rows, cli.pretty)?;
                    last = rows;
                }
                tokio::time::sleep(Duration::from_secs(interval)).await;
                runtime.refresh_directory().await?;
            }
        }
    }

    Ok(())
}
