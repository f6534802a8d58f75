//! Command-line front end.
//!
//! Activates the extension, performs one provider or command call, prints
//! the result, and deactivates so counters are persisted.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::host::ExtensionHost;
use crate::provider::{DataType, UpdateInstruction, VerseSetData};

#[derive(Parser)]
#[command(name = "quickverse")]
#[command(about = "Read and change cached scripture text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Data types readable by reference.
#[derive(Clone, Copy, ValueEnum)]
pub enum ReadView {
    Verse,
    Heresy,
}

impl From<ReadView> for DataType {
    fn from(view: ReadView) -> Self {
        match view {
            ReadView::Verse => DataType::Verse,
            ReadView::Heresy => DataType::Heresy,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a verse (use "latest" for the most recent one)
    Get {
        /// Data type to read through
        #[arg(value_enum)]
        view: ReadView,

        /// Scripture reference, e.g. "Romans 1:16"
        selector: String,
    },

    /// Read a whole chapter
    Chapter {
        book: String,
        chapter: u32,
    },

    /// Change a verse through the Verse data type
    Set {
        selector: String,
        text: String,

        /// Acknowledge that this changes scripture (required for the write to apply)
        #[arg(long)]
        heresy: bool,
    },

    /// Change a verse through the Heresy data type
    Heresy { selector: String, text: String },

    /// Run the extensionTemplate.doStuff command
    DoStuff { message: String },

    /// Print the effective configuration
    Config,
}

fn describe(instruction: &UpdateInstruction) -> String {
    if instruction.is_update() {
        format!("updated ({instruction})")
    } else {
        "no update".to_string()
    }
}

/// Run the CLI.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if let Commands::Config = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let host = ExtensionHost::activate(&config)?;
    let provider = host.provider();

    match cli.command {
        Commands::Get { view, selector } => {
            if let Some(text) = provider.get(view.into(), &selector.as_str().into()).await? {
                println!("{text}");
            }
        }
        Commands::Chapter { book, chapter } => {
            if let Some(text) = provider.get_chapter(&book, chapter).await? {
                println!("{text}");
            }
        }
        Commands::Set {
            selector,
            text,
            heresy,
        } => {
            let data = if heresy {
                VerseSetData::heresy(text)
            } else {
                VerseSetData::Text(text)
            };
            let instruction = provider.set_verse(&selector, data).await?;
            println!("{}", describe(&instruction));
        }
        Commands::Heresy { selector, text } => {
            let instruction = provider.set_heresy(&selector, &text).await?;
            println!("{}", describe(&instruction));
        }
        Commands::DoStuff { message } => {
            let reply = host.command().handle(&message);
            println!("{}", serde_json::to_string(&reply)?);
        }
        Commands::Config => {}
    }

    host.deactivate().await?;
    Ok(())
}
