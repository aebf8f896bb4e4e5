use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "quotelift")]
#[command(about = "Random quotes to inspire your day, with saved favorites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Favorites backend root, e.g. http://localhost:5050/api/quotes
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory holding the local favorites cache
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a random quote
    #[command(alias = "random")]
    Quote {
        /// Restrict to a category tag (see `quotelift categories`)
        #[arg(short, long)]
        category: Option<String>,
        /// Also save the fetched quote to favorites
        #[arg(long)]
        save: bool,
    },
    /// Save a quote to favorites
    #[command(alias = "add")]
    Save {
        /// Quote content
        content: Vec<String>,
        /// Quote author
        #[arg(short, long)]
        author: String,
        /// Tag to attach (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// List saved favorites, pinned first
    #[command(alias = "ls")]
    List {
        /// Only show favorites carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a saved favorite
    #[command(alias = "rm")]
    Remove {
        /// Quote ID or unique ID prefix
        id: String,
    },
    /// Toggle the pinned flag of a favorite
    Pin {
        /// Quote ID or unique ID prefix
        id: String,
    },
    /// Show tag counts across favorites
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the quote categories offered by the provider
    Categories,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
