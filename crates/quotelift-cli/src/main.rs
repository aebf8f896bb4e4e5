//! QuoteLift CLI - random quotes and saved favorites from the terminal

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::categories::run_categories;
use crate::commands::common::CliContext;
use crate::commands::completions::run_completions;
use crate::commands::list::run_list;
use crate::commands::pin::run_pin;
use crate::commands::quote::run_quote;
use crate::commands::remove::run_remove;
use crate::commands::save::run_save;
use crate::commands::tags::run_tags;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let directive = "quotelift=warn"
        .parse()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        command,
        api_url,
        data_dir,
    } = Cli::parse();
    let context = || CliContext::resolve(api_url.clone(), data_dir.clone());

    match command {
        Commands::Quote { category, save } => {
            run_quote(category.as_deref(), save, &context()?).await
        }
        Commands::Save {
            content,
            author,
            tags,
        } => run_save(&content, &author, tags, &context()?).await,
        Commands::List { tag, json } => run_list(tag.as_deref(), json, &context()?).await,
        Commands::Remove { id } => run_remove(&id, &context()?).await,
        Commands::Pin { id } => run_pin(&id, &context()?).await,
        Commands::Tags { json } => run_tags(json, &context()?).await,
        Commands::Categories => run_categories(),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}
