use crate::commands::common::{open_favorites, resolve_favorite, CliContext};
use crate::error::CliError;

pub async fn run_pin(id: &str, ctx: &CliContext) -> Result<(), CliError> {
    let mut manager = open_favorites(ctx).await?;
    let quote = resolve_favorite(id, manager.favorites())?;

    let pinned = manager
        .toggle_pin(&quote.id)
        .await
        .ok_or_else(|| CliError::QuoteNotFound(quote.id.to_string()))?;
    let state = if pinned { "pinned" } else { "unpinned" };
    println!("{} {state}", quote.id);
    Ok(())
}
