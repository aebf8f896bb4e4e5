use crate::commands::common::{open_favorites, resolve_favorite, CliContext};
use crate::error::CliError;

pub async fn run_remove(id: &str, ctx: &CliContext) -> Result<(), CliError> {
    let mut manager = open_favorites(ctx).await?;
    let quote = resolve_favorite(id, manager.favorites())?;

    manager.remove(&quote.id).await;
    println!("{}", quote.id);
    Ok(())
}
