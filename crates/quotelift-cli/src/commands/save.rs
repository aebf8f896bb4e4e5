use quotelift_core::NewQuote;

use crate::commands::common::{open_favorites, resolve_quote_content, CliContext};
use crate::error::CliError;

pub async fn run_save(
    content_parts: &[String],
    author: &str,
    tags: Vec<String>,
    ctx: &CliContext,
) -> Result<(), CliError> {
    let content = resolve_quote_content(content_parts)?;
    let candidate = NewQuote::new(content, author.trim(), tags)?;

    let mut manager = open_favorites(ctx).await?;
    let outcome = manager.save(candidate).await;
    if !outcome.is_created() {
        eprintln!("Already saved");
    }
    println!("{}", outcome.quote.id);
    Ok(())
}
