use quotelift_core::source::{QuoteSlateClient, QuoteSource};

use crate::commands::common::{format_quote, open_favorites, CliContext};
use crate::error::CliError;

pub async fn run_quote(
    category: Option<&str>,
    save: bool,
    ctx: &CliContext,
) -> Result<(), CliError> {
    let source = QuoteSlateClient::new(&ctx.config.quote_api_url)?;
    let quote = source.fetch(category).await?;
    println!("{}", format_quote(&quote));

    if save {
        let mut manager = open_favorites(ctx).await?;
        let outcome = manager.save(quote.to_new_quote()?).await;
        if outcome.acknowledgment().is_some() {
            println!("Saved!");
        } else {
            println!("Already saved ({})", outcome.quote.id);
        }
    }

    Ok(())
}
