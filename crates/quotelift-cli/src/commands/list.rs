use crate::commands::common::{
    format_quote_lines, open_favorites, quote_to_list_item, CliContext, QuoteListItem,
};
use crate::error::CliError;

pub async fn run_list(tag: Option<&str>, as_json: bool, ctx: &CliContext) -> Result<(), CliError> {
    let manager = open_favorites(ctx).await?;
    let quotes = manager.displayed(tag);

    if as_json {
        let json_items = quotes
            .iter()
            .map(quote_to_list_item)
            .collect::<Vec<QuoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_quote_lines(&quotes) {
            println!("{line}");
        }
    }

    Ok(())
}
