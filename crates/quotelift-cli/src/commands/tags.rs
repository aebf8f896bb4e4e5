use crate::commands::common::{open_favorites, CliContext, TagCountItem};
use crate::error::CliError;

pub async fn run_tags(as_json: bool, ctx: &CliContext) -> Result<(), CliError> {
    let manager = open_favorites(ctx).await?;
    let counts = manager.tag_counts();

    if as_json {
        let json_items = counts
            .into_iter()
            .map(|(tag, count)| TagCountItem { tag, count })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for (tag, count) in counts {
            println!("#{tag:<20} {count}");
        }
    }

    Ok(())
}
