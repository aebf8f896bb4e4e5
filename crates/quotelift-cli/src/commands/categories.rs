use quotelift_core::source::{CATEGORIES, FEATURED_CATEGORIES};

use crate::error::CliError;

#[allow(clippy::unnecessary_wraps)]
pub fn run_categories() -> Result<(), CliError> {
    println!("Featured: {}", FEATURED_CATEGORIES.join(", "));
    for category in CATEGORIES {
        println!("{category}");
    }
    Ok(())
}
