pub mod categories;
pub mod common;
pub mod completions;
pub mod list;
pub mod pin;
pub mod quote;
pub mod remove;
pub mod save;
pub mod tags;
