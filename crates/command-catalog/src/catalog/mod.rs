//! Listing, search and category filtering of stored commands

mod filter;
mod listing;

pub use filter::{filter_commands, matches_search};
pub use listing::CatalogListing;
