//! Core types for the command catalog

pub mod command;
pub mod query;
pub mod response;

pub use command::{CommandRecord, ParsedCommand};
pub use query::ListQuery;
pub use response::{
    CategoryListResponse, CommandDetail, CommandListResponse, CommandSummary, IngestResponse,
};
