pub mod aggregate;
pub mod cli;
pub mod counter;
pub mod error;
pub mod extract;
pub mod query;
pub mod reader;
