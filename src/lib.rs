pub mod error;

pub mod catalog;
pub mod config;
pub mod filter;
pub mod sql;
