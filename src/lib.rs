//! tinydb - a minimal in-memory relational store
//!
//! This crate provides:
//! - A query compiler (tokenizer, parser, AST, WHERE-clause predicates)
//! - Lock-guarded in-memory tables and a table directory
//! - An executor running SELECT / INSERT / UPDATE against that storage

pub mod config;
pub mod error;
pub mod sql;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use sql::engine::Session;
pub use sql::executor::ResultSet;
pub use storage::Storage;
