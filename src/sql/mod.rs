//! Query processing module
//!
//! This module provides:
//! - `parser`: tokenizer, parser and AST
//! - `predicate`: WHERE-clause compiler
//! - `types`: runtime values and rows
//! - `executor`: statement execution against storage
//! - `engine`: query sessions

pub mod parser;
pub mod predicate;
pub mod types;
pub mod executor;
pub mod engine;
