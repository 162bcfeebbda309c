use serde::Serialize;

use crate::{
    config::Config,
    error::{Error, Result},
    sql::{
        executor::{
            mutation::{Insert, Update},
            query::Select,
        },
        parser::ast::Statement,
        predicate,
        types::{Row, Value},
    },
    storage::Storage,
};

mod mutation;
mod query;

/// Statement executor
pub trait Executor {
    fn execute(self: Box<Self>, storage: &Storage) -> Result<ResultSet>;
}

impl dyn Executor {
    /// Builds an executor from a statement
    ///
    /// WHERE fragments are compiled here, so a malformed condition fails
    /// before any storage call is made.
    pub fn build(stmt: Statement, config: &Config) -> Result<Box<dyn Executor>> {
        Ok(match stmt {
            Statement::Insert {
                table,
                columns,
                values,
            } => Insert::new(
                table,
                columns
                    .into_iter()
                    .zip(values)
                    .map(|(col, val)| (col, resolve_literal(val, config)))
                    .collect(),
            ),
            Statement::Select {
                table,
                columns,
                where_clause,
            } => Select::new(
                table,
                columns,
                predicate::compile_optional(where_clause.as_deref(), config)?,
            ),
            Statement::Update {
                table,
                assignments,
                where_clause,
            } => Update::new(
                table,
                assignments
                    .into_iter()
                    .map(|(col, val)| (col, resolve_literal(val, config)))
                    .collect(),
                predicate::compile_optional(where_clause.as_deref(), config)?,
            ),
        })
    }
}

/// Executes one statement against the storage
///
/// Compile errors come back as they are; storage errors are wrapped with the
/// statement keyword (see [`Error::root_cause`]).
pub fn execute(stmt: Statement, storage: &Storage, config: &Config) -> Result<ResultSet> {
    tracing::debug!("executing {}", stmt);
    let operation = stmt.operation();
    <dyn Executor>::build(stmt, config)?
        .execute(storage)
        .map_err(|err| Error::execution(operation, err))
}

/// Lexeme to stored value: kept as text unless literal coercion is enabled
fn resolve_literal(lexeme: String, config: &Config) -> Value {
    if config.coerce_literals {
        Value::from_literal(&lexeme)
    } else {
        Value::String(lexeme)
    }
}

/// Execution result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResultSet {
    /// INSERT carries no data
    Insert,
    Select { columns: Vec<String>, rows: Vec<Row> },
    Update { count: usize },
}
