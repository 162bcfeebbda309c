use std::{collections::BTreeMap, fmt::Display};

/// Abstract Syntax Tree (AST) node definitions for query statements
///
/// Literal values are kept in lexeme form (`'Alice'`, `30`); resolving them to
/// typed values is left to the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement
    Select {
        table: String,
        /// Projected columns, `["*"]` for all of them
        columns: Vec<String>,
        /// Raw WHERE fragment, compiled at execution time
        where_clause: Option<String>,
    },
    /// INSERT statement
    Insert {
        table: String,
        columns: Vec<String>,
        values: Vec<String>,
    },
    /// UPDATE statement
    Update {
        table: String,
        /// Column name to lexeme value
        assignments: BTreeMap<String, String>,
        where_clause: Option<String>,
    },
}

impl Statement {
    /// Name of the table the statement targets
    pub fn table(&self) -> &str {
        match self {
            Statement::Select { table, .. }
            | Statement::Insert { table, .. }
            | Statement::Update { table, .. } => table,
        }
    }

    /// Statement keyword, used as error context by the executor
    pub fn operation(&self) -> &'static str {
        match self {
            Statement::Select { .. } => "SELECT",
            Statement::Insert { .. } => "INSERT",
            Statement::Update { .. } => "UPDATE",
        }
    }
}

/// Renders the statement back as canonical query text
impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Select {
                table,
                columns,
                where_clause,
            } => {
                write!(f, "SELECT {} FROM {}", columns.join(", "), table)?;
                if let Some(condition) = where_clause {
                    write!(f, " WHERE {}", condition)?;
                }
                Ok(())
            }
            Statement::Insert {
                table,
                columns,
                values,
            } => write!(
                f,
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                columns.join(", "),
                values.join(", ")
            ),
            Statement::Update {
                table,
                assignments,
                where_clause,
            } => {
                let sets = assignments
                    .iter()
                    .map(|(col, val)| format!("{} = {}", col, val))
                    .collect::<Vec<_>>();
                write!(f, "UPDATE {} SET {}", table, sets.join(", "))?;
                if let Some(condition) = where_clause {
                    write!(f, " WHERE {}", condition)?;
                }
                Ok(())
            }
        }
    }
}
