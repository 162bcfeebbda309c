use crate::{
    error::Result,
    sql::{executor::ResultSet, predicate::Predicate, types::Row},
    storage::Storage,
};

use super::Executor;

/// SELECT executor: filtered table scan plus projection
pub struct Select {
    table: String,
    columns: Vec<String>,
    predicate: Predicate,
}

impl Select {
    pub fn new(table: String, columns: Vec<String>, predicate: Predicate) -> Box<Self> {
        Box::new(Self {
            table,
            columns,
            predicate,
        })
    }

    fn is_wildcard(&self) -> bool {
        self.columns.len() == 1 && self.columns[0] == "*"
    }
}

impl Executor for Select {
    fn execute(self: Box<Self>, storage: &Storage) -> Result<ResultSet> {
        let table = storage.get_table(&self.table)?;
        let wildcard = self.is_wildcard();
        let rows = table.query(self.predicate)?;

        if wildcard {
            // Rows may carry different column sets; report every name in first-seen order
            let mut columns: Vec<String> = Vec::new();
            for name in rows.iter().flat_map(|row| row.columns()) {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
            return Ok(ResultSet::Select { columns, rows });
        }

        let mut columns: Vec<String> = Vec::new();
        for name in self.columns {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
        let rows = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| Ok((col.as_str(), row.get_value(col)?.clone())))
                    .collect::<Result<Row>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ResultSet::Select { columns, rows })
    }
}
