use std::collections::BTreeMap;

use crate::{
    error::Result,
    sql::{
        executor::ResultSet,
        predicate::Predicate,
        types::{Row, Value},
    },
    storage::Storage,
};

use super::Executor;

/// INSERT executor
pub struct Insert {
    table: String,
    row: Row,
}

impl Insert {
    pub fn new(table: String, row: Row) -> Box<Self> {
        Box::new(Self { table, row })
    }
}

impl Executor for Insert {
    fn execute(self: Box<Self>, storage: &Storage) -> Result<ResultSet> {
        tracing::debug!("insert row into {}: {:?}", self.table, self.row);
        storage.insert(&self.table, self.row)?;
        Ok(ResultSet::Insert)
    }
}

/// UPDATE executor
pub struct Update {
    table: String,
    assignments: BTreeMap<String, Value>,
    predicate: Predicate,
}

impl Update {
    pub fn new(
        table: String,
        assignments: BTreeMap<String, Value>,
        predicate: Predicate,
    ) -> Box<Self> {
        Box::new(Self {
            table,
            assignments,
            predicate,
        })
    }
}

impl Executor for Update {
    fn execute(self: Box<Self>, storage: &Storage) -> Result<ResultSet> {
        let table = storage.get_table(&self.table)?;
        let count = table.update(&self.assignments, self.predicate)?;
        Ok(ResultSet::Update { count })
    }
}
