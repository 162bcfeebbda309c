use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, RwLock},
};

use crate::{
    error::{Error, Result},
    sql::types::{Row, Value},
    storage::table::Table,
};

/// In-memory table directory
///
/// The name → table map sits behind its own lock, so concurrent table
/// creation and lookups are serialized. Lookups hand out an `Arc<Table>` and
/// release the directory lock before any table operation runs.
#[derive(Default)]
pub struct Storage {
    tables: RwLock<HashMap<String, Arc<Table>>>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table, failing if the name is taken
    pub fn create_table(&self, name: &str) -> Result<Arc<Table>> {
        let mut tables = self.tables.write()?;
        if tables.contains_key(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        let table = Arc::new(Table::new(name));
        tables.insert(name.to_string(), table.clone());
        tracing::info!("created table {}", name);
        Ok(table)
    }

    /// Looks up a table by name
    pub fn get_table(&self, name: &str) -> Result<Arc<Table>> {
        self.tables
            .read()?
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("table {}", name)))
    }

    /// Sorted names of every table
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut names = self.tables.read()?.keys().cloned().collect::<Vec<_>>();
        names.sort();
        Ok(names)
    }

    pub fn insert(&self, table: &str, row: Row) -> Result<()> {
        self.get_table(table)?.insert(row)
    }

    pub fn query(&self, table: &str, predicate: impl Fn(&Row) -> bool) -> Result<Vec<Row>> {
        self.get_table(table)?.query(predicate)
    }

    pub fn update(
        &self,
        table: &str,
        assignments: &BTreeMap<String, Value>,
        predicate: impl Fn(&Row) -> bool,
    ) -> Result<usize> {
        self.get_table(table)?.update(assignments, predicate)
    }

    pub fn delete(&self, table: &str, index: usize) -> Result<()> {
        self.get_table(table)?.delete(index)
    }
}
