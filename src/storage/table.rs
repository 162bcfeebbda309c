use std::{collections::BTreeMap, sync::Mutex};

use crate::{
    error::{Error, Result},
    sql::types::{Row, Value},
};

/// A named, ordered sequence of rows behind a mutation lock
///
/// Every operation holds the lock for exactly one call, so each call is atomic
/// with respect to other calls on the same table. Nothing spans calls: a query
/// followed by an update may see different rows.
pub struct Table {
    name: String,
    rows: Mutex<Vec<Row>>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a row
    pub fn insert(&self, row: Row) -> Result<()> {
        self.rows.lock()?.push(row);
        Ok(())
    }

    /// Returns copies of the matching rows, in table order
    pub fn query(&self, predicate: impl Fn(&Row) -> bool) -> Result<Vec<Row>> {
        let rows = self.rows.lock()?;
        Ok(rows.iter().filter(|row| predicate(row)).cloned().collect())
    }

    /// Applies the assignments to every matching row and returns how many rows changed
    ///
    /// All matching rows are checked first; if any of them lacks an assigned
    /// column the call fails with `UnknownColumn` and no row is touched.
    pub fn update(
        &self,
        assignments: &BTreeMap<String, Value>,
        predicate: impl Fn(&Row) -> bool,
    ) -> Result<usize> {
        let mut rows = self.rows.lock()?;

        let matched = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(row))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        for &i in &matched {
            if let Some(col) = assignments.keys().find(|col| !rows[i].contains(col)) {
                return Err(Error::UnknownColumn(col.to_string()));
            }
        }

        for &i in &matched {
            for (col, value) in assignments {
                rows[i].set_value(col, value.clone())?;
            }
        }
        tracing::debug!("updated {} rows in table {}", matched.len(), self.name);
        Ok(matched.len())
    }

    /// Removes the row at `index`; later rows shift down by one
    pub fn delete(&self, index: usize) -> Result<()> {
        let mut rows = self.rows.lock()?;
        if index >= rows.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: rows.len(),
            });
        }
        rows.remove(index);
        tracing::debug!("deleted row {} from table {}", index, self.name);
        Ok(())
    }

    /// Snapshot of all rows
    pub fn rows(&self) -> Result<Vec<Row>> {
        Ok(self.rows.lock()?.clone())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.rows.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
