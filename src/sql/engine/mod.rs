use std::sync::Arc;

use crate::{
    config::Config,
    error::Result,
    sql::{
        executor::{self, ResultSet},
        parser,
    },
    storage::Storage,
};

/// Query session: takes query text, returns the executed result
///
/// Sessions are cheap to clone and share one storage handle, so several
/// threads can each run their own session against the same tables.
#[derive(Clone)]
pub struct Session {
    storage: Arc<Storage>,
    config: Config,
}

impl Session {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    /// Executes a single query statement
    pub fn execute(&self, sql: &str) -> Result<ResultSet> {
        let stmt = parser::parse_query(sql)?;
        executor::execute(stmt, &self.storage, &self.config)
    }
}
