//! In-memory row storage
//!
//! - `table`: a named, lock-guarded sequence of rows
//! - `memory`: the table directory

pub mod memory;
pub mod table;

pub use memory::Storage;
pub use table::Table;
