//! Provides input/output functionality for grid layouts and tabular data.
//!
//! Layout files are YAML, tables come from SQLite statements or CSV files,
//! and query results can be written back out as text tables.

pub mod config;
pub mod csv;
pub mod sqlite;
pub mod table_format;
