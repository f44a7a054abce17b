//! # Core Models Module
//!
//! Plain data structures shared by every other layer of gridchart.
//!
//! ## Key Components
//!
//! - [`table`] - Typed result sets ([`table::Table`], [`table::Value`]) produced by
//!   SQLite queries or CSV files, with by-name row access and id lookup
//! - [`grid`] - The grid layout configuration ([`grid::GridConfig`]) with its cell and
//!   merged-cell specifications, plus validation against a table's columns
//!
//! ## Usage
//!
//! ```ignore
//! use gridchart::core::models::grid::{CellSpec, FieldRole, GridConfig};
//! use gridchart::core::models::table::Key;
//!
//! let mut config = GridConfig::default();
//! config.cells.push(CellSpec::new(1, Key::Integer(1)).with_column(FieldRole::TopLeft, "symbol"));
//! config.validate(&table)?;
//! ```

pub mod grid;
pub mod table;
