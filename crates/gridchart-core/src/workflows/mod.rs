//! # Workflows Module
//!
//! High-level entry points that tie the `core` models and the `engine`
//! together.
//!
//! - **Queries** ([`query`]) - [`query::QueryTable`], blocking read-only SQLite access
//!   with text-table rendering
//! - **Grids** ([`grid`]) - Rendering a grid configuration against a data table,
//!   strictly or best-effort with [`grid::render_or_log`]

pub mod grid;
pub mod query;
