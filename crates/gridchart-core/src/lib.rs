//! # gridchart
//!
//! Notebook helpers for tabular chemistry data: read-only SQLite queries
//! rendered as text tables, and periodic-table-like grid diagrams drawn from a
//! YAML layout plus a data table, with chemical formulas set in unicode.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Table and grid configuration models, the
//!   chemical formula formatter, and I/O for YAML, CSV and SQLite.
//!
//! - **[`engine`]: The Drawing Logic.** Coordinate layout, label formatting,
//!   cell resolution and the SVG-serializable [`engine::diagram::Diagram`].
//!
//! - **[`workflows`]: The Public API.** [`workflows::query::QueryTable`] for
//!   database access and [`workflows::grid`] for rendering grids.

pub mod core;
pub mod engine;
pub mod workflows;
