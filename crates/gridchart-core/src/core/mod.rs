//! # Core Module
//!
//! Stateless building blocks for gridchart: the table and layout models,
//! chemical formula rendering, and file/database I/O.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Typed tables, row identifiers, and the grid layout configuration
//! - **Formula Rendering** ([`formula`]) - Element validation and unicode sum formulas
//! - **Input/Output** ([`io`]) - YAML layout loading, CSV tables, SQLite access, and text-table formatting

pub mod formula;
pub mod io;
pub mod models;
