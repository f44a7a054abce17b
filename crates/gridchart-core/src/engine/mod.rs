//! # Engine Module
//!
//! Turns a grid configuration and a data table into a drawn [`diagram::Diagram`].
//!
//! ## Architecture
//!
//! - **Layout** ([`layout`]) - Cell index to grid coordinate arithmetic
//! - **Labels** ([`labels`]) - Quadrant text formatting and merged-cell prefixes
//! - **Cells** ([`cells`]) - Resolution of indexed and merged cells against table rows
//! - **Diagram** ([`diagram`]) - The shape list and its SVG serialization
//! - **Error Handling** ([`error`]) - Rendering failures

pub mod cells;
pub mod diagram;
pub mod error;
pub mod labels;
pub mod layout;
