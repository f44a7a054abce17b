//! Chemical formula rendering.
//!
//! Grid cells display sum formulas (`C3H7NO2`) in their bottom-left quadrant.
//! The [`FormulaFormatter`] trait is the seam the renderer calls through;
//! [`UnicodeFormula`] is the default implementation, which validates element
//! symbols and turns counts, charges and adduct separators into unicode.

mod elements;
mod unicode;

pub use elements::is_element_symbol;
pub use unicode::UnicodeFormula;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FormulaError {
    #[error("Unknown element symbol '{symbol}' in formula '{formula}'")]
    UnknownElement { symbol: String, formula: String },

    #[error("Unbalanced bracket in formula '{0}'")]
    UnbalancedBracket(String),

    #[error("Unexpected character '{character}' in formula '{formula}'")]
    InvalidCharacter { character: char, formula: String },

    #[error("Malformed charge '{charge}' in formula '{formula}'")]
    InvalidCharge { charge: String, formula: String },
}

/// Converts a single chemical formula token into display text.
pub trait FormulaFormatter {
    fn to_unicode(&self, formula: &str) -> Result<String, FormulaError>;
}
