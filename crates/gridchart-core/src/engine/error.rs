use crate::core::formula::FormulaError;
use crate::core::models::grid::SchemaError;
use crate::core::models::table::Key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Configuration does not match the data table: {0}")]
    Schema(#[from] SchemaError),

    #[error("Cell {index}: no row with {column} = {id}")]
    RowNotFound {
        index: u32,
        column: String,
        id: Key,
    },

    #[error("Column '{column}' holds non-numeric value '{value}'")]
    NonNumeric { column: String, value: String },

    #[error("Merged cell at ({row}, {col}) has a zero subdivider")]
    ZeroSubdivider { row: u32, col: u32 },

    #[error("Cell {index}: invalid chemical formula: {source}")]
    Formula {
        index: u32,
        #[source]
        source: FormulaError,
    },
}
