use gridchart::core::io::config::ConfigError;
use gridchart::core::io::csv::CsvLoadError;
use gridchart::core::models::grid::SchemaError;
use gridchart::engine::error::RenderError;
use gridchart::workflows::query::QueryError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to load table: {0}")]
    Table(#[from] CsvLoadError),

    #[error("Configuration does not match the data table: {0}")]
    Schema(#[from] SchemaError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
