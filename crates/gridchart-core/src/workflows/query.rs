use crate::core::io::sqlite::SqliteSource;
use crate::core::io::table_format::{FormatError, TableStyle, format_table};
use crate::core::models::table::Table;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to start the database runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Expected {expected} header(s) for the result columns, got {found}")]
    HeaderMismatch { expected: usize, found: usize },

    #[error("Failed to format result table: {0}")]
    Format(#[from] FormatError),
}

/// A query result laid out as text, ready for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTable {
    text: String,
    style: TableStyle,
    rows: usize,
}

impl FormattedTable {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// Number of data rows, excluding headers.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

impl fmt::Display for FormattedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Read-only access to one SQLite database file with a blocking API.
///
/// Each call opens its own connection and closes it before returning.
pub struct QueryTable {
    runtime: Runtime,
    source: SqliteSource,
}

impl fmt::Debug for QueryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryTable")
            .field("path", &self.source.path())
            .finish_non_exhaustive()
    }
}

impl QueryTable {
    /// Binds to the database at `path`. The file is not opened until the first query.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, QueryError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(QueryError::Runtime)?;
        Ok(Self {
            runtime,
            source: SqliteSource::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        self.source.path()
    }

    /// Runs `statement` and returns every result row with the statement's column names.
    #[instrument(skip(self), fields(db = ?self.source.path()))]
    pub fn fetch(&self, statement: &str) -> Result<Table, QueryError> {
        let table = self.runtime.block_on(self.source.fetch(statement))?;
        info!("Fetched {} row(s)", table.len());
        Ok(table)
    }

    /// Runs `statement` and formats the result in the default style.
    ///
    /// `headers` replaces the column names and must match the column count.
    pub fn render(&self, statement: &str, headers: Option<&[&str]>) -> Result<FormattedTable, QueryError> {
        self.render_with(statement, headers, TableStyle::default())
    }

    #[instrument(skip(self, headers), fields(db = ?self.source.path()))]
    pub fn render_with(
        &self,
        statement: &str,
        headers: Option<&[&str]>,
        style: TableStyle,
    ) -> Result<FormattedTable, QueryError> {
        let table = self.fetch(statement)?;
        let headers: Vec<String> = match headers {
            Some(custom) if custom.len() != table.columns().len() => {
                return Err(QueryError::HeaderMismatch {
                    expected: table.columns().len(),
                    found: custom.len(),
                });
            }
            Some(custom) => custom.iter().map(|h| h.to_string()).collect(),
            None => table.columns().to_vec(),
        };
        let text = format_table(&table, &headers, style)?;
        Ok(FormattedTable {
            text,
            style,
            rows: table.len(),
        })
    }
}
