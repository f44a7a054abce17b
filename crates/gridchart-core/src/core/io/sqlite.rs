use crate::core::models::table::{Table, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Executor, Row, Statement, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A SQLite database file opened read-only, one connection per statement.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `statement` on a fresh connection and collects the full result.
    ///
    /// The connection is closed before returning, also when the statement fails.
    pub async fn fetch(&self, statement: &str) -> Result<Table, sqlx::Error> {
        debug!("Opening {:?} for statement: {}", self.path, statement);
        let mut conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .connect()
            .await?;

        let result = run_statement(&mut conn, statement).await;
        let closed = conn.close().await;
        let table = result?;
        closed?;

        debug!(
            "Statement returned {} row(s) x {} column(s)",
            table.len(),
            table.columns().len()
        );
        Ok(table)
    }
}

async fn run_statement(conn: &mut SqliteConnection, statement: &str) -> Result<Table, sqlx::Error> {
    let prepared = (&mut *conn).prepare(statement).await?;
    let columns: Vec<String> = prepared
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let rows = sqlx::query(statement).fetch_all(&mut *conn).await?;
    let mut table = Table::new(columns);
    for row in &rows {
        let values = (0..row.len())
            .map(|i| decode_value(row, i))
            .collect::<Result<Vec<_>, _>>()?;
        table
            .push_row(values)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    }
    Ok(table)
}

fn decode_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage = raw.type_info().name().to_ascii_uppercase();
    trace!("Column {} decoded as {}", index, storage);

    let value = match storage.as_str() {
        "INTEGER" | "INT4" | "INT8" | "BIGINT" | "BOOLEAN" => {
            Value::Integer(row.try_get_unchecked::<i64, _>(index)?)
        }
        "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => Value::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => Value::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => Value::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}
