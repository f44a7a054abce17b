use crate::core::models::table::{Table, TableError, Value};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CsvLoadError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Malformed table in '{path}': {source}")]
    Shape { path: String, source: TableError },
}

impl Table {
    /// Loads a table from a CSV file with a header row.
    ///
    /// Each cell is typed with [`Value::infer`], so `id` columns written as
    /// plain numbers match integer ids in a grid configuration.
    pub fn load_csv(path: &Path) -> Result<Self, CsvLoadError> {
        debug!("Loading table from CSV file {:?}", path);
        let file = std::fs::File::open(path).map_err(|e| CsvLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e.into(),
        })?;
        Self::read_csv(file, &path.to_string_lossy())
    }

    pub fn read_csv<R: Read>(reader: R, origin: &str) -> Result<Self, CsvLoadError> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers().map_err(|e| CsvLoadError::Csv {
            path: origin.to_string(),
            source: e,
        })?;
        let mut table = Table::new(headers.iter().map(str::to_string).collect());

        for result in reader.records() {
            let record = result.map_err(|e| CsvLoadError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            table
                .push_row(record.iter().map(Value::infer).collect())
                .map_err(|e| CsvLoadError::Shape {
                    path: origin.to_string(),
                    source: e,
                })?;
        }
        debug!("Read {} row(s) from {}", table.len(), origin);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn read_csv_types_cells_and_keeps_column_order() {
        let data = "id,symbol,formula,mass\n1,Gly,C2H5NO2,75.07\n2,Ala,C3H7NO2,\n";
        let table = Table::read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(table.columns(), ["id", "symbol", "formula", "mass"]);
        assert_eq!(table.len(), 2);

        let first = table.row(0).unwrap();
        assert_eq!(first.get("id"), Some(&Value::Integer(1)));
        assert_eq!(first.get("formula"), Some(&Value::Text("C2H5NO2".into())));
        assert_eq!(first.get("mass"), Some(&Value::Real(75.07)));
        assert_eq!(table.row(1).unwrap().get("mass"), Some(&Value::Null));
    }

    #[test]
    fn read_csv_preserves_quoted_lists() {
        let data = "id,codons\n1,\"GGU, GGC, GGA, GGG\"\n";
        let table = Table::read_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(
            table.row(0).unwrap().get("codons"),
            Some(&Value::Text("GGU, GGC, GGA, GGG".into()))
        );
    }

    #[test]
    fn read_csv_fails_for_ragged_rows() {
        let data = "id,symbol\n1,Gly\n2\n";
        let result = Table::read_csv(data.as_bytes(), "inline");
        assert!(matches!(result, Err(CsvLoadError::Csv { .. })));
    }

    #[test]
    fn load_csv_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("amino_acids.csv");
        fs::write(&path, "id,symbol\n1,Gly\n2,Ala\n3,Ser\n").unwrap();
        let table = Table::load_csv(&path).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn load_csv_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Table::load_csv(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(CsvLoadError::Csv { .. })));
    }
}
