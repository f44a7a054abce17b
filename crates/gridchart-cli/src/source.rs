use crate::cli::TableSourceArgs;
use crate::error::{CliError, Result};
use gridchart::core::models::table::Table;
use gridchart::workflows::query::QueryTable;
use std::path::PathBuf;
use tracing::info;

/// A resolved data-table source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Database { path: PathBuf, statement: String },
    Csv(PathBuf),
}

impl TableSource {
    pub fn from_args(args: &TableSourceArgs) -> Result<Self> {
        match (&args.database, &args.query, &args.csv) {
            (Some(path), Some(statement), None) => Ok(TableSource::Database {
                path: path.clone(),
                statement: statement.clone(),
            }),
            (None, None, Some(path)) => Ok(TableSource::Csv(path.clone())),
            _ => Err(CliError::Argument(
                "provide either --database with --query, or --csv".to_string(),
            )),
        }
    }

    pub fn load(&self) -> Result<Table> {
        let table = match self {
            TableSource::Database { path, statement } => {
                info!("Loading data table from database {:?}", path);
                QueryTable::new(path.clone())?.fetch(statement)?
            }
            TableSource::Csv(path) => {
                info!("Loading data table from CSV {:?}", path);
                Table::load_csv(path)?
            }
        };
        info!(
            "Data table has {} row(s) and {} column(s)",
            table.len(),
            table.columns().len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(database: Option<&str>, query: Option<&str>, csv: Option<&str>) -> TableSourceArgs {
        TableSourceArgs {
            database: database.map(PathBuf::from),
            query: query.map(str::to_string),
            csv: csv.map(PathBuf::from),
        }
    }

    #[test]
    fn from_args_accepts_exactly_one_complete_source() {
        assert_eq!(
            TableSource::from_args(&args(Some("a.db"), Some("SELECT 1"), None)).unwrap(),
            TableSource::Database {
                path: "a.db".into(),
                statement: "SELECT 1".into()
            }
        );
        assert_eq!(
            TableSource::from_args(&args(None, None, Some("t.csv"))).unwrap(),
            TableSource::Csv("t.csv".into())
        );
        assert!(matches!(
            TableSource::from_args(&args(None, None, None)),
            Err(CliError::Argument(_))
        ));
        assert!(matches!(
            TableSource::from_args(&args(Some("a.db"), None, None)),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn load_reads_csv_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("residues.csv");
        std::fs::write(&path, "id,name\n1,Gly\n2,Ala\n").unwrap();
        let table = TableSource::Csv(path).load().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["id", "name"]);
    }

    #[test]
    fn load_reports_a_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let source = TableSource::Database {
            path: dir.path().join("absent.db"),
            statement: "SELECT 1".into(),
        };
        assert!(matches!(source.load(), Err(CliError::Query(_))));
    }
}
