use crate::cli::CheckArgs;
use crate::error::Result;
use crate::source::TableSource;
use gridchart::core::models::grid::GridConfig;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    let config = GridConfig::load(&args.config)?;
    let table = TableSource::from_args(&args.source)?.load()?;

    config.validate(&table)?;
    info!("Configuration {:?} matches the data table", args.config);
    println!(
        "OK: {} cell(s) and {} merged cell(s) on a {}x{} grid, {} data row(s)",
        config.cells.len(),
        config.merged_cells.len(),
        config.n_rows,
        config.n_cols,
        table.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TableSourceArgs;
    use crate::error::CliError;
    use gridchart::core::models::grid::SchemaError;
    use std::fs;

    fn args(dir: &std::path::Path, yaml: &str) -> CheckArgs {
        let config = dir.join("grid.yaml");
        let csv = dir.join("data.csv");
        fs::write(&config, yaml).unwrap();
        fs::write(&csv, "id,name,formula\n1,Gly,C2H5NO2\n").unwrap();
        CheckArgs {
            config,
            source: TableSourceArgs {
                database: None,
                query: None,
                csv: Some(csv),
            },
        }
    }

    #[test]
    fn matching_configuration_passes() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = "cells:\n  - index: 1\n    id: 1\n    tl: name\n    bl: formula\n";
        assert!(run(args(dir.path(), yaml)).is_ok());
    }

    #[test]
    fn unknown_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = "cells:\n  - index: 1\n    id: 1\n    tr: codons\n";
        let err = run(args(dir.path(), yaml)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Schema(SchemaError::MissingCellColumn { index: 1, .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path(), "cells:\n  - id: 1\n")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
