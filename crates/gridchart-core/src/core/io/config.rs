use crate::core::models::grid::GridConfig;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parsing error for '{path}': {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
}

impl GridConfig {
    /// Loads a grid layout from a YAML file.
    ///
    /// Optional fields take their documented defaults; a structurally
    /// malformed document (e.g. a cell without `index`) is a load error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading grid configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content).map_err(|e| ConfigError::Yaml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::grid::Quadrant;
    use crate::core::models::table::{Key, Number};
    use std::fs;
    use tempfile::tempdir;

    const AMINO_ACIDS_YAML: &str = r##"
n_rows: 14
n_cols: 10
cells_offset: [2, 1]
cells_display: [tl, bl]
sizes: [20, 12, 10, 16]
groups:
  - family: nonpolar
    color: "#f6d55c"
  - family: polar
    color: "#3caea3"
cells:
  - index: 1
    id: 1
    tl: symbol
    bl: formula
    group: family
  - index: 2
    id: "W"
    value: codons
    valueadd: 1
merged_cells:
  - row: 0
    col: 1
    colspan: 8
    mainids: [1, 2, 3]
    value: codons
    subdivider: 4
    main: " codons"
    sub: " boxes"
    color: lightgrey
"##;

    #[test]
    fn from_yaml_str_reads_every_section() {
        let config = GridConfig::from_yaml_str(AMINO_ACIDS_YAML).unwrap();
        assert_eq!(config.n_rows, 14);
        assert_eq!(config.n_cols, 10);
        assert_eq!(config.cells_offset, (2, 1));
        assert_eq!(
            config.cells_display,
            vec![Quadrant::TopLeft, Quadrant::BottomLeft]
        );
        assert_eq!(config.groups.color_for("polar"), "#3caea3");
        assert_eq!(config.cells.len(), 2);
        assert_eq!(config.cells[0].id, Key::Integer(1));
        assert_eq!(config.cells[0].bl.as_deref(), Some("formula"));
        assert_eq!(config.cells[1].id, Key::Text("W".into()));
        assert_eq!(config.cells[1].valueadd, Number::Integer(1));

        let merged = &config.merged_cells[0];
        assert_eq!((merged.row, merged.col), (0, 1));
        assert_eq!((merged.rowspan, merged.colspan), (1, 8));
        assert_eq!(merged.subdivider, Number::Integer(4));
        assert_eq!(merged.main, " codons");
        assert_eq!(merged.color, "lightgrey");
    }

    #[test]
    fn from_yaml_str_applies_defaults_for_missing_fields() {
        let config = GridConfig::from_yaml_str("cells: []\n").unwrap();
        assert_eq!(config, GridConfig::default());

        let config = GridConfig::from_yaml_str("merged_cells:\n  - row: 3\n    col: 4\n").unwrap();
        let merged = &config.merged_cells[0];
        assert_eq!((merged.rowspan, merged.colspan), (1, 1));
        assert_eq!(merged.subdivider, Number::Integer(1));
        assert_eq!(merged.valueadd, Number::Integer(0));
        assert!(merged.mainids.is_empty());
        assert_eq!(merged.color, "white");
    }

    #[test]
    fn from_yaml_str_accepts_groups_as_a_plain_mapping() {
        let config = GridConfig::from_yaml_str("groups:\n  acidic: red\n  basic: blue\n").unwrap();
        assert_eq!(config.groups.color_for("acidic"), "red");
        assert_eq!(config.groups.color_for("basic"), "blue");
    }

    #[test]
    fn from_yaml_str_fails_for_cells_without_index() {
        let result = GridConfig::from_yaml_str("cells:\n  - id: 1\n    tl: symbol\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_succeeds_with_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.yaml");
        fs::write(&path, AMINO_ACIDS_YAML).unwrap();
        let config = GridConfig::load(&path).unwrap();
        assert_eq!(config.cells.len(), 2);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = GridConfig::load(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "n_rows: [unclosed\n").unwrap();
        let result = GridConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
