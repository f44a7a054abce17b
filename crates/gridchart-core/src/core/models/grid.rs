use super::table::{Key, Number, Table};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_EXTENT: u32 = 12;
pub const DEFAULT_FILL: &str = "white";
pub const DEFAULT_ID_COLUMN: &str = "id";
pub const DEFAULT_SIZES: [f64; 4] = [24.0, 14.0, 11.0, 20.0];

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SchemaError {
    #[error("Grid extent must be positive (got {n_rows} rows x {n_cols} columns)")]
    EmptyExtent { n_rows: u32, n_cols: u32 },

    #[error("Identifier column '{0}' is not present in the data table")]
    MissingIdColumn(String),

    #[error("Cell index must be 1 or greater (got {0})")]
    InvalidIndex(u32),

    #[error("Cell {index}: column '{column}' mapped to '{role}' is not present in the data table")]
    MissingCellColumn {
        index: u32,
        role: FieldRole,
        column: String,
    },

    #[error("Merged cell at ({row}, {col}): value column '{column}' is not present in the data table")]
    MissingMergedColumn { row: u32, col: u32, column: String },
}

/// One of the four label positions inside a 2x2 cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "br")]
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Position of this quadrant in `sizes` and in the label order.
    pub fn slot(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// Offset of the quadrant centre from the cell origin, as `(dx, dy)` in layout units.
    pub fn center_offset(self) -> (f64, f64) {
        match self {
            Quadrant::TopLeft => (0.5, 0.5),
            Quadrant::TopRight => (1.5, 0.5),
            Quadrant::BottomLeft => (0.5, 1.5),
            Quadrant::BottomRight => (1.5, 1.5),
        }
    }
}

/// The data-table fields a cell can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Value,
    Group,
}

impl FieldRole {
    pub const ALL: [FieldRole; 6] = [
        FieldRole::TopLeft,
        FieldRole::TopRight,
        FieldRole::BottomLeft,
        FieldRole::BottomRight,
        FieldRole::Value,
        FieldRole::Group,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldRole::TopLeft => "tl",
            FieldRole::TopRight => "tr",
            FieldRole::BottomLeft => "bl",
            FieldRole::BottomRight => "br",
            FieldRole::Value => "value",
            FieldRole::Group => "group",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl From<Quadrant> for FieldRole {
    fn from(q: Quadrant) -> Self {
        match q {
            Quadrant::TopLeft => FieldRole::TopLeft,
            Quadrant::TopRight => FieldRole::TopRight,
            Quadrant::BottomLeft => FieldRole::BottomLeft,
            Quadrant::BottomRight => FieldRole::BottomRight,
        }
    }
}

#[derive(Deserialize)]
struct GroupEntry {
    #[serde(alias = "group")]
    family: String,
    color: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GroupsRepr {
    Map(BTreeMap<String, String>),
    List(Vec<GroupEntry>),
}

/// Group name to fill colour lookup.
///
/// Accepts both a plain YAML mapping and a list of `{family, color}` entries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "GroupsRepr")]
pub struct GroupColors(HashMap<String, String>);

impl From<GroupsRepr> for GroupColors {
    fn from(repr: GroupsRepr) -> Self {
        match repr {
            GroupsRepr::Map(map) => GroupColors(map.into_iter().collect()),
            GroupsRepr::List(entries) => GroupColors(
                entries
                    .into_iter()
                    .map(|e| (e.family, e.color))
                    .collect(),
            ),
        }
    }
}

impl GroupColors {
    pub fn insert(&mut self, group: impl Into<String>, color: impl Into<String>) {
        self.0.insert(group.into(), color.into());
    }

    /// Fill colour for `group`, falling back to the neutral default.
    pub fn color_for(&self, group: &str) -> &str {
        self.0.get(group).map(String::as_str).unwrap_or(DEFAULT_FILL)
    }
}

/// An indexed 2x2 cell bound to one data-table row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CellSpec {
    pub index: u32,
    pub id: Key,
    #[serde(default)]
    pub tl: Option<String>,
    #[serde(default)]
    pub tr: Option<String>,
    #[serde(default)]
    pub bl: Option<String>,
    #[serde(default)]
    pub br: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub valueadd: Number,
}

impl CellSpec {
    pub fn new(index: u32, id: Key) -> Self {
        Self {
            index,
            id,
            tl: None,
            tr: None,
            bl: None,
            br: None,
            value: None,
            group: None,
            valueadd: Number::default(),
        }
    }

    /// Column name mapped to `role`, if any.
    pub fn column(&self, role: FieldRole) -> Option<&str> {
        let column = match role {
            FieldRole::TopLeft => &self.tl,
            FieldRole::TopRight => &self.tr,
            FieldRole::BottomLeft => &self.bl,
            FieldRole::BottomRight => &self.br,
            FieldRole::Value => &self.value,
            FieldRole::Group => &self.group,
        };
        column.as_deref()
    }

    pub fn with_column(mut self, role: FieldRole, column: impl Into<String>) -> Self {
        let column = Some(column.into());
        match role {
            FieldRole::TopLeft => self.tl = column,
            FieldRole::TopRight => self.tr = column,
            FieldRole::BottomLeft => self.bl = column,
            FieldRole::BottomRight => self.br = column,
            FieldRole::Value => self.value = column,
            FieldRole::Group => self.group = column,
        }
        self
    }
}

fn default_span() -> u32 {
    1
}

fn default_subdivider() -> Number {
    Number::Integer(1)
}

fn default_fill() -> String {
    DEFAULT_FILL.to_string()
}

/// An explicitly placed block that aggregates a value column over several rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MergedCellSpec {
    pub row: u32,
    pub col: u32,
    #[serde(default = "default_span")]
    pub rowspan: u32,
    #[serde(default = "default_span")]
    pub colspan: u32,
    #[serde(default)]
    pub mainids: Vec<Key>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default = "default_subdivider")]
    pub subdivider: Number,
    #[serde(default)]
    pub valueadd: Number,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default = "default_fill")]
    pub color: String,
}

impl MergedCellSpec {
    pub fn new(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            rowspan: 1,
            colspan: 1,
            mainids: Vec::new(),
            value: None,
            subdivider: default_subdivider(),
            valueadd: Number::default(),
            main: String::new(),
            sub: String::new(),
            color: default_fill(),
        }
    }
}

fn default_extent() -> u32 {
    DEFAULT_EXTENT
}

fn default_display() -> Vec<Quadrant> {
    Quadrant::ALL.to_vec()
}

fn default_sizes() -> Vec<f64> {
    DEFAULT_SIZES.to_vec()
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.to_string()
}

/// Layout configuration for a grid diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_extent")]
    pub n_rows: u32,
    #[serde(default = "default_extent")]
    pub n_cols: u32,
    #[serde(default)]
    pub cells_offset: (u32, u32),
    #[serde(default = "default_display")]
    pub cells_display: Vec<Quadrant>,
    #[serde(default)]
    pub groups: GroupColors,
    #[serde(default = "default_sizes")]
    pub sizes: Vec<f64>,
    #[serde(default)]
    pub cells: Vec<CellSpec>,
    #[serde(default)]
    pub merged_cells: Vec<MergedCellSpec>,
    #[serde(default = "default_id_column")]
    pub id_column: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            n_rows: DEFAULT_EXTENT,
            n_cols: DEFAULT_EXTENT,
            cells_offset: (0, 0),
            cells_display: default_display(),
            groups: GroupColors::default(),
            sizes: default_sizes(),
            cells: Vec::new(),
            merged_cells: Vec::new(),
            id_column: default_id_column(),
        }
    }
}

impl GridConfig {
    pub fn displays(&self, quadrant: Quadrant) -> bool {
        self.cells_display.contains(&quadrant)
    }

    /// Font size for a quadrant label; slots beyond the configured list use 12.
    pub fn size_for(&self, quadrant: Quadrant) -> f64 {
        self.sizes.get(quadrant.slot()).copied().unwrap_or(12.0)
    }

    /// Font size of the headline text in merged cells.
    pub fn main_size(&self) -> f64 {
        self.sizes.first().copied().unwrap_or(12.0)
    }

    /// Checks that every column this configuration refers to exists in `table`.
    pub fn validate(&self, table: &Table) -> Result<(), SchemaError> {
        if self.n_rows == 0 || self.n_cols == 0 {
            return Err(SchemaError::EmptyExtent {
                n_rows: self.n_rows,
                n_cols: self.n_cols,
            });
        }
        let needs_ids = !self.cells.is_empty()
            || self.merged_cells.iter().any(|m| !m.mainids.is_empty());
        if needs_ids && !table.has_column(&self.id_column) {
            return Err(SchemaError::MissingIdColumn(self.id_column.clone()));
        }

        for cell in &self.cells {
            if cell.index == 0 {
                return Err(SchemaError::InvalidIndex(cell.index));
            }
            for role in FieldRole::ALL {
                if let Some(column) = cell.column(role) {
                    if !table.has_column(column) {
                        return Err(SchemaError::MissingCellColumn {
                            index: cell.index,
                            role,
                            column: column.to_string(),
                        });
                    }
                }
            }
        }

        for merged in &self.merged_cells {
            if let Some(column) = &merged.value {
                if !table.has_column(column) {
                    return Err(SchemaError::MissingMergedColumn {
                        row: merged.row,
                        col: merged.col,
                        column: column.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
