use super::diagram::Diagram;
use super::error::RenderError;
use super::labels::{format_formulas, format_texts, merged_prefixes};
use super::layout::{CELL_SPAN, index_to_coords};
use crate::core::formula::FormulaFormatter;
use crate::core::models::grid::{CellSpec, FieldRole, GridConfig, MergedCellSpec, Quadrant, SchemaError};
use crate::core::models::table::{Number, RowRef, Table, Value};
use tracing::trace;

/// Share of the main font size used for a merged cell's second line.
const SUB_FONT_RATIO: f64 = 0.7;

fn numeric(column: &str, value: &Value) -> Result<Option<Number>, RenderError> {
    let non_numeric = || RenderError::NonNumeric {
        column: column.to_string(),
        value: value.to_text(),
    };
    match value {
        Value::Null => Ok(None),
        Value::Integer(_) | Value::Real(_) => Ok(value.as_number()),
        Value::Text(text) => match Value::infer(text) {
            Value::Null => Ok(None),
            parsed => parsed.as_number().map(Some).ok_or_else(non_numeric),
        },
        Value::Blob(_) => Err(non_numeric()),
    }
}

/// A resolved merged cell, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedBlock {
    pub row: u32,
    pub col: u32,
    pub rowspan: u32,
    pub colspan: u32,
    pub fill: String,
    pub main: String,
    pub sub: String,
}

impl MergedBlock {
    /// Sums the value column over the rows named by `mainids` and builds the labels.
    pub fn resolve(spec: &MergedCellSpec, table: &Table, id_column: &str) -> Result<Self, RenderError> {
        let mut total = Number::default();
        if let Some(column) = spec.value.as_deref() {
            for row in table.rows_matching(id_column, &spec.mainids) {
                let value = row.get(column).unwrap_or(&Value::Null);
                if let Some(n) = numeric(column, value)? {
                    total = total.add(n);
                }
            }
        }
        let total = total.add(spec.valueadd);
        let (main_prefix, sub_prefix) = merged_prefixes(total, spec.subdivider, (spec.row, spec.col))?;
        trace!(
            "Merged cell ({}, {}): total {} over {} id(s)",
            spec.row,
            spec.col,
            total,
            spec.mainids.len()
        );

        Ok(Self {
            row: spec.row,
            col: spec.col,
            rowspan: spec.rowspan,
            colspan: spec.colspan,
            fill: spec.color.clone(),
            main: format!("{}{}", main_prefix, spec.main),
            sub: format!("{}{}", sub_prefix, spec.sub),
        })
    }

    pub fn draw(&self, diagram: &mut Diagram, main_size: f64) {
        let (x, y) = (self.col as f64, self.row as f64);
        let (w, h) = (self.colspan as f64, self.rowspan as f64);
        let cx = x + w / 2.0;
        diagram.push_rect(x, y, w, h, &self.fill);

        match (self.main.is_empty(), self.sub.is_empty()) {
            (false, false) => {
                diagram.push_text(cx, y + h / 3.0, &self.main, main_size);
                diagram.push_text(cx, y + 2.0 * h / 3.0, &self.sub, main_size * SUB_FONT_RATIO);
            }
            (false, true) => diagram.push_text(cx, y + h / 2.0, &self.main, main_size),
            (true, false) => {
                diagram.push_text(cx, y + h / 2.0, &self.sub, main_size * SUB_FONT_RATIO)
            }
            (true, true) => {}
        }
    }
}

/// A resolved indexed cell: position, fill and the four quadrant labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBlock {
    pub index: u32,
    pub row: u32,
    pub col: u32,
    pub fill: String,
    /// Label per quadrant in [`Quadrant::slot`] order; suppressed quadrants are empty.
    pub labels: [String; 4],
}

struct CellRow<'a> {
    spec: &'a CellSpec,
    row: RowRef<'a>,
}

impl CellRow<'_> {
    fn text(&self, role: FieldRole) -> String {
        self.spec
            .column(role)
            .and_then(|c| self.row.get(c))
            .map(Value::to_text)
            .unwrap_or_default()
    }

    /// The value column plus `valueadd`, or `None` when unmapped or NULL.
    fn value(&self) -> Result<Option<Number>, RenderError> {
        let Some(column) = self.spec.column(FieldRole::Value) else {
            return Ok(None);
        };
        let raw = self.row.get(column).unwrap_or(&Value::Null);
        Ok(numeric(column, raw)?.map(|n| n.add(self.spec.valueadd)))
    }

    /// Bottom-right text: the `br` column when mapped, else the adjusted value.
    fn bottom_right(&self) -> Result<String, RenderError> {
        if self.spec.column(FieldRole::BottomRight).is_some() {
            return Ok(self.text(FieldRole::BottomRight));
        }
        // No value column or a NULL value leaves the quadrant blank, not "0".
        Ok(self.value()?.map(|n| n.to_string()).unwrap_or_default())
    }
}

impl CellBlock {
    pub fn resolve(
        spec: &CellSpec,
        config: &GridConfig,
        table: &Table,
        formatter: &dyn FormulaFormatter,
    ) -> Result<Self, RenderError> {
        let (row, col) = index_to_coords(spec.index, config.cells_offset)
            .ok_or(SchemaError::InvalidIndex(spec.index))?;
        let data = table
            .find_first(&config.id_column, &spec.id)
            .ok_or_else(|| RenderError::RowNotFound {
                index: spec.index,
                column: config.id_column.clone(),
                id: spec.id.clone(),
            })?;
        let cell = CellRow { spec, row: data };

        let group = cell.text(FieldRole::Group);
        let fill = config.groups.color_for(group.trim()).to_string();

        let mut labels: [String; 4] = Default::default();
        for quadrant in Quadrant::ALL {
            if !config.displays(quadrant) {
                continue;
            }
            labels[quadrant.slot()] = match quadrant {
                Quadrant::BottomLeft => format_formulas(&cell.text(FieldRole::BottomLeft), formatter)
                    .map_err(|source| RenderError::Formula {
                        index: spec.index,
                        source,
                    })?,
                Quadrant::BottomRight => format_texts(&cell.bottom_right()?),
                other => format_texts(&cell.text(other.into())),
            };
        }
        trace!("Cell {} at ({}, {}) filled {}", spec.index, row, col, fill);

        Ok(Self {
            index: spec.index,
            row,
            col,
            fill,
            labels,
        })
    }

    pub fn label(&self, quadrant: Quadrant) -> &str {
        &self.labels[quadrant.slot()]
    }

    pub fn draw(&self, diagram: &mut Diagram, config: &GridConfig) {
        let span = CELL_SPAN as f64;
        let (x, y) = (self.col as f64, self.row as f64);
        diagram.push_rect(x, y, span, span, &self.fill);
        for quadrant in Quadrant::ALL {
            let (dx, dy) = quadrant.center_offset();
            diagram.push_text(x + dx, y + dy, self.label(quadrant), config.size_for(quadrant));
        }
    }
}
