use crate::core::formula::{FormulaFormatter, UnicodeFormula};
use crate::core::models::grid::GridConfig;
use crate::core::models::table::Table;
use crate::engine::cells::{CellBlock, MergedBlock};
use crate::engine::diagram::Diagram;
use crate::engine::error::RenderError;
use std::error::Error as _;
use tracing::{debug, error, info, instrument};

/// Draws the grid described by `config` from the rows of `table`.
///
/// Merged cells are drawn first, then indexed cells, both in configuration
/// order. Formulas use [`UnicodeFormula`].
pub fn render(config: &GridConfig, table: &Table) -> Result<Diagram, RenderError> {
    render_with(config, table, &UnicodeFormula::new())
}

#[instrument(skip_all, name = "grid_render", fields(cells = config.cells.len(), merged = config.merged_cells.len()))]
pub fn render_with(
    config: &GridConfig,
    table: &Table,
    formatter: &dyn FormulaFormatter,
) -> Result<Diagram, RenderError> {
    config.validate(table)?;
    let mut diagram = Diagram::new(config.n_rows, config.n_cols);

    for spec in &config.merged_cells {
        let block = MergedBlock::resolve(spec, table, &config.id_column)?;
        debug!(
            "Merged cell ({}, {}) spans {}x{}",
            block.row, block.col, block.rowspan, block.colspan
        );
        block.draw(&mut diagram, config.main_size());
    }

    for spec in &config.cells {
        let block = CellBlock::resolve(spec, config, table, formatter)?;
        block.draw(&mut diagram, config);
    }

    info!(
        "Rendered {}x{} grid with {} shape(s)",
        config.n_rows,
        config.n_cols,
        diagram.shapes().len()
    );
    Ok(diagram)
}

/// Like [`render`], but logs a failure with its causes instead of returning it.
pub fn render_or_log(config: &GridConfig, table: &Table) -> Option<Diagram> {
    match render(config, table) {
        Ok(diagram) => Some(diagram),
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!("\n  caused by: {}", cause));
                source = cause.source();
            }
            error!("Grid rendering failed: {}", message);
            None
        }
    }
}
