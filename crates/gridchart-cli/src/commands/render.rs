use crate::cli::RenderArgs;
use crate::error::{CliError, Result};
use crate::source::TableSource;
use gridchart::core::models::grid::GridConfig;
use gridchart::engine::diagram::SvgOptions;
use gridchart::workflows::grid;
use tracing::{info, warn};

pub fn run(args: RenderArgs) -> Result<()> {
    if !(args.size.is_finite() && args.size > 0.0) {
        return Err(CliError::Argument(format!(
            "--size must be a positive number of pixels (got {})",
            args.size
        )));
    }

    let config = GridConfig::load(&args.config)?;
    let table = TableSource::from_args(&args.source)?.load()?;

    let diagram = if args.strict {
        Some(grid::render(&config, &table)?)
    } else {
        grid::render_or_log(&config, &table)
    };
    let Some(diagram) = diagram else {
        warn!("No diagram was produced for {:?}", args.config);
        eprintln!("Nothing was drawn; see the log above for the cause.");
        return Ok(());
    };

    let options = SvgOptions {
        figure_size: args.size,
        ..SvgOptions::default()
    };
    match &args.output {
        Some(path) => {
            diagram
                .write_svg(path, &options)
                .map_err(|e| CliError::Output {
                    path: path.clone(),
                    source: e,
                })?;
            info!("Wrote {} shape(s) to {:?}", diagram.shapes().len(), path);
            println!("Grid written to: {}", path.display());

            if args.open {
                open::that(path).map_err(|e| {
                    CliError::Other(anyhow::anyhow!(
                        "Failed to open '{}' in the system viewer: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
        }
        None => print!("{}", diagram.svg(&options)),
    }
    Ok(())
}
