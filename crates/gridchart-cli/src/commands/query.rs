use crate::cli::QueryArgs;
use crate::error::Result;
use gridchart::workflows::query::QueryTable;
use tracing::info;

pub fn run(args: QueryArgs) -> Result<()> {
    let query = QueryTable::new(args.database.clone())?;
    let headers: Option<Vec<&str>> = args
        .headers
        .as_ref()
        .map(|names| names.iter().map(|h| h.trim()).collect());

    info!("Running statement against {:?}", query.path());
    let table = query.render_with(&args.statement, headers.as_deref(), args.format)?;
    println!("{}", table);
    info!("Printed {} row(s) as {} table", table.row_count(), table.style());
    Ok(())
}
