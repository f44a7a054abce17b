use clap::{Args, Parser, Subcommand};
use gridchart::core::io::table_format::TableStyle;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "gridchart - query chemistry teaching databases and draw periodic-table-style grid diagrams.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a SQL statement against a SQLite database and print the result as a table.
    Query(QueryArgs),
    /// Draw a grid diagram from a YAML layout and a data table.
    Render(RenderArgs),
    /// Check a YAML layout against a data table without drawing.
    Check(CheckArgs),
}

/// Arguments for the `query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Path to the SQLite database file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub database: PathBuf,

    /// Comma-separated column headers replacing the statement's column names.
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub headers: Option<Vec<String>>,

    /// Table layout: simple, pipe (Markdown) or csv.
    #[arg(short, long, default_value_t = TableStyle::Simple, value_name = "STYLE")]
    pub format: TableStyle,

    /// The SQL statement to run.
    #[arg(required = true)]
    pub statement: String,
}

/// Where the data table comes from: a database query or a CSV file.
#[derive(Args, Debug, Clone)]
pub struct TableSourceArgs {
    /// SQLite database holding the data table.
    #[arg(short, long, value_name = "PATH", requires = "query", conflicts_with = "csv")]
    pub database: Option<PathBuf>,

    /// SQL statement selecting the data table from --database.
    #[arg(long, value_name = "SQL", requires = "database")]
    pub query: Option<String>,

    /// CSV file with a header row holding the data table.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

/// Arguments for the `render` subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the grid layout in YAML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub source: TableSourceArgs,

    /// Write the SVG here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Open the written SVG in the system viewer.
    #[arg(long, requires = "output")]
    pub open: bool,

    /// Fail with an error instead of logging it when the grid cannot be drawn.
    #[arg(long)]
    pub strict: bool,

    /// Length in pixels of the longer side of the figure.
    #[arg(long, default_value_t = 720.0, value_name = "PIXELS")]
    pub size: f64,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the grid layout in YAML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    #[command(flatten)]
    pub source: TableSourceArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn query_parses_headers_and_format() {
        let cli = Cli::try_parse_from([
            "gridchart",
            "query",
            "-d",
            "amino.db",
            "--headers",
            "#,Name",
            "--format",
            "pipe",
            "SELECT id, name FROM amino_acids",
        ])
        .unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.database, PathBuf::from("amino.db"));
                assert_eq!(args.headers, Some(vec!["#".to_string(), "Name".to_string()]));
                assert_eq!(args.format, TableStyle::Pipe);
                assert_eq!(args.statement, "SELECT id, name FROM amino_acids");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn render_accepts_csv_source_and_global_flags() {
        let cli = Cli::try_parse_from([
            "gridchart", "render", "-c", "grid.yaml", "--csv", "data.csv", "-o", "out.svg", "--open",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.source.csv, Some(PathBuf::from("data.csv")));
                assert!(args.open);
                assert!(!args.strict);
                assert_eq!(args.size, 720.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn database_source_requires_a_query_and_excludes_csv() {
        assert!(
            Cli::try_parse_from(["gridchart", "check", "-c", "g.yaml", "-d", "a.db"]).is_err()
        );
        assert!(Cli::try_parse_from([
            "gridchart", "check", "-c", "g.yaml", "-d", "a.db", "--query", "SELECT 1", "--csv",
            "a.csv",
        ])
        .is_err());
    }

    #[test]
    fn open_requires_an_output_file() {
        assert!(
            Cli::try_parse_from(["gridchart", "render", "-c", "g.yaml", "--csv", "a.csv", "--open"])
                .is_err()
        );
    }
}
