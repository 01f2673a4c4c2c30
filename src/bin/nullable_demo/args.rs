use clap::Parser;
use serde::Serialize;
use sql_nullable::PlaceholderStyle;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Walk through SQL NULL handling against SQLite")]
pub(crate) struct Args {
    /// SQLite database path; the demo creates and fills a `students` table.
    #[arg(long, default_value = ":memory:")]
    pub(crate) database: String,
    #[arg(long, default_value_t = 18)]
    pub(crate) min_age: u32,
    #[arg(long, default_value = "Bob")]
    pub(crate) first_name: String,
    #[arg(long, default_value = "Brown")]
    pub(crate) last_name: String,
    /// Placeholder style for the named-parameter scenario; only `sqlite` executes.
    #[arg(long, value_enum, default_value_t = PlaceholderStyle::Sqlite)]
    pub(crate) placeholder_style: PlaceholderStyle,
    #[arg(long, default_value_t = Level::INFO)]
    pub(crate) log_level: Level,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DemoConfig {
    pub(crate) database: String,
    pub(crate) min_age: u32,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) placeholder_style: PlaceholderStyle,
    pub(crate) log_level: String,
}

impl DemoConfig {
    pub(crate) fn from_args(args: Args) -> Self {
        DemoConfig {
            database: args.database,
            min_age: args.min_age,
            first_name: args.first_name,
            last_name: args.last_name,
            placeholder_style: args.placeholder_style,
            log_level: args.log_level.to_string(),
        }
    }
}
