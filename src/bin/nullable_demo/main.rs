mod args;
mod scenarios;

use clap::Parser;

use crate::args::{Args, DemoConfig};

fn main() {
    let args = Args::parse();
    let level = args.log_level;
    let config = DemoConfig::from_args(args);

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .init();

    let config_json = serde_json::to_string_pretty(&config).unwrap_or_else(|_| "{}".to_string());
    tracing::info!("config: {}", config_json);

    if let Err(err) = scenarios::run(&config) {
        tracing::error!(error = %err, "demo failed");
        std::process::exit(1);
    }
}
