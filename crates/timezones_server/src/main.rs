//! `timezones-server` entry point.

use clap::Parser;
use timezones_server::{run, Cli, ServerConfig};

#[tokio::main]
async fn main() {
    let config = match ServerConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("timezones-server: {err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = run(config).await {
        log::error!("event=server_exit module=server status=error error={err}");
        eprintln!("timezones-server failed: {err}");
        std::process::exit(1);
    }
}
