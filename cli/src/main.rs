//! publish-auth - push credentials for publishing actions

use clap::Parser;

use publish_auth::cli::Cli;
use publish_auth::output::{OutputContext, json};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (as_json, no_color) = (cli.json, cli.no_color);
    if let Err(e) = cli.run().await {
        if as_json {
            match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
                Ok(doc) => println!("{doc}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            OutputContext::new(no_color, false).error(&format!("Error: {e:#}"));
        }
        std::process::exit(1);
    }
}
