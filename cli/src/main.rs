//! devstack - provision a local Debian development stack

use clap::Parser;

use devstack_cli::cli::Cli;
use devstack_cli::domain::error_code;
use devstack_cli::output::json::format_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = cli.run().await {
        match format_error(&format!("{e:#}"), error_code(&e)) {
            Ok(doc) if json => println!("{doc}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
