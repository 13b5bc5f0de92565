pub mod cli;
pub mod commands;

use clap::Parser;
use cli::Snipcat;
use commands::handle_command;
use std::process;

/// Run the snipcat CLI application
pub fn run_main() {
    let args = Snipcat::parse();
    let result = handle_command(args);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
