use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "snipcat - browse and export curated snippet collections",
    long_about = "snipcat lets you browse a snippet catalog, select entries, and export \
them as a JSON file, a clipboard payload, a shareable URL, or a deep link \
into the Snipcat desktop app."
)]
pub struct Snipcat {
    #[clap(long, global = true, help = "Use a catalog JSON file instead of the built-in catalog")]
    pub catalog: Option<PathBuf>,

    #[clap(subcommand)]
    pub commands: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the catalog interactively
    Browse,
    /// List the categories and their snippets
    List,
    /// Export snippets by id without launching the UI
    Export {
        #[clap(long, short, required = true, help = "Id of a snippet to export (repeatable)")]
        id: Vec<String>,

        #[clap(long, short, default_value = "json", help = "Output format: json, query, url, or deeplink")]
        format: String,

        #[clap(long, short, default_value = "!", help = "Start modifier token")]
        start: String,

        #[clap(long, short, default_value = "none", help = "End modifier token")]
        end: String,

        #[clap(long, short, help = "Write the payload to this file instead of stdout")]
        output: Option<PathBuf>,
    },
}
