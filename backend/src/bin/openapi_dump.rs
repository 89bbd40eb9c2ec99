//! Write the OpenAPI document as pretty-printed JSON.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use recipe_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Print the recipe API's OpenAPI document",
    version
)]
struct CliArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = CliArgs::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|error| io::Error::other(format!("serialise OpenAPI document: {error}")))?;

    match args.output {
        Some(path) => std::fs::write(&path, format!("{json}\n")),
        None => writeln!(io::stdout().lock(), "{json}"),
    }
}
