//! Print the OpenAPI document as JSON, or write it to `--output`.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use habit_buddy::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Dump the habits OpenAPI document")]
struct Args {
    /// Destination file; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;

    match args.output {
        Some(path) => std::fs::write(path, json),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")
        }
    }
}
