use std::path::PathBuf;

use colored::Colorize;

use super::load_builder;
use crate::error::CliResult;

pub async fn handle(fixture: PathBuf, config: Option<PathBuf>, show_record: bool) -> CliResult<()> {
    let mut builder = load_builder(&fixture, config.as_deref())?;
    eprintln!("{}", format!("Building signature for: {}", fixture.display()).cyan());

    let signature = builder.build().await.clone();

    eprintln!("  Length: {} chars", signature.len());
    if builder.config().canvas {
        eprintln!("  Canvas probe: enabled");
    }

    println!("{}", signature);

    if show_record {
        eprintln!();
        eprintln!("{}", "Canonical text:".green().bold());
        println!("{}", signature.decode()?);
    }

    Ok(())
}
