use std::path::PathBuf;

use super::load_builder;
use crate::error::CliResult;

pub async fn handle(fixture: PathBuf, config: Option<PathBuf>) -> CliResult<()> {
    let mut builder = load_builder(&fixture, config.as_deref())?;
    builder.build().await;

    if let Some(record) = builder.record() {
        println!("{}", serde_json::to_string_pretty(record)?);
    }

    Ok(())
}
