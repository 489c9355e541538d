use browsig_core::{decode_token, encoding};
use colored::Colorize;

use crate::error::CliResult;

pub fn handle(token: String) -> CliResult<()> {
    let token = token.trim();
    if !encoding::is_token_alphabet(token) {
        eprintln!("{}", "Warning: token contains characters outside the base64 alphabet".yellow());
    }

    let text = decode_token(token)?;
    eprintln!("{} {} chars", "Decoded:".green().bold(), text.len());
    println!("{}", text);

    Ok(())
}
