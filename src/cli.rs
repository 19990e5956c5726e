pub mod command;
pub mod run;

pub use run::run_app;

use crate::errors::AppError;
use std::io::BufRead;

/// Next trimmed line of input, or `None` at end of input.
pub fn read_command<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
