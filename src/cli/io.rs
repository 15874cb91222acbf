//! Line-oriented terminal I/O
//!
//! - Prompts are written without a newline and flushed
//! - Input lines are returned without their line terminator
//! - End of input is `None`, not an error

use std::io::{BufRead, Write};

use super::errors::CliResult;

/// Write `text` and flush so it shows before input is read
pub fn prompt<W: Write>(output: &mut W, text: &str) -> CliResult<()> {
    write!(output, "{}", text)?;
    output.flush()?;
    Ok(())
}

/// Read one line, stripping `\n` or `\r\n`
pub fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
