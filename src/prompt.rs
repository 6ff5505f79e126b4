//! Interactive room-count prompt

use std::io::{BufRead, Write};

pub const ROOMS_PROMPT: &str = "Number of rooms (Enter for any): ";

/// Asks for the room-count filter until the answer is usable
///
/// An empty line or end of input means no filter. Anything that is not a
/// positive integer is rejected and the question is asked again.
pub fn prompt_rooms<R: BufRead, W: Write>(mut input: R, mut output: W) -> std::io::Result<Option<u32>> {
    loop {
        write!(output, "{}", ROOMS_PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        match answer.parse::<u32>() {
            Ok(rooms) if rooms > 0 => return Ok(Some(rooms)),
            _ => writeln!(output, "Please enter a positive whole number or press Enter.")?,
        }
    }
}
