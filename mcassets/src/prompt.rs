//! Interactive version selection.

use anyhow::Result;
use mcassets_core::parse_choice;
use std::io::{BufRead, Write};

/// Prompt shown before reading the selection.
pub const PROMPT: &str = "Choose version to unpack: ";

/// Render the numbered version list.
pub fn format_versions(versions: &[String]) -> String {
    let mut text = String::from("Available versions:\n");
    for (number, version) in versions.iter().enumerate() {
        text.push_str(&format!("{}:\t{}\n", number, version));
    }
    text
}

/// List `versions` on `prompt_out`, read one line from `input` and return
/// the chosen version.
///
/// `interactive` tells whether `input` is a terminal; it only changes the
/// message when input ends before a line was read.
pub fn choose_version<R: BufRead, W: Write>(
    versions: &[String],
    mut input: R,
    mut prompt_out: W,
    interactive: bool,
) -> Result<String> {
    write!(prompt_out, "{}{}", format_versions(versions), PROMPT)?;
    prompt_out.flush()?;

    // Raw bytes: a line that is not UTF-8 is a bad selection, not an I/O error.
    let mut line = Vec::new();
    let read = input.read_until(b'\n', &mut line)?;

    let choice = match parse_choice(&String::from_utf8_lossy(&line), versions) {
        Ok(choice) => choice,
        Err(err) if read == 0 && !interactive => {
            return Err(anyhow::Error::new(err).context(
                "stdin closed before a version was chosen; pass VERSION as an argument",
            ));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(versions[choice].clone())
}
