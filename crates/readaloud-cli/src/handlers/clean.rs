//! Clean command handler.

use std::io;

use readaloud_core::clean_for_speech;

use crate::commands::TextInput;
use crate::error::CliError;
use crate::utils::input::read_text;

/// Print the text the engine would receive.
pub fn execute(input: &TextInput) -> Result<(), CliError> {
    let (text, _) = read_text(input, io::stdin())?;
    println!("{}", clean_for_speech(Some(&text)));
    Ok(())
}
