//! Text and keyboard input for the handlers.

use std::fs;
use std::io::{self, BufRead, Read};

use tokio::sync::mpsc;

use crate::commands::TextInput;
use crate::error::CliError;

/// Where [`read_text`] took the text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Argument,
    File,
    Stdin,
}

/// Resolve the text for a command.
///
/// The positional text wins, then `--file`, then everything on `stdin`.
/// The text is returned untouched; sanitizing happens in the controller.
pub fn read_text(input: &TextInput, stdin: impl Read) -> Result<(String, TextSource), CliError> {
    if let Some(ref text) = input.text {
        return Ok((text.clone(), TextSource::Argument));
    }

    if let Some(ref path) = input.file {
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Read text from file");
        return Ok((text, TextSource::File));
    }

    let mut text = String::new();
    let mut stdin = stdin;
    stdin.read_to_string(&mut text)?;
    tracing::debug!(bytes = text.len(), "Read text from stdin");
    Ok((text, TextSource::Stdin))
}

/// Forward each line typed on the terminal as a unit message.
///
/// Runs on a dedicated thread: a blocking stdin read inside the runtime
/// would keep it from shutting down. The channel closes at end of input.
pub fn spawn_enter_listener() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    #[test]
    fn test_argument_wins() {
        let input = TextInput {
            text: Some("# Title".into()),
            file: None,
        };
        let (text, source) = read_text(&input, Cursor::new("ignored")).unwrap();
        assert_eq!(text, "# Title");
        assert_eq!(source, TextSource::Argument);
    }

    #[test]
    fn test_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "## Summary\n\n**Revenue** grew").unwrap();

        let input = TextInput {
            text: None,
            file: Some(file.path().to_path_buf()),
        };
        let (text, source) = read_text(&input, Cursor::new("")).unwrap();
        assert_eq!(text, "## Summary\n\n**Revenue** grew");
        assert_eq!(source, TextSource::File);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = TextInput {
            text: None,
            file: Some(dir.path().join("missing.md")),
        };
        let err = read_text(&input, Cursor::new("")).unwrap_err();
        assert!(matches!(err, CliError::Io(ref msg) if msg.contains("missing.md")));
    }

    #[test]
    fn test_falls_back_to_stdin() {
        let (text, source) =
            read_text(&TextInput::default(), Cursor::new("from a pipe\n")).unwrap();
        assert_eq!(text, "from a pipe\n");
        assert_eq!(source, TextSource::Stdin);
    }

    #[test]
    fn test_empty_stdin_is_empty_text() {
        let (text, _) = read_text(&TextInput::default(), Cursor::new("")).unwrap();
        assert!(text.is_empty());
    }
}
