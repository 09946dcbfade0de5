use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Read the whole input from `path`, or stdin when absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            let text = fs::read_to_string(path)?;
            debug!(path = %path.display(), bytes = text.len(), "read input file");
            Ok(text)
        }
        _ => {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            debug!(bytes = text.len(), "read stdin");
            Ok(text)
        }
    }
}

/// Write `body` to `path`, or to stdout when absent. A trailing newline is
/// added when missing.
pub fn write_output(path: Option<&Path>, body: &str) -> Result<()> {
    let newline = if body.ends_with('\n') { "" } else { "\n" };
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            write!(file, "{body}{newline}")?;
            debug!(path = %path.display(), bytes = body.len(), "wrote output file");
        }
        None => {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{body}{newline}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_round_trip_adds_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(Some(&path), "alpha\nbeta").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nbeta\n");
        assert_eq!(read_input(Some(&path)).unwrap(), "alpha\nbeta\n");
    }

    #[test]
    fn existing_newline_not_doubled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(Some(&path), "done\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "done\n");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_input(Some(Path::new("/nonexistent/input.txt"))).unwrap_err();
        assert!(matches!(err, crate::error::CliError::Io(_)));
    }
}
