//! Help screen text.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Help text compiled into the binary, shown when no `--help-file` is given.
pub const BUILTIN: &str = include_str!("../assets/help.md");

/// Help text for the session: the given file if any, otherwise [`BUILTIN`].
pub fn text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => load(path),
        None => Ok(BUILTIN.to_string()),
    }
}

/// Read the help markdown, with a readable message when the file is missing.
pub fn load(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => bail!(
            "File {} not found, make sure you have all the required files, \
             if you don't, try reinstalling or grab them from the repository",
            path.display()
        ),
        Err(e) => Err(e).context(format!("reading help file {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_help_without_file() {
        let text = text(None).unwrap();
        assert_eq!(text, BUILTIN);
        assert!(text.contains("Reset board"));
    }

    #[test]
    fn test_help_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.md");
        fs::write(&path, "# Custom help").unwrap();
        assert_eq!(text(Some(&path)).unwrap(), "# Custom help");
    }

    #[test]
    fn test_missing_help_file_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2048.md");
        let err = text(Some(&path)).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("File "));
        assert!(message.contains("2048.md"));
        assert!(message.contains("not found"));
    }
}
