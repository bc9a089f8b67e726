//! Writing generated sources next to their previous versions.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::CliError;

/// What happened to one generated file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Unchanged,
    Updated,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteStatus::Created => "created",
            WriteStatus::Unchanged => "unchanged",
            WriteStatus::Updated => "updated",
        })
    }
}

/// Write `contents` to `path`, comparing against what is already there.
///
/// A missing file is created. A file with different contents is overwritten
/// only when `update` is set; otherwise the call fails with
/// [`CliError::Outdated`] and the file is left alone.
pub fn write_output(path: &Path, contents: &str, update: bool) -> Result<WriteStatus, CliError> {
    let status = match std::fs::read_to_string(path) {
        Ok(previous) if previous == contents => return Ok(WriteStatus::Unchanged),
        Ok(_) if !update => return Err(CliError::Outdated { path: path.to_owned() }),
        Ok(_) => WriteStatus::Updated,
        Err(err) if err.kind() == ErrorKind::NotFound => WriteStatus::Created,
        Err(source) => {
            return Err(CliError::Io {
                action: "read",
                path: path.to_owned(),
                source,
            })
        }
    };

    std::fs::write(path, contents).map_err(|source| CliError::Io {
        action: "write",
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), %status, "wrote generated file");
    Ok(status)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ts");
        assert_eq!(write_output(&path, "a\n", false).unwrap(), WriteStatus::Created);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn same_contents_are_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ts");
        std::fs::write(&path, "a\n").unwrap();
        assert_eq!(write_output(&path, "a\n", false).unwrap(), WriteStatus::Unchanged);
    }

    #[test]
    fn changes_need_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ts");
        std::fs::write(&path, "a\n").unwrap();

        let err = write_output(&path, "b\n", false).unwrap_err();
        assert!(matches!(err, CliError::Outdated { .. }));
        assert!(err.to_string().contains("overwrite with --update"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");

        assert_eq!(write_output(&path, "b\n", true).unwrap(), WriteStatus::Updated);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "b\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.ts");
        let err = write_output(&path, "a\n", false).unwrap_err();
        assert!(matches!(err, CliError::Io { action: "write", .. }));
    }
}
