use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format an I/O failure on a packed or value file, with a suggestion
/// matched to what tilepack was doing.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check the path; tilepack never creates input files.",
        PermissionDenied => "The file is not readable or writable by this user.",
        UnexpectedEof => "The file ended early. Lower --bytes or omit it to read to the end.",
        WriteZero => "The device stopped accepting bytes; the packed output is incomplete.",
        InvalidData => "Value files hold comma or whitespace separated integers.",
        _ => "The packed output, if any, should not be trusted.",
    };
    format!("{} '{}' failed: {}. {}", operation, path.display(), err, suggestion)
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error raised while working on `path` into a CLI error
/// with a hint.
pub fn tilepack_cli_error(operation: &str, path: &Path, err: crate::TilepackError) -> CliError {
    let msg = match &err {
        crate::TilepackError::Io(io) => format_io_error(operation, path, io),
        _ => format!("{} '{}' failed: {}", operation, path.display(), cli_hint(&err)),
    };
    CliError {
        msg,
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for a library error variant.
pub fn cli_hint(err: &crate::TilepackError) -> String {
    use crate::TilepackError::*;
    match err {
        InvalidWidth { .. } => format!("{err}. Widths must be between 1 and {}.", crate::MAX_WIDTH),
        EmptyPattern => format!("{err}. Pass at least one width, e.g. --pattern 3,2,9."),
        InsufficientInput { .. } => format!("{err}. Request fewer bytes or values."),
        ValueTooWide { .. } => format!("{err}. Check the values against the pattern."),
        BufferTooSmall { .. } => format!("{err}. This is a bug."),
        Config(msg) => format!("{msg}. Invalid configuration."),
        Io(io) => format!("{io}"),
    }
}
