//! Pipeline error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::css::ParseError;

/// Anything that aborts an embed run.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Input unreadable or output unwritable.
    #[error("IO error on `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // NOTE: not #[source], the message already carries it
    #[error("malformed style at line {line}, column {column}: {error}")]
    Parse {
        line: usize,
        column: usize,
        error: ParseError,
    },

    #[error("compression failed")]
    Compression(#[source] io::Error),

    /// Decompressing the payload did not give back the pruned document.
    #[error("compressed payload does not round-trip to the pruned document")]
    RoundTrip,

    /// `updatePageLength` is a `uint16_t`.
    #[error("compressed page is {len} bytes, over the {max} bytes a uint16_t length can describe", max = u16::MAX)]
    PayloadTooLarge { len: usize },
}

impl EmbedError {
    pub(super) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a 1-based line/column to `error`, whose offset is into `text`.
    pub(super) fn parse(text: &str, error: ParseError) -> Self {
        let (line, column) = line_col(text, error.offset);
        Self::Parse {
            line,
            column,
            error,
        }
    }
}

/// 1-based line and column (in chars) of a byte offset.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::ParseErrorKind;

    #[test]
    fn test_line_col() {
        let text = "ab\ncd\nef";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 1), (1, 2));
        assert_eq!(line_col(text, 3), (2, 1));
        assert_eq!(line_col(text, 7), (3, 2));
        assert_eq!(line_col(text, text.len()), (3, 3));
    }

    #[test]
    fn test_line_col_counts_chars() {
        assert_eq!(line_col("✓✓x", "✓✓".len()), (1, 3));
    }

    #[test]
    fn test_parse_error_display() {
        let err = EmbedError::parse(
            "<style>\n.x{\n</style>",
            ParseError::new(ParseErrorKind::UnclosedBlock, 11),
        );
        assert_eq!(
            err.to_string(),
            "malformed style at line 2, column 4: unterminated rule block (missing `}`)"
        );
    }

    #[test]
    fn test_io_error_display() {
        let err = EmbedError::io(
            "dist/index.html",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "IO error on `dist/index.html`");
    }

    #[test]
    fn test_payload_too_large_display() {
        let err = EmbedError::PayloadTooLarge { len: 70000 };
        assert!(err.to_string().contains("70000"));
        assert!(err.to_string().contains("65535"));
    }
}
