//! Style parsing error types.

use thiserror::Error;

/// What went wrong while scanning a style block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `}` with no open block.
    UnexpectedCloseBrace,
    /// Text ended inside a rule block.
    UnclosedBlock,
    /// `/*` without a matching `*/`.
    UnterminatedComment,
    /// Quoted string without its closing quote.
    UnterminatedString,
    /// `<style` start tag without `>` or without a matching `</style>`.
    UnclosedStyleElement,
}

impl ParseErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::UnexpectedCloseBrace => "unbalanced `}`",
            Self::UnclosedBlock => "unterminated rule block (missing `}`)",
            Self::UnterminatedComment => "unterminated comment",
            Self::UnterminatedString => "unterminated string",
            Self::UnclosedStyleElement => "unclosed <style> element",
        }
    }
}

/// Malformed style content that cannot be pruned safely.
///
/// `offset` is a byte offset into the text that was scanned. Callers that
/// scan a slice of a larger document use [`ParseError::shifted`] to make it
/// document-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .kind.describe())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub const fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Move the offset forward by `base` bytes.
    #[inline]
    pub const fn shifted(self, base: usize) -> Self {
        Self {
            kind: self.kind,
            offset: self.offset + base,
        }
    }
}
