//! Declaration scanner for a single style block.
//!
//! This is deliberately not a full CSS parser. It only understands enough
//! structure to find `property: value` declarations and their byte spans:
//!
//! - `/* ... */` comments
//! - quoted strings (with backslash escapes)
//! - parentheses, so `url(data:...;base64,...)` keeps its `;`
//! - brace depth, so selectors and at-rule preludes are never declarations
//!
//! Everything else passes through as opaque text.

use std::ops::Range;

use super::error::{ParseError, ParseErrorKind};

/// A single `property: value` pair inside a rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Property name, trimmed (e.g. `--accent`, `color`). A comment between
    /// the name and the colon is not part of it.
    pub property: &'a str,
    /// Value text after the colon, trimmed. Inline comments are kept.
    pub value: &'a str,
    /// Bytes to cut when this declaration is removed.
    ///
    /// Starts right after the previous boundary (`{`, `;`, `}`) or comment,
    /// so leading whitespace goes with the declaration and a comment in front
    /// of it stays. Ends after the terminating `;`, or just before the `}` for
    /// a final declaration written without one.
    pub span: Range<usize>,
}

impl Declaration<'_> {
    /// Whether this declares a custom property (`--name`).
    #[inline]
    pub fn is_custom(&self) -> bool {
        self.property.starts_with("--")
    }
}

/// Collect every declaration in `css`, in source order.
///
/// Fails on unbalanced braces, unterminated comments and unterminated
/// strings rather than guessing.
pub fn scan_declarations(css: &str) -> Result<Vec<Declaration<'_>>, ParseError> {
    Scanner::new(css).run()
}

struct Scanner<'a> {
    css: &'a str,
    bytes: &'a [u8],
    depth: usize,
    parens: usize,
    /// Removal start of the current segment.
    lead: usize,
    /// First significant byte of the current segment.
    start: Option<usize>,
    decls: Vec<Declaration<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(css: &'a str) -> Self {
        Self {
            css,
            bytes: css.as_bytes(),
            depth: 0,
            parens: 0,
            lead: 0,
            start: None,
            decls: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Declaration<'a>>, ParseError> {
        let len = self.bytes.len();
        let mut i = 0;

        while i < len {
            match self.bytes[i] {
                b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                    let end = self.skip_comment(i)?;
                    if self.start.is_none() {
                        self.lead = end;
                    }
                    i = end;
                    continue;
                }
                quote @ (b'"' | b'\'') => {
                    self.mark(i);
                    i = self.skip_string(i, quote)?;
                    continue;
                }
                b'\\' => {
                    // Escaped character in an identifier
                    self.mark(i);
                    i += 2;
                    continue;
                }
                b'(' => {
                    self.mark(i);
                    self.parens += 1;
                }
                b')' => {
                    self.mark(i);
                    self.parens = self.parens.saturating_sub(1);
                }
                b'{' => {
                    // Whatever came before was a selector or at-rule prelude
                    self.depth += 1;
                    self.parens = 0;
                    self.reset(i + 1);
                }
                b'}' => {
                    if self.depth == 0 {
                        return Err(ParseError::new(ParseErrorKind::UnexpectedCloseBrace, i));
                    }
                    self.finish(i, i);
                    self.depth -= 1;
                    self.parens = 0;
                    self.reset(i + 1);
                }
                b';' if self.parens == 0 => {
                    self.finish(i, i + 1);
                    self.reset(i + 1);
                }
                b if b.is_ascii_whitespace() => {}
                _ => self.mark(i),
            }
            i += 1;
        }

        if self.depth > 0 {
            return Err(ParseError::new(ParseErrorKind::UnclosedBlock, len));
        }
        Ok(self.decls)
    }

    #[inline]
    fn mark(&mut self, i: usize) {
        if self.start.is_none() {
            self.start = Some(i);
        }
    }

    #[inline]
    fn reset(&mut self, lead: usize) {
        self.lead = lead;
        self.start = None;
    }

    /// Close the current segment; record it if it is a declaration.
    fn finish(&mut self, body_end: usize, span_end: usize) {
        let Some(start) = self.start else {
            return;
        };
        if self.depth == 0 {
            return;
        }

        let text = &self.css[start..body_end];
        if text.starts_with('@') {
            return;
        }
        let Some(colon) = find_colon(text) else {
            return;
        };
        let name = &text[..colon];
        let property = name.find("/*").map_or(name, |pos| &name[..pos]).trim();
        if property.is_empty() {
            return;
        }

        self.decls.push(Declaration {
            property,
            value: text[colon + 1..].trim(),
            span: self.lead..span_end,
        });
    }

    /// Returns the offset just past `*/`.
    fn skip_comment(&self, open: usize) -> Result<usize, ParseError> {
        self.css[open + 2..]
            .find("*/")
            .map(|pos| open + 2 + pos + 2)
            .ok_or(ParseError::new(ParseErrorKind::UnterminatedComment, open))
    }

    /// Returns the offset just past the closing quote.
    fn skip_string(&self, open: usize, quote: u8) -> Result<usize, ParseError> {
        let mut j = open + 1;
        while j < self.bytes.len() {
            match self.bytes[j] {
                b'\\' => j += 2,
                b if b == quote => return Ok(j + 1),
                _ => j += 1,
            }
        }
        Err(ParseError::new(ParseErrorKind::UnterminatedString, open))
    }
}

/// First `:` outside a comment. Strings can't appear before the colon of a
/// declaration, so only comments need skipping.
fn find_colon(text: &str) -> Option<usize> {
    let mut i = 0;
    while let Some(rel) = text[i..].find([':', '/']) {
        let pos = i + rel;
        if text.as_bytes()[pos] == b':' {
            return Some(pos);
        }
        if text[pos..].starts_with("/*") {
            // Comments inside a segment were already checked for termination
            i = text[pos + 2..].find("*/").map_or(text.len(), |end| pos + 2 + end + 2);
        } else {
            i = pos + 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props<'a>(decls: &[Declaration<'a>]) -> Vec<&'a str> {
        decls.iter().map(|d| d.property).collect()
    }

    #[test]
    fn test_scan_simple_rule() {
        let css = ".x { color: blue; margin: 0 }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["color", "margin"]);
        assert_eq!(decls[0].value, "blue");
        assert_eq!(decls[1].value, "0");
        assert!(!decls[0].is_custom());
    }

    #[test]
    fn test_scan_spans_include_leading_whitespace_and_semicolon() {
        let css = ":root { --a: red; --b: blue; }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(&css[decls[0].span.clone()], " --a: red;");
        assert_eq!(&css[decls[1].span.clone()], " --b: blue;");
    }

    #[test]
    fn test_scan_last_declaration_without_semicolon() {
        let css = ":root{--a:red;--b:blue}";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(&css[decls[1].span.clone()], "--b:blue");
        assert_eq!(decls[1].value, "blue");
    }

    #[test]
    fn test_scan_comment_before_declaration_stays_outside_span() {
        let css = ":root { /* brand */ --a: red; }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(&css[decls[0].span.clone()], " --a: red;");
    }

    #[test]
    fn test_scan_comment_inside_value_is_kept() {
        let css = ".x { color: /* var(--a) */ red; }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(decls[0].value, "/* var(--a) */ red");
    }

    #[test]
    fn test_scan_comment_between_name_and_colon() {
        let css = ":root{--a/**/:red;--b /* x:y */ : blue}";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["--a", "--b"]);
        assert_eq!(decls[0].value, "red");
        assert_eq!(decls[1].value, "blue");
    }

    #[test]
    fn test_scan_selectors_are_not_declarations() {
        let css = "a:hover { color: red } @media (min-width: 10px) { .y { top: 0 } }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["color", "top"]);
    }

    #[test]
    fn test_scan_top_level_statements_are_ignored() {
        let css = "@import url(a.css); @charset \"utf-8\"; .x { color: red }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["color"]);
    }

    #[test]
    fn test_scan_semicolon_inside_url() {
        let css = ".x { background: url(data:image/png;base64,AAAA); --c: 1 }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["background", "--c"]);
        assert_eq!(decls[0].value, "url(data:image/png;base64,AAAA)");
    }

    #[test]
    fn test_scan_braces_inside_strings() {
        let css = r#".x::after { content: "}{;"; --d: '\'' }"#;
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["content", "--d"]);
        assert_eq!(decls[0].value, r#""}{;""#);
    }

    #[test]
    fn test_scan_nested_at_rule_declarations() {
        let css = "@media print { :root { --p: 1; } }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["--p"]);
        assert!(decls[0].is_custom());
    }

    #[test]
    fn test_scan_non_ascii_values() {
        let css = ".x { content: \"→ ✓\"; --é: 1 }";
        let decls = scan_declarations(css).unwrap();
        assert_eq!(props(&decls), ["content", "--é"]);
    }

    #[test]
    fn test_scan_empty_input() {
        assert!(scan_declarations("").unwrap().is_empty());
        assert!(scan_declarations("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_scan_unclosed_block() {
        let err = scan_declarations(".x { color: red;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedBlock);
        assert_eq!(err.offset, 16);
    }

    #[test]
    fn test_scan_unexpected_close_brace() {
        let err = scan_declarations(".x { color: red; } }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCloseBrace);
        assert_eq!(err.offset, 19);
    }

    #[test]
    fn test_scan_unterminated_comment() {
        let err = scan_declarations(".x { /* color: red; }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_scan_unterminated_string() {
        let err = scan_declarations(".x { content: \"abc; }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.offset, 14);
    }
}
