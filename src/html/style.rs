//! Locate inline `<style>` elements in an HTML document.
//!
//! Works on the raw text so that everything outside the style contents can
//! be copied back untouched. Comments and the contents of raw text and
//! RCDATA elements (`<script>`, `<textarea>`, `<title>`, ...) are skipped,
//! since a `<style` inside any of them is text, not an element.

use std::ops::Range;

use crate::css::{ParseError, ParseErrorKind};

/// Elements whose contents the HTML tokenizer reads as text up to the
/// matching end tag. `<noscript>` is left out: with scripting off its
/// contents are markup.
const TEXT_ELEMENTS: &[&[u8]] = &[
    b"script", b"textarea", b"title", b"xmp", b"iframe", b"noembed", b"noframes",
];

/// The text contents of one `<style>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
    /// Position among the document's style blocks (0-based).
    pub index: usize,
    /// Byte range of the contents, between `<style ...>` and `</style`.
    pub content: Range<usize>,
}

/// Find every `<style>` element in document order.
pub fn find_style_blocks(html: &str) -> Result<Vec<StyleBlock>, ParseError> {
    let bytes = html.as_bytes();
    let mut blocks = Vec::new();
    let mut i = 0;

    while let Some(rel) = html[i..].find('<') {
        let lt = i + rel;
        let rest = &html[lt..];

        if rest.starts_with("<!--") {
            match comment_end(rest) {
                Some(len) => i = lt + len,
                None => break,
            }
            continue;
        }

        if let Some((name, name_end)) = TEXT_ELEMENTS
            .iter()
            .find_map(|name| match_tag(bytes, lt + 1, name).map(|end| (*name, end)))
        {
            let Some(open_end) = tag_end(bytes, name_end) else {
                break;
            };
            match find_end_tag(bytes, open_end, name) {
                Some(close) => i = close,
                None => break,
            }
            continue;
        }

        if let Some(name_end) = match_tag(bytes, lt + 1, b"style") {
            let unclosed = ParseError::new(ParseErrorKind::UnclosedStyleElement, lt);
            let open_end = tag_end(bytes, name_end).ok_or(unclosed)?;
            let close = find_end_tag(bytes, open_end, b"style").ok_or(unclosed)?;
            blocks.push(StyleBlock {
                index: blocks.len(),
                content: open_end..close,
            });
            i = close + b"</style".len();
            continue;
        }

        i = lt + 1;
    }

    Ok(blocks)
}

/// If a tag named `name` starts at `pos`, return the offset after the name.
fn match_tag(bytes: &[u8], pos: usize, name: &[u8]) -> Option<usize> {
    let end = pos + name.len();
    if !bytes.get(pos..end)?.eq_ignore_ascii_case(name) {
        return None;
    }
    match bytes.get(end) {
        None => Some(end),
        Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => Some(end),
        Some(_) => None,
    }
}

/// Offset just past the `>` closing a start tag. Quoted attribute values may
/// contain `>`.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None;
    for (j, &b) in bytes.iter().enumerate().skip(from) {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(j + 1),
            (None, _) => {}
        }
    }
    None
}

/// Length of the comment starting `rest`, which begins with `<!--`.
///
/// `<!-->` and `<!--->` are complete (empty) comments.
fn comment_end(rest: &str) -> Option<usize> {
    let body = &rest[4..];
    if body.starts_with('>') {
        return Some(5);
    }
    if body.starts_with("->") {
        return Some(6);
    }
    body.find("-->").map(|pos| 4 + pos + 3)
}

/// Offset of the `<` of the first `</name` end tag at or after `from`.
fn find_end_tag(bytes: &[u8], from: usize, name: &[u8]) -> Option<usize> {
    let mut j = from;
    while let Some(rel) = bytes.get(j..)?.windows(2).position(|w| w == b"</") {
        let lt = j + rel;
        if match_tag(bytes, lt + 2, name).is_some() {
            return Some(lt);
        }
        j = lt + 2;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents<'a>(html: &'a str, blocks: &[StyleBlock]) -> Vec<&'a str> {
        blocks.iter().map(|b| &html[b.content.clone()]).collect()
    }

    #[test]
    fn test_find_no_style() {
        let blocks = find_style_blocks("<html><body><p>hi</p></body></html>").unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_find_multiple_blocks() {
        let html = "<head><style>a{}</style></head><body><style media=\"print\">b{}</style></body>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["a{}", "b{}"]);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[1].index, 1);
    }

    #[test]
    fn test_find_case_insensitive() {
        let html = "<STYLE type=text/css>x{}</Style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["x{}"]);
    }

    #[test]
    fn test_find_empty_block() {
        let html = "<style></style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), [""]);
    }

    #[test]
    fn test_find_quoted_gt_in_attribute() {
        let html = "<style data-x=\"a>b\">y{}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["y{}"]);
    }

    #[test]
    fn test_find_skips_similar_tag_names() {
        let html = "<styles>no</styles><style>yes{}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["yes{}"]);
    }

    #[test]
    fn test_find_skips_comments() {
        let html = "<!-- <style>x{}</style> --><style>y{}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["y{}"]);
    }

    #[test]
    fn test_find_skips_script_raw_text() {
        let html = "<script>el.innerHTML = '<style>z{}</style>';</script><style>y{}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["y{}"]);
    }

    #[test]
    fn test_find_skips_rcdata_and_raw_text_elements() {
        let html = "<title><style>t{}</style></title>\
<textarea><style>:root{--a:1}</style></textarea>\
<xmp><style>x{}</style></xmp><iframe><style>i{}</style></iframe>\
<noembed><style>e{}</style></noembed><noframes><style>f{}</style></noframes>\
<style>:root{--b:1}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), [":root{--b:1}"]);
    }

    #[test]
    fn test_find_text_element_needs_matching_end_tag() {
        let html = "<textarea></textareas><style>no{}</style></TEXTAREA ><style>yes{}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["yes{}"]);
    }

    #[test]
    fn test_find_after_abrupt_empty_comments() {
        let html = "<!--><style>a{}</style><!---><style>b{}</style><!-- x --><style>c{}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["a{}", "b{}", "c{}"]);
    }

    #[test]
    fn test_find_style_end_tag_needs_boundary() {
        let html = "<style>a{content:\"</styles>\"}</style>";
        let blocks = find_style_blocks(html).unwrap();
        assert_eq!(contents(html, &blocks), ["a{content:\"</styles>\"}"]);
    }

    #[test]
    fn test_find_unclosed_style_element() {
        let html = "<p></p><style>a{}";
        let err = find_style_blocks(html).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedStyleElement);
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn test_find_unterminated_start_tag() {
        let err = find_style_blocks("<style media=\"x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedStyleElement);
    }
}
