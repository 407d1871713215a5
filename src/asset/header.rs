//! C header rendering for the compressed page.
//!
//! The firmware serves the page straight from flash with
//! `beginResponse(200, "text/html", updatePage, updatePageLength)`, so the
//! identifier names below are part of its build and must not change.

use std::fmt;

/// First line of every generated header.
pub const BANNER: &str =
    "// THIS FILE IS AUTO-GENERATED. PLEASE DO NOT TRY TO EDIT OR SOURCE-CONTROL IT.";

/// Default include guard token.
pub const DEFAULT_GUARD: &str = "LUXIGRID_WEB_UI_GUARD";

/// `const uint16_t` holding the payload length.
pub const LENGTH_IDENT: &str = "updatePageLength";

/// `const uint8_t[]` holding the payload.
pub const ARRAY_IDENT: &str = "updatePage";

/// Hex literals per array line.
pub const BYTES_PER_LINE: usize = 64;

const INDENT: &str = "  ";

/// Renders a payload as a C header.
///
/// ```text
/// // THIS FILE IS AUTO-GENERATED. ...
/// #ifndef GUARD
/// #define GUARD
///
/// const uint16_t updatePageLength = 3;
///
/// const uint8_t updatePage[] = {
///   0x1f, 0x8b, 0x08
/// };
///
/// #endif
/// ```
///
/// There is no newline after `#endif`.
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    pub payload: &'a [u8],
    pub guard: &'a str,
}

impl<'a> Header<'a> {
    pub const fn new(payload: &'a [u8], guard: &'a str) -> Self {
        Self { payload, guard }
    }
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "#ifndef {}", self.guard)?;
        writeln!(f, "#define {}", self.guard)?;
        writeln!(f)?;
        writeln!(f, "const uint16_t {LENGTH_IDENT} = {};", self.payload.len())?;
        writeln!(f)?;
        writeln!(f, "const uint8_t {ARRAY_IDENT}[] = {{")?;

        for (i, line) in self.payload.chunks(BYTES_PER_LINE).enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            f.write_str(INDENT)?;
            for (j, byte) in line.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "0x{byte:02x}")?;
            }
        }

        write!(f, "\n}};\n\n#endif")
    }
}

/// Render `payload` as header text.
pub fn render_header(payload: &[u8], guard: &str) -> String {
    Header::new(payload, guard).to_string()
}
