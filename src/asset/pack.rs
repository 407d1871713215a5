//! gzip packing of the final document.
//!
//! The header mtime is pinned to zero so identical input always produces
//! identical bytes.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};

/// zlib's default level.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compressed document bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAsset {
    bytes: Vec<u8>,
}

impl CompressedAsset {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Compress `document` into a gzip stream at `level` (0-9).
pub fn pack(document: &str, level: u32) -> io::Result<CompressedAsset> {
    let mut encoder = GzBuilder::new().mtime(0).write(
        Vec::with_capacity(document.len() / 2 + 32),
        Compression::new(level),
    );
    encoder.write_all(document.as_bytes())?;
    let bytes = encoder.finish()?;
    Ok(CompressedAsset { bytes })
}

/// Decompress a gzip stream produced by [`pack`].
pub fn unpack(bytes: &[u8]) -> io::Result<String> {
    let mut document = String::new();
    GzDecoder::new(bytes).read_to_string(&mut document)?;
    Ok(document)
}
