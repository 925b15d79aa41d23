//! Zlib helpers for binary patch payloads.

use std::io::{self, Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

/// Inflates a zlib stream into a fresh buffer.
///
/// The stream must span the whole input; trailing bytes after the zlib
/// terminator are rejected so a corrupt payload cannot pass as a short one.
pub fn inflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated)?;

    if (decoder.total_in() as usize) < data.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "trailing bytes after zlib stream",
        ));
    }

    Ok(inflated)
}

/// Deflates `data` with the default compression level.
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
