//! Minimal PNG writer for 8-bit RGBA rasters
//!
//! Only the three critical chunks are emitted (`IHDR`, `IDAT`, `IEND`).
//! Every scanline uses filter type 0 and the whole image goes into a single
//! zlib stream compressed at the highest level.

use crate::pixel::Pixel;
use flate2::{write::ZlibEncoder, Compression, Crc};
use std::io::{self, Write};

/// The fixed 8-byte PNG file signature
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const BIT_DEPTH: u8 = 8;
/// Truecolor with alpha
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

/// Encode `pixels` (row-major, `width * height` long) as a PNG file.
///
/// The pixel count is not checked against the dimensions, in any build; a
/// mismatched field yields a file decoders will reject.
pub fn encode(width: u32, height: u32, pixels: &[Pixel]) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_png(&mut buf, width, height, pixels)?;
    Ok(buf)
}

/// Stream a PNG file for `pixels` into `w`.
pub fn write_png<W: Write>(mut w: W, width: u32, height: u32, pixels: &[Pixel]) -> io::Result<()> {
    let idat = compress(&scanlines(width, pixels))?;
    log::debug!(
        "png {width}x{height}: {} raw pixels -> {} byte IDAT",
        pixels.len(),
        idat.len()
    );

    w.write_all(&SIGNATURE)?;
    write_chunk(&mut w, b"IHDR", &ihdr(width, height))?;
    write_chunk(&mut w, b"IDAT", &idat)?;
    write_chunk(&mut w, b"IEND", &[])?;
    w.flush()
}

/// CRC-32 over the chunk type followed by its payload
pub fn chunk_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(chunk_type);
    crc.update(data);
    crc.sum()
}

fn ihdr(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = BIT_DEPTH;
    data[9] = COLOR_TYPE_RGBA;
    // compression, filter and interlace methods stay 0
    data
}

/// Prefix each row with its filter byte
fn scanlines(width: u32, pixels: &[Pixel]) -> Vec<u8> {
    let row_len = width as usize;
    let mut raw = Vec::with_capacity(pixels.len() * 4 + pixels.len() / row_len.max(1) + 1);
    if row_len == 0 {
        return raw;
    }
    for row in pixels.chunks(row_len) {
        raw.push(FILTER_NONE);
        for pixel in row {
            raw.extend_from_slice(&pixel.to_bytes());
        }
    }
    raw
}

fn compress(raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(raw)?;
    encoder.finish()
}

fn write_chunk<W: Write>(w: &mut W, chunk_type: &[u8; 4], data: &[u8]) -> io::Result<()> {
    let len = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PNG chunk exceeds 4 GiB"))?;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(chunk_type)?;
    w.write_all(data)?;
    w.write_all(&chunk_crc(chunk_type, data).to_be_bytes())
}
