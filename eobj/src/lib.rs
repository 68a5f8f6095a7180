//! Object file formats for EDU-CPU memory images.
//!
//! An [`Image`] is a sparse map from 8-bit addresses to bytes. It can be
//! serialized as Intel HEX ([`ihex`]), Motorola S-record ([`srec`]) or a
//! raw binary dump, and parsed back; the text formats round-trip exactly.
//! [`Format::detect`] reproduces the loader's detection rules: file
//! extension first, then a peek at the leading character.

use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use thiserror::Error;

pub mod ihex;
pub mod srec;


/// Highest representable address; the EDU-CPU address space is 256 bytes.
pub const MAX_ADDR: usize = 255;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("file is not ASCII text")]
    NotText,
    #[error("line {line}: missing start code '{code}'")]
    MissingStart { line: usize, code: char },
    #[error("line {line}: invalid hex digits")]
    BadHex { line: usize },
    #[error("line {line}: record too short")]
    Short { line: usize },
    #[error("line {line}: byte count mismatch")]
    Count { line: usize },
    #[error("line {line}: checksum mismatch (expected {expected:02X}, got {found:02X})")]
    Checksum {
        line: usize,
        expected: u8,
        found: u8,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A sparse memory image: the assembler's output and the loader's input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    cells: BTreeMap<u8, u8>,
}

impl Image {
    pub fn new() -> Image {
        Image {
            cells: BTreeMap::new(),
        }
    }

    /// Places a byte, replacing any previous value at that address.
    pub fn insert(&mut self, addr: u8, value: u8) {
        self.cells.insert(addr, value);
    }

    pub fn get(&self, addr: u8) -> Option<u8> {
        self.cells.get(&addr).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates cells in address order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.cells.iter().map(|(a, v)| (*a, *v))
    }

    pub fn max_addr(&self) -> Option<u8> {
        self.cells.keys().next_back().copied()
    }

    /// Addresses present in both images; used by the loader's overlap
    /// diagnostics.
    pub fn common_addresses(&self, other: &Image) -> Vec<u8> {
        self.cells
            .keys()
            .filter(|a| other.cells.contains_key(a))
            .copied()
            .collect()
    }

    /// Splits the image into contiguous runs of at most `max_len` bytes,
    /// in address order. Both record emitters group this way.
    fn runs(&self, max_len: usize) -> Vec<(u8, Vec<u8>)> {
        let mut runs: Vec<(u8, Vec<u8>)> = Vec::new();

        for (addr, value) in self.iter() {
            if let Some((base, data)) = runs.last_mut() {
                if data.len() < max_len && *base as usize + data.len() == addr as usize {
                    data.push(value);
                    continue;
                }
            }
            runs.push((addr, vec![value]));
        }

        runs
    }
}

impl FromIterator<(u8, u8)> for Image {
    fn from_iter<I: IntoIterator<Item = (u8, u8)>>(iter: I) -> Image {
        Image {
            cells: iter.into_iter().collect(),
        }
    }
}

/// The three on-disk representations of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Bin,
    Hex,
    Srec,
}

impl Format {
    /// Detection order: file extension, then an ASCII peek at the first
    /// non-blank character (`:` for HEX, `S` for SREC), raw binary last.
    pub fn detect(path: &Path, data: &[u8]) -> Format {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("hex") => return Format::Hex,
            Some("srec") => return Format::Srec,
            Some("bin") => return Format::Bin,
            _ => {}
        }

        if data.is_ascii() {
            if let Ok(text) = std::str::from_utf8(data) {
                let text = text.trim_start();
                if text.starts_with(':') {
                    return Format::Hex;
                }
                if text.starts_with('S') {
                    return Format::Srec;
                }
            }
        }

        Format::Bin
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Bin => "bin",
            Format::Hex => "hex",
            Format::Srec => "srec",
        }
    }
}

/// Parses file contents in the given format.
pub fn parse(format: Format, data: &[u8]) -> Result<Image> {
    match format {
        Format::Bin => Ok(parse_bin(data)),
        Format::Hex => ihex::parse(text_of(data)?),
        Format::Srec => srec::parse(text_of(data)?),
    }
}

/// Serializes the image in the given format.
pub fn generate(format: Format, image: &Image) -> Vec<u8> {
    match format {
        Format::Bin => generate_bin(image),
        Format::Hex => ihex::generate(image).into_bytes(),
        Format::Srec => srec::generate(image).into_bytes(),
    }
}

/// Reads a file, detects its format and parses it.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<(Format, Image)> {
    let data = fs::read(path.as_ref())?;
    let format = Format::detect(path.as_ref(), &data);
    let image = parse(format, &data)?;
    Ok((format, image))
}

fn text_of(data: &[u8]) -> Result<&str> {
    if !data.is_ascii() {
        return Err(Error::NotText);
    }
    std::str::from_utf8(data).map_err(|_| Error::NotText)
}

/// Raw binary: a dense dump from address 0 to the highest loaded cell,
/// with unloaded cells as zero.
pub fn generate_bin(image: &Image) -> Vec<u8> {
    let size = match image.max_addr() {
        Some(max) => max as usize + 1,
        None => return Vec::new(),
    };
    let mut buf = vec![0; size];
    for (addr, value) in image.iter() {
        buf[addr as usize] = value;
    }
    buf
}

/// Raw binary input: byte N loads at address N; anything past the address
/// space is discarded.
pub fn parse_bin(data: &[u8]) -> Image {
    data.iter()
        .take(MAX_ADDR + 1)
        .enumerate()
        .map(|(i, b)| (i as u8, *b))
        .collect()
}
