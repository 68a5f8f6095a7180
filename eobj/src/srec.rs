//! Motorola S-records.
//!
//! Emitted layout: an `S0` header whose data field is `"EDU-CPU"`, `S1`
//! data records with 16-bit addresses, and the `S9 03 0000 FC` terminator.
//! The byte count covers address, data and checksum; the checksum is the
//! one's complement of the sum of the preceding record bytes.

use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Image, Result, MAX_ADDR};

const HEADER_DATA: &[u8] = b"EDU-CPU";

/// Data bytes per emitted record.
const RUN_LEN: usize = 16;

fn checksum(record: &[u8]) -> u8 {
    !record.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

fn record(kind: char, addr: u16, data: &[u8]) -> String {
    let mut bytes = Vec::with_capacity(data.len() + 4);
    bytes.push((2 + data.len() + 1) as u8);
    let mut addr_buf = [0u8; 2];
    BigEndian::write_u16(&mut addr_buf, addr);
    bytes.extend_from_slice(&addr_buf);
    bytes.extend_from_slice(data);
    bytes.push(checksum(&bytes));
    format!("S{}{}", kind, hex::encode_upper(&bytes))
}

/// Serializes an image as S-records, header and terminator included.
pub fn generate(image: &Image) -> String {
    let mut lines = vec![record('0', 0x0000, HEADER_DATA)];

    for (base, data) in image.runs(RUN_LEN) {
        lines.push(record('1', u16::from(base), &data));
    }

    lines.push(record('9', 0x0000, &[]));
    lines.join("\n") + "\n"
}

/// Parses S-record text. Validates checksums and byte counts, stops at
/// the `S9` terminator; record types other than 0, 1 and 9 are skipped.
pub fn parse(text: &str) -> Result<Image> {
    let mut image = Image::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with('S') {
            return Err(Error::MissingStart { line, code: 'S' });
        }
        if trimmed.len() < 4 {
            return Err(Error::Short { line });
        }

        let kind = trimmed.as_bytes()[1];
        let record = hex::decode(&trimmed[2..]).map_err(|_| Error::BadHex { line })?;
        if record.is_empty() {
            return Err(Error::Short { line });
        }

        let count = record[0] as usize;
        if record.len() != count + 1 {
            return Err(Error::Count { line });
        }

        let found = record[record.len() - 1];
        let expected = checksum(&record[..record.len() - 1]);
        if expected != found {
            return Err(Error::Checksum {
                line,
                expected,
                found,
            });
        }

        match kind {
            b'0' => {}
            b'1' => {
                if record.len() < 4 {
                    return Err(Error::Short { line });
                }
                let addr = BigEndian::read_u16(&record[1..3]);
                for (i, byte) in record[3..record.len() - 1].iter().enumerate() {
                    let a = addr as usize + i;
                    if a <= MAX_ADDR {
                        image.insert(a as u8, *byte);
                    }
                }
            }
            b'9' => break,
            _ => {}
        }
    }

    Ok(image)
}
