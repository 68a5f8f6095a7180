//! Intel HEX records: `:LLAAAATT[DD…]CC`.
//!
//! `LL` is the data byte count, `AAAA` the big-endian address, `TT` the
//! record type (00 data, 01 EOF) and `CC` the two's complement of the sum
//! of all preceding record bytes.

use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Image, Result, MAX_ADDR};

const RECORD_DATA: u8 = 0x00;
const RECORD_EOF: u8 = 0x01;

/// Data bytes per emitted record.
const RUN_LEN: usize = 16;

fn checksum(record: &[u8]) -> u8 {
    let sum = record.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    (!sum).wrapping_add(1)
}

/// Serializes an image as Intel HEX, terminated with the EOF record.
pub fn generate(image: &Image) -> String {
    let mut lines = Vec::new();

    for (base, data) in image.runs(RUN_LEN) {
        let mut record = Vec::with_capacity(data.len() + 4);
        record.push(data.len() as u8);
        let mut addr = [0u8; 2];
        BigEndian::write_u16(&mut addr, u16::from(base));
        record.extend_from_slice(&addr);
        record.push(RECORD_DATA);
        record.extend_from_slice(&data);
        record.push(checksum(&record));
        lines.push(format!(":{}", hex::encode_upper(&record)));
    }

    lines.push(":00000001FF".to_owned());
    lines.join("\n") + "\n"
}

/// Parses Intel HEX text. Validates checksums and byte counts, stops at
/// the EOF record and discards bytes addressed past the address space.
pub fn parse(text: &str) -> Result<Image> {
    let mut image = Image::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !trimmed.starts_with(':') {
            return Err(Error::MissingStart { line, code: ':' });
        }

        let record = hex::decode(&trimmed[1..]).map_err(|_| Error::BadHex { line })?;
        if record.len() < 5 {
            return Err(Error::Short { line });
        }

        let count = record[0] as usize;
        let addr = BigEndian::read_u16(&record[1..3]);
        let kind = record[3];
        let data = &record[4..record.len() - 1];
        let found = record[record.len() - 1];

        let expected = checksum(&record[..record.len() - 1]);
        if expected != found {
            return Err(Error::Checksum {
                line,
                expected,
                found,
            });
        }
        if data.len() != count {
            return Err(Error::Count { line });
        }

        match kind {
            RECORD_EOF => break,
            RECORD_DATA => {
                for (i, byte) in data.iter().enumerate() {
                    let a = addr as usize + i;
                    if a <= MAX_ADDR {
                        image.insert(a as u8, *byte);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(image)
}
