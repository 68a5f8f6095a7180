/// One listing row: the emission address (if any), the emitted bytes and
/// the source text as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    pub addr: Option<u32>,
    pub bytes: Vec<u8>,
    pub source: String,
}

pub type Listing = Vec<ListingEntry>;

impl ListingEntry {
    pub fn source_only(source: &str) -> ListingEntry {
        ListingEntry {
            addr: None,
            bytes: Vec::new(),
            source: source.to_owned(),
        }
    }

    pub fn address_only(addr: u32, source: &str) -> ListingEntry {
        ListingEntry {
            addr: Some(addr),
            bytes: Vec::new(),
            source: source.to_owned(),
        }
    }

    pub fn emitted(addr: u32, bytes: Vec<u8>, source: &str) -> ListingEntry {
        ListingEntry {
            addr: Some(addr),
            bytes,
            source: source.to_owned(),
        }
    }
}

/// Renders the `.lst` text: `AAAA  HH HH …  <source>` for emitting rows,
/// the bare address for `.ORG` rows, 20 blanks otherwise. A trailing
/// newline terminates the file.
pub fn render(listing: &[ListingEntry]) -> String {
    let mut lines = Vec::with_capacity(listing.len());

    for entry in listing {
        let line = match entry.addr {
            Some(addr) if !entry.bytes.is_empty() => {
                let bytes: Vec<String> = entry.bytes.iter().map(|b| format!("{:02X}", b)).collect();
                format!("{:04X}  {:<12}  {}", addr, bytes.join(" "), entry.source)
            }
            Some(addr) => format!("{:04X}                {}", addr, entry.source),
            None => format!("                    {}", entry.source),
        };
        lines.push(line);
    }

    lines.join("\n") + "\n"
}
