//! Two-pass assembler for the [ecpu](../ecpu/index.html) processor.
//!
//! The entry point is [`assemble`], which takes EDU-CPU assembly source
//! and produces a memory [`Image`](eobj::Image) plus a [`Listing`]. All
//! diagnostics carry their 1-based source line and accumulate; a single
//! error anywhere suppresses the output entirely.
//!
//! Parsing uses a [pest] grammar (`asm.pest`) applied per source line,
//! since the language is strictly line-oriented and diagnostics must keep
//! flowing past a bad line.
//!
//! # Source format
//!
//! One statement per line: `[label:] [mnemonic [operands]] [; comment]`.
//! Mnemonics and register names are case-insensitive; labels and symbols
//! are case-sensitive. Numbers are written as decimal, `0x…` hex or
//! `0b…` binary; a single-character string (`'Y'`) works wherever a
//! number does. Strings accept the escapes `\n`, `\t`, `\r`, `\0`, `\\`
//! and must be ASCII.
//!
//! ## Operand forms
//!
//! Form          | Mode      | Notes
//! --------------|-----------|--------------------------------------
//! `A`/`R0`/`R1` | register  | one-byte encoding
//! `#expr`       | immediate |
//! `[expr]`      | direct    | absolute address
//! `[Rn+expr]`   | indexed   | `Rn + offset`, offset may be omitted
//! bare `expr`   | by mnemonic | immediate for LD/ALU, direct for ST, address for JMP/CALL/branches
//!
//! ## Directives
//!
//! Directive           | Effect
//! --------------------|------------------------------------------
//! `.ORG expr`         | set the location counter
//! `.EQU name, expr`   | bind a constant
//! `.DB item[, item …]`| emit bytes and strings (not terminated)
//! `.DS "text"`        | emit a null-terminated string
//!
//! # Example
//!
//! ```
//! let source = "\
//! .EQU PORT, 0xFF
//!         LD A, #'H'
//!         ST A, [PORT]
//!         HLT";
//!
//! let output = easm::assemble(source).unwrap();
//! assert_eq!(output.image.get(0x04), Some(0xA8)); // HLT
//! ```
//!
//! [pest]: https://docs.rs/pest/

mod encode;
mod error;
mod line;
mod listing;
mod operand;
mod parser;
mod symbols;


pub use crate::encode::{instruction_size, statement_size, Assembler};
pub use crate::error::{Error, ErrorKind};
pub use crate::line::{process_source, DbItem, SourceLine, Statement};
pub use crate::listing::{render as render_listing, Listing, ListingEntry};
pub use crate::operand::{decode_string, Expr, Operand};
pub use crate::symbols::SymbolTable;

use eobj::Image;

/// Result of a successful assembly.
#[derive(Debug)]
pub struct Output {
    pub image: Image,
    pub listing: Listing,
}

/// Assembles EDU-CPU source text.
///
/// Pass 1 sizes every statement and builds the symbol table; pass 2
/// encodes against the completed table. Errors from parsing and both
/// passes are returned together, sorted by line.
pub fn assemble(source: &str) -> Result<Output, Vec<Error>> {
    let mut errors = Vec::new();
    let lines = process_source(source, &mut errors);

    let mut assembler = Assembler::new();
    assembler.pass1(&lines);
    errors.extend(assembler.take_errors());
    if !errors.is_empty() {
        errors.sort_by_key(|e| e.line);
        return Err(errors);
    }

    let (image, listing) = assembler.pass2(&lines);
    let mut errors = assembler.take_errors();
    if !errors.is_empty() {
        errors.sort_by_key(|e| e.line);
        return Err(errors);
    }

    Ok(Output { image, listing })
}
