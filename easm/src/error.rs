use thiserror::Error;

/// A diagnostic tied to its 1-based source line. Diagnostics accumulate
/// across both passes; any of them suppresses all output.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Line {line}: {kind}")]
pub struct Error {
    pub line: usize,
    pub kind: ErrorKind,
}

impl Error {
    pub fn new(line: usize, kind: ErrorKind) -> Error {
        Error { line, kind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("unknown instruction '{0}'")]
    UnknownMnemonic(String),
    #[error("undefined symbol '{0}'")]
    UndefinedSymbol(String),
    #[error("duplicate symbol '{0}'")]
    DuplicateSymbol(String),
    /// Malformed directive arguments (`.ORG`, `.EQU`, `.DB`, `.DS`).
    #[error("{0}")]
    Directive(String),
    /// An addressing mode the mnemonic does not accept.
    #[error("{0}")]
    AddressingMode(String),
    /// Missing, extra or wrongly shaped operands.
    #[error("{0}")]
    Operands(String),
    #[error("branch displacement {0} out of range (-128..+127)")]
    BranchRange(i32),
    #[error("address 0x{0:02X} exceeds memory")]
    AddressOverflow(u32),
    #[error("{0}")]
    BadString(String),
    #[error("invalid number '{0}'")]
    BadNumber(String),
}
