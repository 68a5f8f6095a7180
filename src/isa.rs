//! Canonical encoding tables shared by the assembler and the simulator.
//!
//! Everything that knows how an opcode byte is laid out lives here: the
//! register, mode and operation enums, the packing helpers the assembler
//! uses to build opcode bytes, and the split/decode helpers the processor
//! uses to take them apart. In particular the register-mode cross table
//! ([`other_register`] / [`r_bit_for`]) has exactly one definition.

use std::fmt;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive as _;
use thiserror::Error;

use crate::constants;

/// Failed textual lookup of a register, operation or condition name.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown {what} \"{value}\"")]
pub struct ParseEnumError {
    pub value: String,
    pub what: &'static str,
}

/// The register file. The numeric value doubles as the index into the
/// register array and as the bits-1..0 encoding of the PUSH/POP/INC/DEC
/// groups.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Reg {
    A,
    R0,
    R1,
}

impl Reg {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Reg {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Reg, ParseEnumError> {
        if s.eq_ignore_ascii_case("A") {
            Ok(Reg::A)
        } else if s.eq_ignore_ascii_case("R0") {
            Ok(Reg::R0)
        } else if s.eq_ignore_ascii_case("R1") {
            Ok(Reg::R1)
        } else {
            Err(ParseEnumError {
                value: s.to_owned(),
                what: "register",
            })
        }
    }
}

/// Addressing modes, i.e. the MM field of a variable-mode opcode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Mode {
    Immediate = 0b00,
    Register = 0b01,
    Direct = 0b10,
    Indexed = 0b11,
}

impl Mode {
    /// Decodes the MM field. Total: only bits 1..0 are consulted.
    pub fn from_bits(bits: u8) -> Mode {
        match bits & constants::MODE_MASK {
            0b00 => Mode::Immediate,
            0b01 => Mode::Register,
            0b10 => Mode::Direct,
            _ => Mode::Indexed,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Mode::Immediate => "immediate",
            Mode::Register => "register",
            Mode::Direct => "direct",
            Mode::Indexed => "indexed",
        };
        f.write_str(name)
    }
}

/// ALU operations. `A` is the implicit accumulator; the discriminants are
/// the IIIII group codes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum AluOp {
    Add = 0b00110,
    Sub = 0b00111,
    And = 0b01000,
    Or = 0b01001,
    Xor = 0b01010,
    Cmp = 0b01011,
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::And => "AND",
            AluOp::Or => "OR",
            AluOp::Xor => "XOR",
            AluOp::Cmp => "CMP",
        };
        f.write_str(name)
    }
}

impl FromStr for AluOp {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<AluOp, ParseEnumError> {
        match s.to_ascii_uppercase().as_str() {
            "ADD" => Ok(AluOp::Add),
            "SUB" => Ok(AluOp::Sub),
            "AND" => Ok(AluOp::And),
            "OR" => Ok(AluOp::Or),
            "XOR" => Ok(AluOp::Xor),
            "CMP" => Ok(AluOp::Cmp),
            _ => Err(ParseEnumError {
                value: s.to_owned(),
                what: "ALU operation",
            }),
        }
    }
}

/// Branch conditions, encoded in bits 1..0 of the branch opcodes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum BranchCond {
    Zero = 0b00,
    NotZero = 0b01,
    Carry = 0b10,
    NotCarry = 0b11,
}

impl BranchCond {
    /// Decodes the condition field. Total: only bits 1..0 are consulted.
    pub fn from_bits(bits: u8) -> BranchCond {
        match bits & constants::MODE_MASK {
            0b00 => BranchCond::Zero,
            0b01 => BranchCond::NotZero,
            0b10 => BranchCond::Carry,
            _ => BranchCond::NotCarry,
        }
    }

    /// Whether the condition holds for the given flag state.
    pub fn holds(self, z: bool, c: bool) -> bool {
        match self {
            BranchCond::Zero => z,
            BranchCond::NotZero => !z,
            BranchCond::Carry => c,
            BranchCond::NotCarry => !c,
        }
    }
}

impl fmt::Display for BranchCond {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BranchCond::Zero => "BZ",
            BranchCond::NotZero => "BNZ",
            BranchCond::Carry => "BC",
            BranchCond::NotCarry => "BNC",
        };
        f.write_str(name)
    }
}

impl FromStr for BranchCond {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<BranchCond, ParseEnumError> {
        match s.to_ascii_uppercase().as_str() {
            "BZ" => Ok(BranchCond::Zero),
            "BNZ" => Ok(BranchCond::NotZero),
            "BC" => Ok(BranchCond::Carry),
            "BNC" => Ok(BranchCond::NotCarry),
            _ => Err(ParseEnumError {
                value: s.to_owned(),
                what: "branch condition",
            }),
        }
    }
}

/// Decoded view of a variable-mode IIIII group.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VarOp {
    Ld(Reg),
    St(Reg),
    Alu(AluOp),
}

/// Classifies an IIIII group code, if it belongs to the variable block.
pub fn decode_group(group: u8) -> Option<VarOp> {
    if group > constants::GROUP_MAX {
        None
    } else if group < constants::ST_BASE {
        Reg::from_u8(group).map(VarOp::Ld)
    } else if group < AluOp::Add as u8 {
        Reg::from_u8(group - constants::ST_BASE).map(VarOp::St)
    } else {
        AluOp::from_u8(group).map(VarOp::Alu)
    }
}

/// Splits an opcode byte into its IIIII, R and MM fields.
#[inline]
pub fn split(opcode: u8) -> (u8, u8, Mode) {
    (
        opcode >> constants::GROUP_SHIFT,
        (opcode & constants::R_BIT_MASK) >> 2,
        Mode::from_bits(opcode),
    )
}

/// Packs an IIIII group, R bit and mode into an opcode byte.
#[inline]
pub fn pack(group: u8, r_bit: u8, mode: Mode) -> u8 {
    (group << constants::GROUP_SHIFT) | ((r_bit & 1) << 2) | mode as u8
}

/// Opcode byte for `LD <reg>` in the given mode.
#[inline]
pub fn ld(reg: Reg, mode: Mode, r_bit: u8) -> u8 {
    pack(reg as u8, r_bit, mode)
}

/// Opcode byte for `ST <reg>` in the given mode.
#[inline]
pub fn st(reg: Reg, mode: Mode, r_bit: u8) -> u8 {
    pack(reg as u8 + constants::ST_BASE, r_bit, mode)
}

/// Opcode byte for an ALU operation in the given mode.
#[inline]
pub fn alu(op: AluOp, mode: Mode, r_bit: u8) -> u8 {
    pack(op as u8, r_bit, mode)
}

/// Opcode byte for a conditional branch.
#[inline]
pub fn branch(cond: BranchCond) -> u8 {
    constants::BRANCH_BASE | cond as u8
}

#[inline]
pub fn push(reg: Reg) -> u8 {
    (constants::PUSH_GROUP << constants::GROUP_SHIFT) | reg as u8
}

#[inline]
pub fn pop(reg: Reg) -> u8 {
    (constants::POP_GROUP << constants::GROUP_SHIFT) | reg as u8
}

#[inline]
pub fn inc(reg: Reg) -> u8 {
    (constants::INC_GROUP << constants::GROUP_SHIFT) | reg as u8
}

#[inline]
pub fn dec(reg: Reg) -> u8 {
    (constants::DEC_GROUP << constants::GROUP_SHIFT) | reg as u8
}

// Register-mode cross table. In MM=01 the R bit does not name a register
// directly; it selects one of the two registers that is NOT the
// instruction's primary register:
//
//   primary | R=0 | R=1
//   --------+-----+-----
//      A    | R0  | R1
//      R0   | A   | R1
//      R1   | A   | R0

/// The two registers selectable in register mode for a given primary,
/// indexed by the R bit.
pub fn other_registers(primary: Reg) -> [Reg; 2] {
    match primary {
        Reg::A => [Reg::R0, Reg::R1],
        Reg::R0 => [Reg::A, Reg::R1],
        Reg::R1 => [Reg::A, Reg::R0],
    }
}

/// The register a given R bit selects in register mode.
#[inline]
pub fn other_register(primary: Reg, r_bit: u8) -> Reg {
    other_registers(primary)[(r_bit & 1) as usize]
}

/// The R bit that selects `other` relative to `primary`, if that pairing
/// is encodable at all (`other == primary` is not).
pub fn r_bit_for(primary: Reg, other: Reg) -> Option<u8> {
    other_registers(primary)
        .iter()
        .position(|r| *r == other)
        .map(|i| i as u8)
}

/// The index register named by the R bit in indexed mode.
#[inline]
pub fn index_register(r_bit: u8) -> Reg {
    if r_bit & 1 == 0 {
        Reg::R0
    } else {
        Reg::R1
    }
}
