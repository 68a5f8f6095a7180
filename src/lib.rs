//! Simulator core for the EDU-CPU, a pedagogical 8-bit processor.
//!
//! The crate owns the canonical instruction encoding (see [`isa`]) and an
//! instruction-level simulator (see [`Processor`]). The assembler crate
//! (`easm`) builds opcode bytes with the same tables the [`Processor`]
//! decodes with, so the two cannot drift apart.
//!
//! A processor is self-contained: 256 bytes of memory, three registers,
//! two flags, a four-slot call stack and an output stream captured from
//! the memory-mapped port at `0xFF`. Several processors can coexist; each
//! one is mutated through `&mut self` only.

pub mod constants;
pub mod isa;
pub mod memory;
pub mod processor;

pub use crate::isa::{AluOp, BranchCond, Mode, ParseEnumError, Reg, VarOp};
pub use crate::memory::Memory;
pub use crate::processor::{Fault, FaultKind, Processor, StepResult};
