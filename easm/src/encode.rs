use ecpu::constants::{OP_CALL, OP_HLT, OP_JMP, OP_NOP, OP_RET};
use ecpu::{isa, AluOp, BranchCond, Mode, Reg};
use eobj::Image;

use crate::error::{Error, ErrorKind};
use crate::line::{DbItem, SourceLine, Statement};
use crate::listing::{Listing, ListingEntry};
use crate::operand::{Expr, Operand};
use crate::symbols::SymbolTable;

/// Predicted size in bytes of a statement. Pass 2 emits exactly this
/// many bytes for it, zero placeholders included, so label addresses and
/// the listing stay aligned even for lines that error.
pub fn statement_size(statement: &Statement) -> u32 {
    match statement {
        Statement::Org(_) | Statement::Equ(..) => 0,
        Statement::Db(items) => items
            .iter()
            .map(|item| match item {
                DbItem::Bytes(bytes) => bytes.len() as u32,
                DbItem::Value(_) => 1,
            })
            .sum(),
        Statement::Ds(bytes) => bytes.len() as u32 + 1,
        Statement::Instr { mnemonic, operands } => instruction_size(mnemonic, operands),
    }
}

/// Size of a machine instruction: one byte in register mode, two in the
/// other modes; fixed opcodes are one byte except JMP/CALL/branches.
pub fn instruction_size(mnemonic: &str, operands: &[Operand]) -> u32 {
    match mnemonic {
        "LD" | "ST" => operand_size(operands.get(1)),
        "ADD" | "SUB" | "AND" | "OR" | "XOR" | "CMP" => operand_size(operands.get(0)),
        "JMP" | "CALL" | "BZ" | "BNZ" | "BC" | "BNC" => 2,
        _ => 1,
    }
}

fn operand_size(operand: Option<&Operand>) -> u32 {
    match operand {
        Some(Operand::Register(_)) | None => 1,
        Some(_) => 2,
    }
}

/// Two-pass assembler state: the symbol table built by pass 1 and the
/// accumulated diagnostics of both passes.
#[derive(Default)]
pub struct Assembler {
    symbols: SymbolTable,
    errors: Vec<Error>,
}

impl Assembler {
    pub fn new() -> Assembler {
        Assembler::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::replace(&mut self.errors, Vec::new())
    }

    fn error(&mut self, line: usize, kind: ErrorKind) {
        self.errors.push(Error::new(line, kind));
    }

    /// Pass 1: bind labels and `.EQU` constants, advance the location
    /// counter by the predicted statement sizes. The counter may run past
    /// the end of memory here; that only becomes fatal when pass 2
    /// actually emits there.
    pub fn pass1(&mut self, lines: &[SourceLine]) {
        let mut pc: u32 = 0;

        for line in lines {
            if let Some(label) = line.label {
                if let Err(kind) = self.symbols.define(label, pc as i32) {
                    self.error(line.number, kind);
                }
            }

            match &line.statement {
                None => {}
                Some(Statement::Org(expr)) => match self.lookup(expr) {
                    Some(value) => pc = value as u32 & 0xFFFF,
                    None => {
                        self.error(
                            line.number,
                            ErrorKind::Directive("invalid .ORG address".to_owned()),
                        );
                    }
                },
                Some(Statement::Equ(name, expr)) => match self.lookup(expr) {
                    Some(value) => {
                        if let Err(kind) = self.symbols.define(name, value) {
                            self.error(line.number, kind);
                        }
                    }
                    None => {
                        self.error(
                            line.number,
                            ErrorKind::Directive(format!("invalid .EQU value for '{}'", name)),
                        );
                    }
                },
                Some(statement) => pc += statement_size(statement),
            }
        }
    }

    /// Pass 2: encode every statement against the completed symbol table,
    /// producing the image and the listing.
    pub fn pass2(&mut self, lines: &[SourceLine]) -> (Image, Listing) {
        let mut pc: u32 = 0;
        let mut image = Image::new();
        let mut listing = Listing::with_capacity(lines.len());

        for line in lines {
            match &line.statement {
                None => listing.push(ListingEntry::source_only(line.raw)),
                Some(Statement::Org(expr)) => {
                    if let Some(value) = self.lookup(expr) {
                        pc = value as u32 & 0xFFFF;
                    }
                    listing.push(ListingEntry::address_only(pc, line.raw));
                }
                Some(Statement::Equ(..)) => listing.push(ListingEntry::source_only(line.raw)),
                Some(statement) => {
                    let bytes = self.encode_statement(statement, pc, line.number);
                    let len = bytes.len() as u32;

                    for (i, byte) in bytes.iter().enumerate() {
                        let addr = pc + i as u32;
                        if addr > 0xFF {
                            self.error(line.number, ErrorKind::AddressOverflow(addr));
                            break;
                        }
                        image.insert(addr as u8, *byte);
                    }

                    listing.push(ListingEntry::emitted(pc, bytes, line.raw));
                    pc += len;
                }
            }
        }

        (image, listing)
    }

    /// Quiet resolution for directive arguments: no diagnostic, the
    /// caller reports its own.
    fn lookup(&self, expr: &Expr) -> Option<i32> {
        match expr {
            Expr::Number(value) => Some(*value),
            Expr::Str(bytes) if bytes.len() == 1 => Some(bytes[0] as i32),
            Expr::Str(_) => None,
            Expr::Symbol(name) => self.symbols.get(name),
        }
    }

    /// Resolves an expression to its full value, recording a diagnostic
    /// and yielding zero when it cannot be.
    fn eval_wide(&mut self, expr: &Expr, line: usize) -> i32 {
        match expr {
            Expr::Number(value) => *value,
            Expr::Str(bytes) => {
                if bytes.len() == 1 {
                    bytes[0] as i32
                } else {
                    self.error(
                        line,
                        ErrorKind::BadString(
                            "string used as a value must be exactly one byte".to_owned(),
                        ),
                    );
                    0
                }
            }
            Expr::Symbol(name) => match self.symbols.get(name) {
                Some(value) => value,
                None => {
                    self.error(line, ErrorKind::UndefinedSymbol((*name).to_owned()));
                    0
                }
            },
        }
    }

    /// Resolved value masked to a byte. Out-of-range values are silently
    /// truncated, matching the simulator's wrapping arithmetic.
    fn eval(&mut self, expr: &Expr, line: usize) -> u8 {
        (self.eval_wide(expr, line) & 0xFF) as u8
    }

    fn encode_statement(&mut self, statement: &Statement, pc: u32, line: usize) -> Vec<u8> {
        match statement {
            Statement::Db(items) => {
                let mut out = Vec::new();
                for item in items {
                    match item {
                        DbItem::Bytes(bytes) => out.extend_from_slice(bytes),
                        DbItem::Value(expr) => out.push(self.eval(expr, line)),
                    }
                }
                out
            }
            Statement::Ds(bytes) => {
                let mut out = bytes.clone();
                out.push(0x00);
                out
            }
            Statement::Instr { mnemonic, operands } => {
                self.encode_instruction(mnemonic, operands, pc, line)
            }
            Statement::Org(_) | Statement::Equ(..) => unreachable!(),
        }
    }

    fn encode_instruction(
        &mut self,
        mnemonic: &str,
        operands: &[Operand],
        pc: u32,
        line: usize,
    ) -> Vec<u8> {
        if mnemonic == "LD" || mnemonic == "ST" {
            self.encode_ld_st(mnemonic == "ST", operands, line)
        } else if let Ok(op) = mnemonic.parse::<AluOp>() {
            self.encode_alu(op, operands, line)
        } else if let Ok(cond) = mnemonic.parse::<BranchCond>() {
            self.encode_branch(cond, operands, pc, line)
        } else if mnemonic == "JMP" {
            self.encode_target(OP_JMP, "JMP", operands, line)
        } else if mnemonic == "CALL" {
            self.encode_target(OP_CALL, "CALL", operands, line)
        } else if let Some(opcode) = bare_opcode(mnemonic) {
            self.encode_bare(opcode, mnemonic, operands, line)
        } else if let Some(builder) = register_group(mnemonic) {
            self.encode_reg_group(builder, mnemonic, operands, line)
        } else {
            self.error(line, ErrorKind::UnknownMnemonic(mnemonic.to_owned()));
            vec![0]
        }
    }

    fn encode_ld_st(&mut self, is_store: bool, operands: &[Operand], line: usize) -> Vec<u8> {
        let name = if is_store { "ST" } else { "LD" };

        let primary = match operands.get(0) {
            Some(Operand::Register(reg)) => *reg,
            _ => {
                self.error(
                    line,
                    ErrorKind::Operands(format!(
                        "{} requires A, R0 or R1 as its first operand",
                        name
                    )),
                );
                return vec![0; operand_size(operands.get(1)) as usize];
            }
        };

        if operands.len() > 2 {
            self.error(
                line,
                ErrorKind::Operands(format!("{} takes exactly two operands", name)),
            );
            return vec![0; operand_size(operands.get(1)) as usize];
        }

        let source = match operands.get(1) {
            Some(operand) => operand,
            None => {
                self.error(
                    line,
                    ErrorKind::Operands(format!("{} {} requires a second operand", name, primary)),
                );
                return vec![0];
            }
        };

        let opcode = |mode, r_bit| {
            if is_store {
                isa::st(primary, mode, r_bit)
            } else {
                isa::ld(primary, mode, r_bit)
            }
        };

        match source {
            Operand::Immediate(_) if is_store => {
                self.error(
                    line,
                    ErrorKind::AddressingMode(
                        "ST does not support immediate addressing".to_owned(),
                    ),
                );
                vec![0, 0]
            }
            Operand::Immediate(expr) => {
                vec![opcode(Mode::Immediate, 0), self.eval(expr, line)]
            }
            // A bare value is an immediate for LD and an address for ST.
            Operand::Value(expr) if is_store => {
                vec![opcode(Mode::Direct, 0), self.eval(expr, line)]
            }
            Operand::Value(expr) => {
                vec![opcode(Mode::Immediate, 0), self.eval(expr, line)]
            }
            Operand::Register(other) => match isa::r_bit_for(primary, *other) {
                Some(r_bit) => vec![opcode(Mode::Register, r_bit)],
                None => {
                    self.error(
                        line,
                        ErrorKind::AddressingMode(format!(
                            "cannot use {} with {} {} in register mode",
                            other, name, primary
                        )),
                    );
                    vec![0]
                }
            },
            Operand::Direct(expr) => {
                vec![opcode(Mode::Direct, 0), self.eval(expr, line)]
            }
            Operand::Indexed(reg, expr) => {
                let r_bit = if *reg == Reg::R1 { 1 } else { 0 };
                vec![opcode(Mode::Indexed, r_bit), self.eval(expr, line)]
            }
        }
    }

    fn encode_alu(&mut self, op: AluOp, operands: &[Operand], line: usize) -> Vec<u8> {
        let operand = match operands {
            [operand] => operand,
            [] => {
                self.error(
                    line,
                    ErrorKind::Operands(format!("{} requires an operand", op)),
                );
                return vec![0];
            }
            _ => {
                self.error(
                    line,
                    ErrorKind::Operands(format!("{} takes exactly one operand", op)),
                );
                return vec![0; operand_size(operands.get(0)) as usize];
            }
        };

        match operand {
            // A bare value is an immediate: `ADD 5` reads as `ADD #5`.
            Operand::Immediate(expr) | Operand::Value(expr) => {
                vec![isa::alu(op, Mode::Immediate, 0), self.eval(expr, line)]
            }
            Operand::Register(src) => match isa::r_bit_for(Reg::A, *src) {
                Some(r_bit) => vec![isa::alu(op, Mode::Register, r_bit)],
                None => {
                    self.error(
                        line,
                        ErrorKind::AddressingMode(format!(
                            "{} only accepts R0 or R1 in register mode",
                            op
                        )),
                    );
                    vec![0]
                }
            },
            Operand::Direct(expr) => {
                vec![isa::alu(op, Mode::Direct, 0), self.eval(expr, line)]
            }
            Operand::Indexed(reg, expr) => {
                let r_bit = if *reg == Reg::R1 { 1 } else { 0 };
                vec![isa::alu(op, Mode::Indexed, r_bit), self.eval(expr, line)]
            }
        }
    }

    fn encode_target(
        &mut self,
        opcode: u8,
        name: &str,
        operands: &[Operand],
        line: usize,
    ) -> Vec<u8> {
        match operands {
            [Operand::Value(expr)] => {
                let target = self.eval(expr, line);
                vec![opcode, target]
            }
            [] => {
                self.error(
                    line,
                    ErrorKind::Operands(format!("{} requires an address", name)),
                );
                vec![opcode, 0]
            }
            _ => {
                self.error(
                    line,
                    ErrorKind::AddressingMode(format!("{} requires a bare address", name)),
                );
                vec![opcode, 0]
            }
        }
    }

    fn encode_branch(
        &mut self,
        cond: BranchCond,
        operands: &[Operand],
        pc: u32,
        line: usize,
    ) -> Vec<u8> {
        let opcode = isa::branch(cond);
        match operands {
            [Operand::Value(expr)] => {
                let target = self.eval_wide(expr, line);
                // The displacement is relative to the next instruction.
                let mut disp = target - (pc as i32 + 2);
                if disp < -128 || disp > 127 {
                    self.error(line, ErrorKind::BranchRange(disp));
                    disp = 0;
                }
                vec![opcode, (disp & 0xFF) as u8]
            }
            [] => {
                self.error(
                    line,
                    ErrorKind::Operands(format!("{} requires a target", cond)),
                );
                vec![opcode, 0]
            }
            _ => {
                self.error(
                    line,
                    ErrorKind::AddressingMode(format!("{} requires a bare target", cond)),
                );
                vec![opcode, 0]
            }
        }
    }

    fn encode_bare(
        &mut self,
        opcode: u8,
        name: &str,
        operands: &[Operand],
        line: usize,
    ) -> Vec<u8> {
        if !operands.is_empty() {
            self.error(
                line,
                ErrorKind::Operands(format!("{} takes no operand", name)),
            );
        }
        vec![opcode]
    }

    fn encode_reg_group(
        &mut self,
        builder: fn(Reg) -> u8,
        name: &str,
        operands: &[Operand],
        line: usize,
    ) -> Vec<u8> {
        match operands {
            [Operand::Register(reg)] => vec![builder(*reg)],
            _ => {
                self.error(
                    line,
                    ErrorKind::Operands(format!("{} requires a register operand", name)),
                );
                vec![0]
            }
        }
    }
}

fn bare_opcode(mnemonic: &str) -> Option<u8> {
    match mnemonic {
        "RET" => Some(OP_RET),
        "NOP" => Some(OP_NOP),
        "HLT" => Some(OP_HLT),
        _ => None,
    }
}

fn register_group(mnemonic: &str) -> Option<fn(Reg) -> u8> {
    match mnemonic {
        "PUSH" => Some(isa::push),
        "POP" => Some(isa::pop),
        "INC" => Some(isa::inc),
        "DEC" => Some(isa::dec),
        _ => None,
    }
}
