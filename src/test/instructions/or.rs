use super::*;

#[test]
fn merges_bits() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0b0001_0001,
        isa::alu(AluOp::Or, Mode::Immediate, 0),
        0b1000_0010,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0b1001_0011);
    assert!(!processor.zero());
    assert!(!processor.carry());
}

#[test]
fn zero_or_zero_sets_z() {
    let processor = run_to_halt(&[
        isa::alu(AluOp::Or, Mode::Immediate, 0),
        0,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0);
    assert!(processor.zero());
}

#[test]
fn register_source() {
    let processor = run_to_halt(&[
        isa::ld(Reg::R0, Mode::Immediate, 0),
        0x0F,
        isa::ld(Reg::A, Mode::Immediate, 0),
        0xF0,
        isa::alu(AluOp::Or, Mode::Register, 0),
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0xFF);
}
