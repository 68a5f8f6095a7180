use super::*;

#[test]
fn masks_bits() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0b1100_1010,
        isa::alu(AluOp::And, Mode::Immediate, 0),
        0b1010_1010,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0b1000_1010);
    assert!(!processor.zero());
    assert!(!processor.carry());
}

#[test]
fn clears_carry() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0xFF,
        isa::alu(AluOp::Add, Mode::Immediate, 0), // sets C
        0x10,
        isa::alu(AluOp::And, Mode::Immediate, 0),
        0x0F,
        constants::OP_HLT,
    ]);

    assert!(!processor.carry());
}

#[test]
fn zero_result() {
    let processor = run_to_halt(&[
        isa::ld(Reg::A, Mode::Immediate, 0),
        0xF0,
        isa::alu(AluOp::And, Mode::Immediate, 0),
        0x0F,
        constants::OP_HLT,
    ]);

    assert_eq!(processor.register(Reg::A), 0);
    assert!(processor.zero());
}
